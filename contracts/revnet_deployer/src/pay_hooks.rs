//! # Pay hook composition
//!
//! Revnets deployed through [`PayHookExtension`] name this contract as their
//! data hook. On every payment the ledger asks it which hooks to run; the
//! answer is the project's registered hooks in registration order, followed by
//! the buyback hook's specification when the buyback hook elects to take part.
//!
//! The composed list never holds more than `stored + 1` entries and the
//! buyback entry, when present, is always last.
//!
//! Hook lists and buyback bindings are written only from
//! [`PayHookExtension::deploy`]; no entry point lets a hook register itself.

use soroban_sdk::{Address, Env, Vec};

use crate::basic::{BasicDeployer, DeployRequest};
use crate::events;
use crate::interfaces::BuybackHookClient;
use crate::permissions::{Permission, PLATFORM_WIDE};
use crate::storage;
use crate::types::{HookResponse, HookSpecification, PayContext, Variant};
use crate::Error;

/// Granted to each buyback hook so it can mint for any revnet of this deployer.
pub const BUYBACK_HOOK_PERMISSIONS: [Permission; 1] = [Permission::MintTokens];

/// Append `hooks` to the project's list, keeping their order. Duplicates are kept.
pub fn register_hooks(env: &Env, project_id: u64, hooks: &Vec<HookSpecification>) {
    let mut stored = storage::load_pay_hooks(env, project_id);
    stored.append(hooks);
    storage::save_pay_hooks(env, project_id, &stored);
}

pub fn pay_hook_specifications_of(env: &Env, project_id: u64) -> Vec<HookSpecification> {
    storage::load_pay_hooks(env, project_id)
}

/// Answer a payment callback. Read-only apart from TTL bumps.
pub fn compose(env: &Env, context: &PayContext) -> HookResponse {
    let mut specifications = storage::load_pay_hooks(env, context.project_id);

    let weight = match storage::get_buyback_hook(env, context.project_id) {
        Some(hook) => {
            let response = BuybackHookClient::new(env, &hook).on_payment_context(context);
            if let Some(buyback) = response.specifications.first() {
                specifications.push_back(buyback);
            }
            response.weight
        }
        None => context.weight,
    };

    HookResponse {
        weight,
        specifications,
    }
}

/// Redemptions carry no hooks and no weight for these revnets.
pub fn redemption_response(env: &Env) -> HookResponse {
    HookResponse {
        weight: 0,
        specifications: Vec::new(env),
    }
}

/// Only the project's bound buyback hook may mint through this data hook.
pub fn has_mint_permission_for(env: &Env, project_id: u64, address: &Address) -> bool {
    storage::get_buyback_hook(env, project_id)
        .map(|hook| hook == *address)
        .unwrap_or(false)
}

pub struct PayHookExtension<'a> {
    base: BasicDeployer<'a>,
}

impl<'a> PayHookExtension<'a> {
    pub fn new(base: BasicDeployer<'a>) -> Self {
        Self { base }
    }

    pub fn deploy(
        &self,
        request: &DeployRequest,
        pay_hooks: &Vec<HookSpecification>,
        extra_hook_metadata: u32,
    ) -> Result<u64, Error> {
        let env = self.base.env();
        let data_hook = env.current_contract_address();
        let operator = request.operator().clone();

        let deployment = self.base.deploy_with(
            request,
            Variant::PayHooks,
            &data_hook,
            extra_hook_metadata,
            |_, _| Ok(operator),
        )?;
        let project_id = deployment.project_id;

        let buyback_hook = request.buyback.hook.clone();
        storage::set_buyback_hook(env, project_id, &buyback_hook);
        register_hooks(env, project_id, pay_hooks);

        self.base.permissions().grant_if_missing(
            &buyback_hook,
            PLATFORM_WIDE,
            &BUYBACK_HOOK_PERMISSIONS,
        );

        events::emit_pay_hooks_registered(env, project_id, pay_hooks.len(), buyback_hook);
        Ok(project_id)
    }
}

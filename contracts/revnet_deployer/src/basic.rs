//! # Basic deployer
//!
//! The component every variant is built on. A variant holds a
//! [`BasicDeployer`], calls [`BasicDeployer::deploy_with`] and then performs
//! its own configuration on the returned [`Deployment`].
//!
//! Deployment steps, in order:
//!
//! 1. launch the project with the built rulesets and the terminals
//! 2. issue the project token
//! 3. hand every configured pool to the buyback hook
//! 4. route the boost split group to the boost operator
//! 5. premint, if configured, to the beneficiary chosen by the variant
//! 6. let the boost operator manage the split group
//!
//! Any failing step aborts the transaction; nothing here rolls back by hand.

use soroban_sdk::{Address, Env, String, Vec};

use crate::events;
use crate::interfaces::{BuybackHookClient, ControllerClient};
use crate::permissions::{Permission, PermissionDelegator};
use crate::ruleset;
use crate::storage;
use crate::types::{
    BuybackHookConfig, Collaborators, RevnetConfig, RevnetRecord, TerminalConfig, Variant,
    DEFAULT_RULESET_ID,
};
use crate::Error;

/// What the boost operator is allowed to do on every revnet.
pub const BOOST_OPERATOR_PERMISSIONS: [Permission; 1] = [Permission::SetSplitGroups];

/// Arguments shared by every deployer entry point.
#[derive(Clone, Debug)]
pub struct DeployRequest {
    pub name: String,
    pub symbol: String,
    pub metadata_uri: String,
    pub config: RevnetConfig,
    pub terminals: Vec<TerminalConfig>,
    pub buyback: BuybackHookConfig,
}

impl DeployRequest {
    pub fn operator(&self) -> &Address {
        &self.config.initial_boost_operator
    }
}

/// A launched project, its token and whoever received the premint.
#[derive(Clone, Debug)]
pub struct Deployment {
    pub project_id: u64,
    pub token: Address,
    pub premint_beneficiary: Address,
}

pub struct BasicDeployer<'a> {
    env: &'a Env,
    collaborators: Collaborators,
}

impl<'a> BasicDeployer<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self {
            env,
            collaborators: storage::get_collaborators(env),
        }
    }

    pub fn env(&self) -> &'a Env {
        self.env
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn permissions(&self) -> PermissionDelegator<'a> {
        PermissionDelegator::new(self.env, &self.collaborators.permissions)
    }

    /// Deploy with the buyback hook as data hook and the premint going to the
    /// boost operator.
    pub fn deploy(&self, request: &DeployRequest, variant: Variant) -> Result<Deployment, Error> {
        let operator = request.operator().clone();
        self.deploy_with(request, variant, &request.buyback.hook, 0, |_, _| Ok(operator))
    }

    /// Deploy with an explicit data hook. `extra_metadata` is copied into every
    /// ruleset's metadata for the data hook to read.
    ///
    /// `premint_beneficiary` is called with the project id and token once both
    /// exist, before any premint, and decides who receives it. It runs even
    /// when nothing is preminted.
    pub fn deploy_with<F>(
        &self,
        request: &DeployRequest,
        variant: Variant,
        data_hook: &Address,
        extra_metadata: u32,
        premint_beneficiary: F,
    ) -> Result<Deployment, Error>
    where
        F: FnOnce(u64, &Address) -> Result<Address, Error>,
    {
        let env = self.env;
        let rulesets = ruleset::build(env, &request.config, data_hook, extra_metadata)?;
        let owner = env.current_contract_address();
        let controller = ControllerClient::new(env, &self.collaborators.controller);

        let project_id = controller.launch_project_for(
            &owner,
            &request.metadata_uri,
            &rulesets,
            &request.terminals,
            &String::from_str(env, "revnet deployed"),
        );
        let token = controller.deploy_token_for(&project_id, &request.name, &request.symbol);

        let buyback = BuybackHookClient::new(env, &request.buyback.hook);
        for pool in request.buyback.pools.iter() {
            buyback.set_pool_for(&owner, &project_id, &pool);
        }

        controller.set_splits_of(
            &project_id,
            &DEFAULT_RULESET_ID,
            &ruleset::boost_split_groups(env, request.operator()),
        );

        let beneficiary = premint_beneficiary(project_id, &token)?;
        if request.config.premint_token_amount > 0 {
            controller.mint_tokens_of(
                &project_id,
                &request.config.premint_token_amount,
                &beneficiary,
                &String::from_str(env, "premint"),
                &false,
            );
        }

        self.permissions()
            .grant(request.operator(), project_id, &BOOST_OPERATOR_PERMISSIONS);

        let record = RevnetRecord {
            project_id,
            variant,
            operator: request.operator().clone(),
            token: token.clone(),
            data_hook: data_hook.clone(),
        };
        storage::save_revnet(env, &record);
        events::emit_revnet_deployed(env, &record);

        Ok(Deployment {
            project_id,
            token,
            premint_beneficiary: beneficiary,
        })
    }
}

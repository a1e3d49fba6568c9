//! # Revnet Deployer Contract
//!
//! Deploys revnets (self-governing projects whose token issuance schedule is
//! fixed at launch) on the ledger platform's controller, and serves as the
//! payment-time data hook for revnets that compose third-party pay hooks.
//!
//! | Variant      | Entry Point                                   |
//! |--------------|-----------------------------------------------|
//! | Basic        | [`RevnetDeployer::deploy`]                    |
//! | Pay hooks    | [`RevnetDeployer::deploy_with_pay_hooks`]     |
//! | Croptop      | [`RevnetDeployer::deploy_with_publishing`]    |
//! | Vesting      | [`RevnetDeployer::deploy_with_vesting`]       |
//! | Data hook    | `on_payment_context`, `on_redemption_context`, `has_mint_permission_for`, `supports_interface` |
//! | Queries      | `pay_hook_specifications_of`, `buyback_hook_of`, `revnet_of`, `vesting_of`, `collaborators` |
//!
//! ## Architecture
//!
//! Every variant holds a [`basic::BasicDeployer`] and augments what it
//! deploys; there is no inheritance between variants. Grants go through
//! [`permissions`]. Storage access is delegated to `storage`. Collaborators
//! are reached through the typed clients in [`interfaces`].
//!
//! The deployer owns every revnet it launches. It never holds funds.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Symbol, Vec};

pub mod basic;
pub mod croptop;
pub mod events;
pub mod interfaces;
pub mod pay_hooks;
pub mod permissions;
pub mod ruleset;
mod storage;
pub mod types;
pub mod vesting;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_pay_hooks;

use basic::{BasicDeployer, DeployRequest};
use croptop::CroptopExtension;
use interfaces::DATA_HOOK_INTERFACE;
use pay_hooks::PayHookExtension;
pub use permissions::Permission;
pub use types::{
    AllowedPost, BuybackHookConfig, BuybackPoolConfig, Collaborators, HookResponse,
    HookSpecification, PayContext, RedeemContext, RevnetConfig, RevnetRecord, StageConfig,
    TerminalConfig, Variant, VestingActual, VestingOptions, VestingPreset, VestingRecord,
    VestingStatus,
};
use vesting::VestingExtension;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    EmptyStages = 1,
    StageTimesMustIncrease = 2,
    InvalidRate = 3,
    InvalidPremint = 4,
    InvalidPresetCount = 5,
    InvalidActualCount = 6,
    RecipientNotOperator = 7,
    UnknownPreset = 8,
    InvalidVestingAmount = 9,
    VestingOwnershipNotTransferred = 10,
}

#[contract]
pub struct RevnetDeployer;

#[contractimpl]
impl RevnetDeployer {
    /// Fix the collaborator addresses for the lifetime of the contract.
    pub fn __constructor(
        env: Env,
        controller: Address,
        permissions: Address,
        publisher: Address,
        vesting_factory: Address,
    ) {
        storage::set_collaborators(
            &env,
            &Collaborators {
                controller,
                permissions,
                publisher,
                vesting_factory,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Deployment
    // ─────────────────────────────────────────────────────────

    /// Deploy a revnet whose data hook is the buyback hook.
    ///
    /// The premint, if any, goes to the boost operator.
    pub fn deploy(
        env: Env,
        name: String,
        symbol: String,
        metadata_uri: String,
        config: RevnetConfig,
        terminals: Vec<TerminalConfig>,
        buyback: BuybackHookConfig,
    ) -> Result<u64, Error> {
        let request = DeployRequest {
            name,
            symbol,
            metadata_uri,
            config,
            terminals,
            buyback,
        };
        let deployment = BasicDeployer::new(&env).deploy(&request, Variant::Basic)?;
        Ok(deployment.project_id)
    }

    /// Deploy a revnet that runs `pay_hooks`, in order, on every payment and
    /// then the buyback hook when it participates.
    ///
    /// This contract becomes the data hook; the buyback hook is granted
    /// `MintTokens` across this deployer's revnets unless it already holds it.
    /// `extra_hook_metadata` lands in every ruleset's metadata.
    #[allow(clippy::too_many_arguments)]
    pub fn deploy_with_pay_hooks(
        env: Env,
        name: String,
        symbol: String,
        metadata_uri: String,
        config: RevnetConfig,
        terminals: Vec<TerminalConfig>,
        buyback: BuybackHookConfig,
        pay_hooks: Vec<HookSpecification>,
        extra_hook_metadata: u32,
    ) -> Result<u64, Error> {
        let request = DeployRequest {
            name,
            symbol,
            metadata_uri,
            config,
            terminals,
            buyback,
        };
        PayHookExtension::new(BasicDeployer::new(&env)).deploy(
            &request,
            &pay_hooks,
            extra_hook_metadata,
        )
    }

    /// Deploy a revnet whose collectible tiers can be published to through
    /// the publishing proxy under `allowed_posts`.
    #[allow(clippy::too_many_arguments)]
    pub fn deploy_with_publishing(
        env: Env,
        name: String,
        symbol: String,
        metadata_uri: String,
        config: RevnetConfig,
        terminals: Vec<TerminalConfig>,
        buyback: BuybackHookConfig,
        allowed_posts: Vec<AllowedPost>,
    ) -> Result<u64, Error> {
        let request = DeployRequest {
            name,
            symbol,
            metadata_uri,
            config,
            terminals,
            buyback,
        };
        CroptopExtension::new(BasicDeployer::new(&env)).deploy(&request, &allowed_posts)
    }

    /// Deploy a revnet whose premint vests to the boost operator.
    ///
    /// Fails with no state created unless `vesting` holds exactly one preset
    /// and one actual for the boost operator.
    #[allow(clippy::too_many_arguments)]
    pub fn deploy_with_vesting(
        env: Env,
        name: String,
        symbol: String,
        metadata_uri: String,
        config: RevnetConfig,
        terminals: Vec<TerminalConfig>,
        buyback: BuybackHookConfig,
        vesting: VestingOptions,
    ) -> Result<u64, Error> {
        let request = DeployRequest {
            name,
            symbol,
            metadata_uri,
            config,
            terminals,
            buyback,
        };
        VestingExtension::new(BasicDeployer::new(&env)).deploy(&request, &vesting)
    }

    // ─────────────────────────────────────────────────────────
    // Data hook
    // ─────────────────────────────────────────────────────────

    /// Called by the ledger before recording a payment.
    pub fn on_payment_context(env: Env, context: PayContext) -> HookResponse {
        pay_hooks::compose(&env, &context)
    }

    /// Called by the ledger before recording a redemption. Always `(0, [])`.
    pub fn on_redemption_context(env: Env, _context: RedeemContext) -> HookResponse {
        pay_hooks::redemption_response(&env)
    }

    pub fn has_mint_permission_for(env: Env, project_id: u64, address: Address) -> bool {
        pay_hooks::has_mint_permission_for(&env, project_id, &address)
    }

    pub fn supports_interface(env: Env, interface_id: Symbol) -> bool {
        interface_id == Symbol::new(&env, DATA_HOOK_INTERFACE)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn pay_hook_specifications_of(env: Env, project_id: u64) -> Vec<HookSpecification> {
        pay_hooks::pay_hook_specifications_of(&env, project_id)
    }

    pub fn buyback_hook_of(env: Env, project_id: u64) -> Option<Address> {
        storage::get_buyback_hook(&env, project_id)
    }

    pub fn revnet_of(env: Env, project_id: u64) -> Option<RevnetRecord> {
        storage::load_revnet(&env, project_id)
    }

    pub fn vesting_of(env: Env, project_id: u64) -> Option<VestingRecord> {
        storage::load_vesting(&env, project_id)
    }

    pub fn collaborators(env: Env) -> Collaborators {
        storage::get_collaborators(&env)
    }
}

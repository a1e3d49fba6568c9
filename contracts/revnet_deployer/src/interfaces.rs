//! # Interfaces
//!
//! Typed clients for every contract the deployer calls, plus the data hook
//! interface the deployer itself implements for the ledger.
//!
//! Each trait is only a calling convention: `#[contractclient]` generates a
//! `*Client` that performs the cross-contract call. A collaborator that
//! rejects a call aborts the whole transaction, so nothing here returns
//! `Result`.

use soroban_sdk::{contractclient, Address, Env, String, Symbol, Vec};

use crate::types::{
    AllowedPost, BuybackPoolConfig, HookResponse, PayContext, RedeemContext, RulesetConfig,
    SplitGroup, TerminalConfig, VestingActual, VestingPreset,
};

/// Interface id answered by [`DataHookInterface::supports_interface`].
pub const DATA_HOOK_INTERFACE: &str = "data_hook";

/// The ledger platform's project controller.
#[contractclient(name = "ControllerClient")]
pub trait ControllerInterface {
    /// Create a project owned by `owner` and queue its rulesets.
    fn launch_project_for(
        env: Env,
        owner: Address,
        project_uri: String,
        rulesets: Vec<RulesetConfig>,
        terminals: Vec<TerminalConfig>,
        memo: String,
    ) -> u64;

    /// Issue the project's fungible token. Returns the token address.
    fn deploy_token_for(env: Env, project_id: u64, name: String, symbol: String) -> Address;

    fn set_splits_of(env: Env, project_id: u64, ruleset_id: u64, groups: Vec<SplitGroup>);

    fn mint_tokens_of(
        env: Env,
        project_id: u64,
        amount: i128,
        beneficiary: Address,
        memo: String,
        use_reserved_rate: bool,
    ) -> i128;
}

/// The ledger platform's permission registry.
///
/// `account` is the address on whose behalf `operator` acts; for every grant
/// issued here that is the deployer, which owns each revnet it creates.
#[contractclient(name = "PermissionsClient")]
pub trait PermissionsInterface {
    fn grant(
        env: Env,
        account: Address,
        operator: Address,
        project_id: u64,
        permission_ids: Vec<u32>,
    );

    fn has_permissions(
        env: Env,
        operator: Address,
        account: Address,
        project_id: u64,
        permission_ids: Vec<u32>,
    ) -> bool;
}

/// Market-priced issuance hook.
#[contractclient(name = "BuybackHookClient")]
pub trait BuybackHookInterface {
    /// Returns a weight and zero or one specification for itself.
    fn on_payment_context(env: Env, context: PayContext) -> HookResponse;

    fn set_pool_for(env: Env, owner: Address, project_id: u64, pool: BuybackPoolConfig);
}

/// Tiered-collectible publishing proxy.
#[contractclient(name = "PublisherClient")]
pub trait PublisherInterface {
    fn register_allowed_posts(env: Env, owner: Address, project_id: u64, posts: Vec<AllowedPost>);
}

/// Creates vesting instances owned by `owner`.
#[contractclient(name = "VestingFactoryClient")]
pub trait VestingFactoryInterface {
    fn create_instance(
        env: Env,
        owner: Address,
        token: Address,
        label: String,
        revocable: bool,
    ) -> Address;
}

/// A vesting instance ("unlocker").
#[contractclient(name = "UnlockerClient")]
pub trait UnlockerInterface {
    fn seed_presets(env: Env, presets: Vec<VestingPreset>);

    fn seed_actuals(env: Env, actuals: Vec<VestingActual>);

    fn transfer_ownership(env: Env, new_owner: Address);

    fn owner(env: Env) -> Address;
}

/// What the ledger calls on whichever contract a ruleset names as data hook.
#[contractclient(name = "DataHookClient")]
pub trait DataHookInterface {
    fn on_payment_context(env: Env, context: PayContext) -> HookResponse;

    fn on_redemption_context(env: Env, context: RedeemContext) -> HookResponse;

    fn has_mint_permission_for(env: Env, project_id: u64, address: Address) -> bool;

    fn supports_interface(env: Env, interface_id: Symbol) -> bool;
}

//! # Types
//!
//! Shared data structures used across all modules of the revnet deployer.
//!
//! ## Groups
//!
//! - **Deployment input**: [`RevnetConfig`], [`StageConfig`], [`TerminalConfig`],
//!   [`BuybackHookConfig`], [`AllowedPost`], [`VestingOptions`].
//! - **Ledger-facing**: [`RulesetConfig`], [`RulesetMetadata`], [`SplitGroup`].
//!   These are what the controller stores; the deployer only produces them.
//! - **Payment callbacks**: [`PayContext`], [`RedeemContext`], [`HookResponse`],
//!   [`HookSpecification`].
//! - **Deployer records**: [`RevnetRecord`], [`VestingRecord`], [`Collaborators`].
//!
//! ### Vesting as a Finite-State Machine
//!
//! [`VestingStatus`] follows the deployment steps in order:
//!
//! ```text
//! Uninitialized ──► Seeded ──► OwnershipTransferred
//! ```
//!
//! The last step is confirmed by reading the instance owner back, so a stored
//! record is always `OwnershipTransferred`.

use soroban_sdk::{contracttype, Address, Bytes, String, Vec};

/// Basis-point denominator used for boost rate and floor tax intensity.
pub const MAX_RATE_BPS: u32 = 10_000;

/// Precision of the ledger's per-ruleset decay rate (100%).
pub const MAX_DECAY_RATE: u32 = 1_000_000_000;

/// Precision of a split's percentage (100%).
pub const SPLITS_TOTAL_PERCENT: u32 = 1_000_000_000;

/// Split group id the ledger uses for reserved (boost) tokens.
pub const RESERVED_TOKEN_GROUP: u32 = 1;

/// Ruleset id meaning "default for every ruleset of the project".
pub const DEFAULT_RULESET_ID: u64 = 0;

// ── Deployment input ────────────────────────────────────────────────

/// One stage of a revnet's issuance schedule.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StageConfig {
    /// Earliest ledger timestamp at which the stage may begin.
    pub starts_at_or_after: u64,
    /// Share of issued tokens routed to the boost operator, in basis points.
    pub split_rate: u32,
    /// Tokens issued per unit of base currency when the stage starts.
    pub initial_issuance_rate: i128,
    /// Seconds between price ceiling increases (the ruleset duration).
    pub ceiling_increase_frequency: u64,
    /// Issuance decay applied every period, out of [`MAX_DECAY_RATE`].
    pub ceiling_increase_percentage: u32,
    /// Redemption tax, in basis points.
    pub floor_tax_intensity: u32,
}

/// Issuance configuration of a revnet.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevnetConfig {
    pub base_currency: u32,
    pub initial_boost_operator: Address,
    pub premint_token_amount: i128,
    pub stages: Vec<StageConfig>,
}

/// A payment terminal and the tokens it accepts for the project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TerminalConfig {
    pub terminal: Address,
    pub accepted_tokens: Vec<Address>,
}

/// A market pool the buyback hook should price against.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuybackPoolConfig {
    pub token: Address,
    pub fee: u32,
    pub twap_window: u32,
    pub twap_slippage_tolerance: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuybackHookConfig {
    pub hook: Address,
    pub pools: Vec<BuybackPoolConfig>,
}

/// Criteria under which anyone may publish a collectible to the project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowedPost {
    pub category: u32,
    pub minimum_price: i128,
    pub minimum_total_supply: u32,
    pub maximum_total_supply: u32,
    /// Empty means any address may post.
    pub allowed_addresses: Vec<Address>,
}

/// Release curve shared by allocations referencing it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingPreset {
    pub id: u32,
    pub cliff: u64,
    pub duration: u64,
    pub period: u64,
}

/// A recipient's allocation under a preset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingActual {
    pub recipient: Address,
    pub preset_id: u32,
    pub amount: i128,
    pub start: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingOptions {
    pub label: String,
    pub revocable: bool,
    pub presets: Vec<VestingPreset>,
    pub actuals: Vec<VestingActual>,
}

// ── Ledger-facing ───────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RulesetMetadata {
    pub reserved_rate: u32,
    pub redemption_rate: u32,
    pub base_currency: u32,
    pub allow_owner_minting: bool,
    pub use_data_hook_for_pay: bool,
    pub use_data_hook_for_redeem: bool,
    pub data_hook: Address,
    pub metadata: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RulesetConfig {
    pub must_start_at_or_after: u64,
    pub duration: u64,
    pub weight: i128,
    pub decay_rate: u32,
    pub metadata: RulesetMetadata,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Split {
    pub beneficiary: Address,
    pub percent: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SplitGroup {
    pub group_id: u32,
    pub splits: Vec<Split>,
}

// ── Payment callbacks ───────────────────────────────────────────────

/// One unit of payment-time delegation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HookSpecification {
    pub hook: Address,
    /// Amount of the payment forwarded to the hook.
    pub amount: i128,
    pub metadata: Bytes,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenAmount {
    pub token: Address,
    pub value: i128,
    pub decimals: u32,
    pub currency: u32,
}

/// What the ledger knows about a payment before recording it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayContext {
    pub terminal: Address,
    pub payer: Address,
    pub amount: TokenAmount,
    pub project_id: u64,
    pub ruleset_id: u64,
    pub beneficiary: Address,
    pub weight: i128,
    pub reserved_rate: u32,
    pub metadata: Bytes,
}

/// What the ledger knows about a redemption before recording it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemContext {
    pub terminal: Address,
    pub holder: Address,
    pub project_id: u64,
    pub ruleset_id: u64,
    pub redeem_count: i128,
    pub total_supply: i128,
    pub surplus: TokenAmount,
    pub redemption_rate: u32,
    pub metadata: Bytes,
}

/// Data hook answer: the weight to issue at and the hooks to invoke, in order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HookResponse {
    pub weight: i128,
    pub specifications: Vec<HookSpecification>,
}

// ── Deployer records ────────────────────────────────────────────────

/// Which deployer entry point created a revnet.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    Basic,
    PayHooks,
    Croptop,
    Vesting,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevnetRecord {
    pub project_id: u64,
    pub variant: Variant,
    pub operator: Address,
    pub token: Address,
    pub data_hook: Address,
}

/// Lifecycle of a project's vesting instance.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VestingStatus {
    /// Instance created, nothing recorded yet.
    Uninitialized,
    /// Preset and actual recorded.
    Seeded,
    /// Instance owned by the boost operator.
    OwnershipTransferred,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingRecord {
    pub instance: Address,
    pub recipient: Address,
    pub amount: i128,
    pub status: VestingStatus,
}

/// External contracts the deployer talks to, fixed at construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collaborators {
    pub controller: Address,
    pub permissions: Address,
    pub publisher: Address,
    pub vesting_factory: Address,
}

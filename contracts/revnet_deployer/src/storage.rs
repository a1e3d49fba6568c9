//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the deployer.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type            | Description                           |
//! |------------------|-----------------|---------------------------------------|
//! | `Collaborators`  | `Collaborators` | Controller, registry, proxy, factory  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                | Type                      | Description                     |
//! |--------------------|---------------------------|---------------------------------|
//! | `Revnet(id)`       | `RevnetRecord`            | Variant, operator, token        |
//! | `PayHooks(id)`     | `Vec<HookSpecification>`  | Registered pay hooks, in order  |
//! | `BuybackHook(id)`  | `Address`                 | Buyback hook binding            |
//! | `Vesting(id)`      | `VestingRecord`           | Vesting instance and its status |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Pay hook entries are read on every payment, so they are bumped on reads as
//! well as writes.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Collaborators, HookSpecification, RevnetRecord, VestingRecord};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Collaborator addresses (Instance).
    Collaborators,
    /// Deployment record keyed by project ID (Persistent).
    Revnet(u64),
    /// Ordered pay hook list keyed by project ID (Persistent).
    PayHooks(u64),
    /// Buyback hook binding keyed by project ID (Persistent).
    BuybackHook(u64),
    /// Vesting record keyed by project ID (Persistent).
    Vesting(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn set_collaborators(env: &Env, collaborators: &Collaborators) {
    env.storage()
        .instance()
        .set(&DataKey::Collaborators, collaborators);
    bump_instance(env);
}

/// Panics if the contract was registered without constructor arguments.
pub fn get_collaborators(env: &Env) -> Collaborators {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Collaborators)
        .expect("collaborators not set")
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn save_revnet(env: &Env, record: &RevnetRecord) {
    let key = DataKey::Revnet(record.project_id);
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn load_revnet(env: &Env, project_id: u64) -> Option<RevnetRecord> {
    let key = DataKey::Revnet(project_id);
    let record: Option<RevnetRecord> = env.storage().persistent().get(&key);
    if record.is_some() {
        bump_persistent(env, &key);
    }
    record
}

/// Load the stored pay hooks of a project, empty when none were registered.
pub fn load_pay_hooks(env: &Env, project_id: u64) -> Vec<HookSpecification> {
    let key = DataKey::PayHooks(project_id);
    match env.storage().persistent().get(&key) {
        Some(hooks) => {
            bump_persistent(env, &key);
            hooks
        }
        None => Vec::new(env),
    }
}

pub fn save_pay_hooks(env: &Env, project_id: u64, hooks: &Vec<HookSpecification>) {
    let key = DataKey::PayHooks(project_id);
    env.storage().persistent().set(&key, hooks);
    bump_persistent(env, &key);
}

pub fn set_buyback_hook(env: &Env, project_id: u64, hook: &Address) {
    let key = DataKey::BuybackHook(project_id);
    env.storage().persistent().set(&key, hook);
    bump_persistent(env, &key);
}

pub fn get_buyback_hook(env: &Env, project_id: u64) -> Option<Address> {
    let key = DataKey::BuybackHook(project_id);
    let hook: Option<Address> = env.storage().persistent().get(&key);
    if hook.is_some() {
        bump_persistent(env, &key);
    }
    hook
}

pub fn save_vesting(env: &Env, project_id: u64, record: &VestingRecord) {
    let key = DataKey::Vesting(project_id);
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn load_vesting(env: &Env, project_id: u64) -> Option<VestingRecord> {
    let key = DataKey::Vesting(project_id);
    let record: Option<VestingRecord> = env.storage().persistent().get(&key);
    if record.is_some() {
        bump_persistent(env, &key);
    }
    record
}

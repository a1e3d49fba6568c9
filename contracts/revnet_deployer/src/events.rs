//! # Events
//!
//! Every state-changing step of a deployment publishes one event so that
//! off-chain consumers (see `backend/indexer`) can rebuild what happened.
//!
//! | Topic                      | Data                  |
//! |----------------------------|-----------------------|
//! | `("deployed", project_id)` | [`RevnetDeployed`]    |
//! | `("pay_hooks", project_id)`| [`PayHooksRegistered`]|
//! | `("perm_set", scope_id)`   | [`PermissionSet`]     |
//! | `("posts", project_id)`    | [`PostsAllowed`]      |
//! | `("vesting", project_id)`  | [`VestingConfigured`] |

use soroban_sdk::{contracttype, symbol_short, Address, Env, Vec};

use crate::types::{RevnetRecord, Variant, VestingRecord, VestingStatus};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevnetDeployed {
    pub project_id: u64,
    pub variant: Variant,
    pub operator: Address,
    pub token: Address,
    pub data_hook: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayHooksRegistered {
    pub project_id: u64,
    pub hook_count: u32,
    pub buyback_hook: Address,
}

/// `written` is false when a guarded grant found the permissions already held.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermissionSet {
    pub operator: Address,
    pub scope_id: u64,
    pub permission_ids: Vec<u32>,
    pub written: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostsAllowed {
    pub project_id: u64,
    pub publisher: Address,
    pub post_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingConfigured {
    pub project_id: u64,
    pub instance: Address,
    pub recipient: Address,
    pub amount: i128,
    pub status: VestingStatus,
}

pub fn emit_revnet_deployed(env: &Env, record: &RevnetRecord) {
    env.events().publish(
        (symbol_short!("deployed"), record.project_id),
        RevnetDeployed {
            project_id: record.project_id,
            variant: record.variant,
            operator: record.operator.clone(),
            token: record.token.clone(),
            data_hook: record.data_hook.clone(),
        },
    );
}

pub fn emit_pay_hooks_registered(env: &Env, project_id: u64, hook_count: u32, buyback_hook: Address) {
    env.events().publish(
        (symbol_short!("pay_hooks"), project_id),
        PayHooksRegistered {
            project_id,
            hook_count,
            buyback_hook,
        },
    );
}

pub fn emit_permission_set(
    env: &Env,
    operator: Address,
    scope_id: u64,
    permission_ids: Vec<u32>,
    written: bool,
) {
    env.events().publish(
        (symbol_short!("perm_set"), scope_id),
        PermissionSet {
            operator,
            scope_id,
            permission_ids,
            written,
        },
    );
}

pub fn emit_posts_allowed(env: &Env, project_id: u64, publisher: Address, post_count: u32) {
    env.events().publish(
        (symbol_short!("posts"), project_id),
        PostsAllowed {
            project_id,
            publisher,
            post_count,
        },
    );
}

pub fn emit_vesting_configured(env: &Env, project_id: u64, record: &VestingRecord) {
    env.events().publish(
        (symbol_short!("vesting"), project_id),
        VestingConfigured {
            project_id,
            instance: record.instance.clone(),
            recipient: record.recipient.clone(),
            amount: record.amount,
            status: record.status,
        },
    );
}

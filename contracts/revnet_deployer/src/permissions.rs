//! # Permission delegation
//!
//! The deployer owns every revnet it creates, so anything an operator, hook or
//! proxy may do on a revnet's behalf goes through a grant the deployer writes
//! to the ledger's permission registry.
//!
//! Capabilities are named [`Permission`] tags; [`Permission::id`] is the only
//! place that knows the registry's numeric encoding.
//!
//! Two write paths exist:
//!
//! - [`PermissionDelegator::grant`] always writes.
//! - [`PermissionDelegator::grant_if_missing`] asks `has_permissions` first and
//!   writes only when the operator lacks part of the set. Used wherever the
//!   same operator can be granted again (a shared hook reused across revnets).
//!
//! Registry failures abort the transaction as-is.

use soroban_sdk::{Address, Env, Vec};

use crate::events;
use crate::interfaces::PermissionsClient;

/// Scope id meaning "every project of the granting account".
pub const PLATFORM_WIDE: u64 = 0;

/// Owner-restricted ledger operations that can be delegated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Permission {
    /// Mint project tokens outside of payments.
    MintTokens,
    /// Replace the project's split groups.
    SetSplitGroups,
    /// Add or remove collectible tiers.
    AdjustTiers,
}

impl Permission {
    pub const fn id(self) -> u32 {
        match self {
            Permission::MintTokens => 10,
            Permission::SetSplitGroups => 18,
            Permission::AdjustTiers => 21,
        }
    }
}

/// Encode a set of permissions for the registry, preserving order.
pub fn ids_of(env: &Env, permissions: &[Permission]) -> Vec<u32> {
    let mut ids = Vec::new(env);
    for permission in permissions {
        ids.push_back(permission.id());
    }
    ids
}

pub struct PermissionDelegator<'a> {
    env: &'a Env,
    registry: PermissionsClient<'a>,
}

impl<'a> PermissionDelegator<'a> {
    pub fn new(env: &'a Env, registry: &Address) -> Self {
        Self {
            env,
            registry: PermissionsClient::new(env, registry),
        }
    }

    /// Whether `operator` already holds every permission in the set.
    pub fn has_permissions(
        &self,
        operator: &Address,
        project_id: u64,
        permissions: &[Permission],
    ) -> bool {
        self.registry.has_permissions(
            operator,
            &self.env.current_contract_address(),
            &project_id,
            &ids_of(self.env, permissions),
        )
    }

    /// Unconditionally record the grant.
    pub fn grant(&self, operator: &Address, project_id: u64, permissions: &[Permission]) {
        let ids = ids_of(self.env, permissions);
        self.registry.grant(
            &self.env.current_contract_address(),
            operator,
            &project_id,
            &ids,
        );
        events::emit_permission_set(self.env, operator.clone(), project_id, ids, true);
    }

    /// Record the grant unless `operator` already holds the whole set.
    /// Returns whether a registry write happened.
    pub fn grant_if_missing(
        &self,
        operator: &Address,
        project_id: u64,
        permissions: &[Permission],
    ) -> bool {
        if self.has_permissions(operator, project_id, permissions) {
            events::emit_permission_set(
                self.env,
                operator.clone(),
                project_id,
                ids_of(self.env, permissions),
                false,
            );
            return false;
        }
        self.grant(operator, project_id, permissions);
        true
    }
}

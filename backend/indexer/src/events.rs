//! Event kinds published by the revnet deployer contract.
//!
//! Mirrors `contracts/revnet_deployer/src/events.rs`; the leading topic symbol
//! selects the kind and the second topic carries the project (or scope) id.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A revnet was launched through one of the deployer variants (`deployed`).
    RevnetDeployed,
    /// Pay hooks and a buyback binding were stored for a project (`pay_hooks`).
    PayHooksRegistered,
    /// A permission grant was requested (`perm_set`). The scope is `0` for
    /// platform-wide grants.
    PermissionSet,
    /// Allowed posts were registered with the publishing proxy (`posts`).
    PostsAllowed,
    /// A vesting instance was seeded and handed to the operator (`vesting`).
    VestingConfigured,
    Unknown,
}

impl EventKind {
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "deployed" => Self::RevnetDeployed,
            "pay_hooks" => Self::PayHooksRegistered,
            "perm_set" => Self::PermissionSet,
            "posts" => Self::PostsAllowed,
            "vesting" => Self::VestingConfigured,
            _ => Self::Unknown,
        }
    }

    /// Identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RevnetDeployed => "revnet_deployed",
            Self::PayHooksRegistered => "pay_hooks_registered",
            Self::PermissionSet => "permission_set",
            Self::PostsAllowed => "posts_allowed",
            Self::VestingConfigured => "vesting_configured",
            Self::Unknown => "unknown",
        }
    }
}

/// A decoded deployer event, ready to be stored.
///
/// `actor` is the address the event is about (operator, grantee, publisher or
/// vesting recipient). `amount` holds the numeric payload (hook count, post
/// count or vested amount) as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevnetEvent {
    /// The RPC's event id, unique across ledger history.
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub variant: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub variant: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

/// One row of `GET /revnets`: the deployment event of a project.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RevnetSummary {
    pub project_id: String,
    pub operator: Option<String>,
    pub variant: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
}

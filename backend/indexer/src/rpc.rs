//! Soroban JSON-RPC polling (`getEvents`) and decoding of deployer events.
//!
//! Network failures, HTTP 429 and non-fatal JSON-RPC errors are retried with
//! exponential back-off capped at [`MAX_BACKOFF_SECS`]. Malformed requests
//! (`-32600`, `-32601`, `-32602`) are returned to the caller.
//!
//! Events are requested with `xdrFormat: "json"`, so topics and values arrive
//! as JSON-encoded `ScVal`s instead of base64 XDR.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, RevnetEvent};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;
const HARD_ERROR_CODES: [i64; 3] = [-32600, -32601, -32602];

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

/// One event as returned by `getEvents` with `xdrFormat: "json"`.
///
/// Topics and value arrive as JSON-encoded `ScVal`s, e.g. `{"symbol":"deployed"}`,
/// `{"u64":"7"}` or `{"map":[{"key":{"symbol":"operator"},"val":{"address":"G.."}}]}`.
/// The base64 `topic`/`value` fields are ignored.
#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Unique per event across the ledger history.
    pub id: String,
    #[serde(rename = "topicJson", default)]
    pub topic_json: Vec<Value>,
    #[serde(rename = "valueJson", default)]
    pub value_json: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
}

/// One page of `getEvents` output.
#[derive(Debug)]
pub struct EventPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

/// Fetch one page of deployer events, starting at `start_ledger` or resuming
/// from `cursor` when one is given.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventPage> {
    let mut backoff = INITIAL_BACKOFF_SECS;
    let params = build_params(contract_id, start_ledger, cursor, limit);

    loop {
        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        let resp = match response {
            Ok(resp) => resp,
            Err(e) => {
                warn!("getEvents request failed, retrying in {backoff}s: {e}");
                backoff = sleep_and_grow(backoff).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC, retrying in {backoff}s");
            backoff = sleep_and_grow(backoff).await;
            continue;
        }

        let body: RpcResponse = resp.json().await?;

        if let Some(err) = body.error {
            if HARD_ERROR_CODES.contains(&err.code) {
                return Err(IndexerError::Rpc {
                    code: err.code,
                    message: err.message,
                });
            }
            warn!(
                code = err.code,
                "RPC error, retrying in {backoff}s: {}", err.message
            );
            backoff = sleep_and_grow(backoff).await;
            continue;
        }

        let result = body
            .result
            .ok_or_else(|| IndexerError::EventParse("Empty result from getEvents".to_string()))?;

        debug!(
            count = result.events.len(),
            latest_ledger = ?result.latest_ledger,
            "Fetched events"
        );

        return Ok(EventPage {
            events: result.events,
            cursor: result.cursor,
            latest_ledger: result.latest_ledger,
        });
    }
}

async fn sleep_and_grow(backoff: u64) -> u64 {
    tokio::time::sleep(Duration::from_secs(backoff)).await;
    next_backoff(backoff)
}

fn next_backoff(backoff: u64) -> u64 {
    (backoff * 2).min(MAX_BACKOFF_SECS)
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        },
        "xdrFormat": "json"
    });

    // The RPC rejects requests that carry both a cursor and a start ledger.
    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

/// Decode raw events, dropping those from failed invocations and those
/// without JSON topics.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<RevnetEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call != Some(false))
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<RevnetEvent> {
    let Some(first_topic) = raw.topic_json.first() else {
        debug!(id = %raw.id, "Skipping event without JSON topics");
        return None;
    };
    let kind = scval_scalar(first_topic)
        .map(|symbol| EventKind::from_topic(&symbol))
        .unwrap_or(EventKind::Unknown);

    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let project_id = raw.topic_json.get(1).and_then(scval_scalar);
    let data = decode_data(&raw.value_json, kind);

    Some(RevnetEvent {
        event_id: raw.id.clone(),
        event_type: kind.as_str().to_string(),
        project_id,
        actor: data.actor,
        amount: data.amount,
        variant: data.variant,
        ledger: raw.ledger.unwrap_or(0) as i64,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

#[derive(Debug, Default, PartialEq)]
struct EventData {
    actor: Option<String>,
    amount: Option<String>,
    variant: Option<String>,
}

/// Pick the indexed columns out of an event's `ScVal` map.
fn decode_data(value: &Value, kind: EventKind) -> EventData {
    match kind {
        EventKind::RevnetDeployed => EventData {
            actor: map_scalar(value, "operator"),
            amount: None,
            variant: map_entry(value, "variant").and_then(enum_variant),
        },
        EventKind::PayHooksRegistered => EventData {
            actor: map_scalar(value, "buyback_hook"),
            amount: map_scalar(value, "hook_count"),
            variant: None,
        },
        EventKind::PermissionSet => EventData {
            actor: map_scalar(value, "operator"),
            amount: None,
            variant: None,
        },
        EventKind::PostsAllowed => EventData {
            actor: map_scalar(value, "publisher"),
            amount: map_scalar(value, "post_count"),
            variant: None,
        },
        EventKind::VestingConfigured => EventData {
            actor: map_scalar(value, "recipient"),
            amount: map_scalar(value, "amount"),
            variant: None,
        },
        EventKind::Unknown => EventData::default(),
    }
}

/// The payload of a single-key scalar `ScVal`. 64- and 128-bit integers are
/// strings in the JSON form, smaller ones are numbers.
fn scval_scalar(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    match map.values().next()? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Value stored under the symbol `key` of a `{"map":[..]}` `ScVal`.
fn map_entry<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value
        .get("map")?
        .as_array()?
        .iter()
        .find(|entry| {
            entry
                .get("key")
                .and_then(|k| k.get("symbol"))
                .and_then(Value::as_str)
                == Some(key)
        })
        .and_then(|entry| entry.get("val"))
}

fn map_scalar(value: &Value, key: &str) -> Option<String> {
    map_entry(value, key).and_then(scval_scalar)
}

/// Unit enum variants are encoded as a one-element vector holding the variant
/// symbol: `{"vec":[{"symbol":"PayHooks"}]}`.
fn enum_variant(value: &Value) -> Option<String> {
    value
        .get("vec")?
        .as_array()?
        .first()
        .and_then(scval_scalar)
}

fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

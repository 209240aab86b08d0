//! JSON-RPC read gateway for the provenance ledger.
//!
//! Issues JSON-RPC 2.0 requests over HTTP, one per ledger read, with the
//! ledger operation name as the method:
//!
//! ```text
//! POST {gateway_url}
//! {"jsonrpc":"2.0","id":7,"method":"getItemBasic","params":[3]}
//! ```
//!
//! Signing is the wallet's job, so this adapter only implements
//! [`LedgerReader`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::foundation::{Address, ItemId, Timestamp};
use crate::domain::ledger::{HistoryEntry, ItemRecord, ItemStatus, LedgerError};
use crate::ports::LedgerReader;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireItem {
    item_id: u64,
    name: String,
    auth_hash: String,
    manufacturer: Address,
    current_owner: Address,
    status: u8,
}

impl From<WireItem> for ItemRecord {
    fn from(wire: WireItem) -> Self {
        ItemRecord {
            item_id: wire.item_id,
            name: wire.name,
            authenticity_hash: wire.auth_hash,
            manufacturer: wire.manufacturer,
            current_owner: wire.current_owner,
            status: ItemStatus::from_code(wire.status),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireHistoryEntry {
    action: String,
    role: String,
    participant_address: Address,
    note: String,
    timestamp: u64,
}

impl From<WireHistoryEntry> for HistoryEntry {
    fn from(wire: WireHistoryEntry) -> Self {
        HistoryEntry {
            action: wire.action,
            role: wire.role,
            participant_address: wire.participant_address,
            note: wire.note,
            timestamp: Timestamp::from_unix_secs(wire.timestamp),
        }
    }
}

/// Ledger reader backed by an HTTP JSON-RPC gateway.
pub struct RpcGatewayLedger {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcGatewayLedger {
    /// Creates a reader for `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::RemoteReadError(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, LedgerError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            method,
            params,
        };
        tracing::debug!(method, id = request.id, "Ledger gateway request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(method, "Ledger gateway unreachable: {}", e);
                LedgerError::RemoteReadError(format!("{} request failed: {}", method, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(method, %status, "Ledger gateway returned error status");
            return Err(LedgerError::RemoteReadError(format!(
                "{} returned HTTP {}",
                method, status
            )));
        }

        let body: RpcResponse = response.json().await.map_err(|e| {
            LedgerError::RemoteReadError(format!("{} returned malformed JSON: {}", method, e))
        })?;

        decode_result(method, body)
    }
}

fn decode_result<T: DeserializeOwned>(method: &str, response: RpcResponse) -> Result<T, LedgerError> {
    if let Some(error) = response.error {
        return Err(LedgerError::RemoteReadError(format!(
            "{} failed ({}): {}",
            method, error.code, error.message
        )));
    }
    let result = response.result.ok_or_else(|| {
        LedgerError::RemoteReadError(format!("{} returned neither result nor error", method))
    })?;
    serde_json::from_value(result).map_err(|e| {
        LedgerError::RemoteReadError(format!("{} returned an unexpected shape: {}", method, e))
    })
}

#[async_trait]
impl LedgerReader for RpcGatewayLedger {
    async fn verify_authenticity(
        &self,
        item_id: ItemId,
        candidate_hash: &str,
    ) -> Result<bool, LedgerError> {
        self.call("verifyAuthenticity", json!([item_id.value(), candidate_hash]))
            .await
    }

    async fn get_item_basic(&self, item_id: ItemId) -> Result<ItemRecord, LedgerError> {
        let wire: WireItem = self.call("getItemBasic", json!([item_id.value()])).await?;
        Ok(wire.into())
    }

    async fn get_item_history_count(&self, item_id: ItemId) -> Result<u64, LedgerError> {
        self.call("getItemHistoryCount", json!([item_id.value()])).await
    }

    async fn get_item_history_entry(
        &self,
        item_id: ItemId,
        index: u64,
    ) -> Result<HistoryEntry, LedgerError> {
        let wire: WireHistoryEntry = self
            .call("getItemHistoryEntry", json!([item_id.value(), index]))
            .await?;
        Ok(wire.into())
    }
}

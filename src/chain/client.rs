// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sui full node JSON-RPC client.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use sui_sdk_types::{Digest, Input, ObjectReference};

use super::inspect::encode_move_call_kind;
use super::types::*;
use super::{ChainError, ChainGateway};
use crate::wallet::SuiKeypair;

/// Per-request timeout for node calls.
const RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Sui JSON-RPC client.
pub struct SuiClient {
    /// Network configuration
    network: NetworkConfig,
    /// JSON-RPC endpoint (may override the network default)
    rpc_url: url::Url,
    /// Gas budget in MIST for every executed transaction
    gas_budget: u64,
    http: Client,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveCallBytes {
    tx_bytes: String,
}

#[derive(Debug, Deserialize)]
struct ObjectResponse {
    data: Option<ObjectData>,
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ObjectData {
    version: Value,
    digest: String,
    owner: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DevInspectResponse {
    effects: Option<RawEffects>,
    #[serde(default)]
    results: Vec<DevInspectCommandResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DevInspectCommandResult {
    /// `[bytes, type]` pairs
    #[serde(default)]
    return_values: Vec<(Vec<u8>, String)>,
}

impl SuiClient {
    /// Create a new client for `network`, optionally overriding its RPC URL.
    pub fn new(
        network: NetworkConfig,
        rpc_url: Option<&str>,
        gas_budget: u64,
    ) -> Result<Self, ChainError> {
        let rpc_url: url::Url = rpc_url
            .unwrap_or(network.rpc_url)
            .parse()
            .map_err(|e: url::ParseError| ChainError::InvalidRpcUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()
            .map_err(|e| ChainError::RpcError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            network,
            rpc_url,
            gas_budget,
            http,
            next_id: AtomicU64::new(1),
        })
    }

    /// Create a client for Sui testnet.
    pub fn testnet(gas_budget: u64) -> Result<Self, ChainError> {
        Self::new(SUI_TESTNET, None, gas_budget)
    }

    pub fn rpc_url(&self) -> &url::Url {
        &self.rpc_url
    }

    /// Issue one JSON-RPC request and decode its `result`.
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        debug!(method, id, "Sending JSON-RPC request");

        let response = self
            .http
            .post(self.rpc_url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChainError::RpcError(format!("{method}: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ChainError::RpcError(format!("{method}: {e}")))?;

        let envelope: RpcEnvelope<T> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                let text = String::from_utf8_lossy(&body);
                warn!(method, %status, body = %text, "JSON-RPC endpoint returned an HTTP error");
                return Err(ChainError::RpcError(format!("HTTP {status}: {}", text.trim())));
            }
            Err(e) => {
                return Err(ChainError::InvalidResponse(format!("{method}: {e}")));
            }
        };

        if let Some(error) = envelope.error {
            warn!(method, code = error.code, error = %error.message, "JSON-RPC call failed");
            return Err(ChainError::RpcError(error.message));
        }

        envelope.result.ok_or_else(|| {
            ChainError::InvalidResponse(format!("{method} returned neither result nor error"))
        })
    }

    /// Look up how an object must be passed as a transaction input.
    async fn resolve_object(&self, id: ObjectId) -> Result<Input, ChainError> {
        let response: ObjectResponse = self
            .call(
                "sui_getObject",
                json!([id.to_string(), { "showOwner": true }]),
            )
            .await?;

        let Some(data) = response.data else {
            let reason = response
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no data".to_string());
            return Err(ChainError::ObjectNotFound(format!("{id}: {reason}")));
        };

        let owner = data.owner.unwrap_or(Value::Null);
        if let Some(initial) = owner.pointer("/Shared/initial_shared_version") {
            return Ok(Input::Shared {
                object_id: id.into(),
                initial_shared_version: parse_u64(initial, "initial_shared_version")?,
                mutable: true,
            });
        }

        let digest = bs58::decode(&data.digest)
            .into_vec()
            .map_err(|e| ChainError::InvalidResponse(format!("object {id} digest: {e}")))?;
        let digest: [u8; Digest::LENGTH] = digest.try_into().map_err(|_| {
            ChainError::InvalidResponse(format!("object {id} digest is not 32 bytes"))
        })?;

        Ok(Input::ImmutableOrOwned(ObjectReference::new(
            id.into(),
            parse_u64(&data.version, "version")?,
            Digest::new(digest),
        )))
    }
}

#[async_trait]
impl ChainGateway for SuiClient {
    fn network(&self) -> &NetworkConfig {
        &self.network
    }

    async fn execute_move_call(
        &self,
        signer: &SuiKeypair,
        call: &MoveCall,
    ) -> Result<TransactionOutcome, ChainError> {
        let sender = signer.address();
        let arguments: Vec<Value> = call.arguments.iter().map(MoveArg::to_json).collect();

        let built: MoveCallBytes = self
            .call(
                "unsafe_moveCall",
                json!([
                    sender.to_string(),
                    call.package.to_string(),
                    call.module,
                    call.function,
                    [],
                    arguments,
                    null,
                    self.gas_budget.to_string(),
                ]),
            )
            .await?;

        let tx_bytes = Base64::decode_vec(&built.tx_bytes)
            .map_err(|e| ChainError::InvalidResponse(format!("txBytes: {e}")))?;
        let signature = signer
            .sign_transaction(&tx_bytes)
            .map_err(|e| ChainError::InvalidResponse(format!("txBytes: {e}")))?;

        let raw: RawTransactionResponse = self
            .call(
                "sui_executeTransactionBlock",
                json!([
                    built.tx_bytes,
                    [signature],
                    {
                        "showEffects": true,
                        "showObjectChanges": true,
                        "showEvents": true
                    },
                    "WaitForLocalExecution"
                ]),
            )
            .await?;

        let outcome = TransactionOutcome::try_from(raw)?.ensure_success()?;
        info!(
            target_fn = %call.target(),
            sender = %sender,
            digest = %outcome.digest,
            "Move call executed"
        );
        Ok(outcome)
    }

    async fn inspect_move_call(
        &self,
        sender: SuiAddress,
        call: &MoveCall,
    ) -> Result<Vec<Vec<u8>>, ChainError> {
        let mut objects = Vec::new();
        for arg in &call.arguments {
            if let MoveArg::Object(id) = arg {
                objects.push(self.resolve_object(*id).await?);
            }
        }

        let kind = encode_move_call_kind(call, &objects)?;

        let response: DevInspectResponse = self
            .call(
                "sui_devInspectTransactionBlock",
                json!([sender.to_string(), Base64::encode_string(&kind), null, null]),
            )
            .await?;

        if let Some(error) = response.error {
            return Err(ChainError::TransactionFailed(error));
        }
        if let Some(ExecutionStatus::Failure(error)) =
            response.effects.map(|effects| effects.status.into_status())
        {
            return Err(ChainError::TransactionFailed(error));
        }

        Ok(response
            .results
            .into_iter()
            .next()
            .map(|result| {
                result
                    .return_values
                    .into_iter()
                    .map(|(bytes, _type)| bytes)
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Sui returns versions either as JSON numbers or decimal strings.
fn parse_u64(value: &Value, field: &str) -> Result<u64, ChainError> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
    .ok_or_else(|| ChainError::InvalidResponse(format!("{field} is not a u64: {value}")))
}

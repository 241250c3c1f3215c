//! Ledger RPC client with timeout and failover handling.
//!
//! # Responsibilities
//! - Resolve the cluster endpoint (plus failovers)
//! - Query the latest blockhash at a given commitment
//! - Handle timeouts and network errors gracefully

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use solana_sdk::hash::Hash;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{
    resolve_cluster_url, Commitment, FinalityCheckpoint, LedgerConfig, LedgerError, LedgerResult,
};

/// Source of finality checkpoints used to bound transaction validity.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetch the latest blockhash at the requested commitment.
    async fn latest_blockhash(&self, commitment: Commitment) -> LedgerResult<FinalityCheckpoint>;
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockhashValue {
    blockhash: String,
    last_valid_block_height: u64,
}

/// JSON-RPC ledger client with failover support.
#[derive(Clone)]
pub struct RpcLedgerClient {
    /// Endpoints, primary first.
    endpoints: Vec<url::Url>,
    http: reqwest::Client,
    timeout_duration: Duration,
}

impl RpcLedgerClient {
    /// Create a new ledger client from configuration.
    ///
    /// Invalid failover URLs are skipped with a warning; an unresolvable
    /// primary endpoint is an error.
    pub fn new(config: &LedgerConfig) -> LedgerResult<Self> {
        let mut endpoints = vec![resolve_cluster_url(&config.cluster, config.rpc_url.as_deref())?];

        for url_str in &config.failover_urls {
            match url_str.parse() {
                Ok(url) => endpoints.push(url),
                Err(e) => tracing::warn!(url = %url_str, error = %e, "Skipping invalid failover URL"),
            }
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;

        tracing::info!(
            rpc_url = %endpoints[0],
            failovers = endpoints.len() - 1,
            "Ledger client initialized"
        );

        Ok(Self {
            endpoints,
            http,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        })
    }

    /// The primary endpoint.
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoints[0]
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &url::Url,
        method: &str,
        params: serde_json::Value,
    ) -> LedgerResult<T> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| LedgerError::Rpc(format!("{} request failed: {}", method, e)))?;

        let body: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| LedgerError::Malformed(e.to_string()))?;

        match (body.result, body.error) {
            (_, Some(err)) => Err(LedgerError::Node {
                code: err.code,
                message: err.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(LedgerError::Malformed("missing result".into())),
        }
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn latest_blockhash(&self, commitment: Commitment) -> LedgerResult<FinalityCheckpoint> {
        let params = json!([{ "commitment": commitment }]);
        let mut last_error = LedgerError::Rpc("All RPC endpoints failed".to_string());

        for (i, endpoint) in self.endpoints.iter().enumerate() {
            let fut = self.call::<WithContext<BlockhashValue>>(endpoint, "getLatestBlockhash", params.clone());
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(response)) => {
                    let blockhash = Hash::from_str(&response.value.blockhash).map_err(|e| {
                        LedgerError::Malformed(format!("blockhash '{}': {}", response.value.blockhash, e))
                    })?;
                    tracing::debug!(
                        endpoint_idx = i,
                        blockhash = %blockhash,
                        last_valid_block_height = response.value.last_valid_block_height,
                        "Fetched latest blockhash"
                    );
                    return Ok(FinalityCheckpoint {
                        blockhash,
                        last_valid_block_height: response.value.last_valid_block_height,
                    });
                }
                Ok(Err(e)) => {
                    tracing::warn!(endpoint_idx = i, error = %e, "RPC error, trying next endpoint");
                    last_error = e;
                }
                Err(_) => {
                    tracing::warn!(endpoint_idx = i, "RPC timeout, trying next endpoint");
                    last_error = LedgerError::Timeout(self.timeout_duration.as_secs());
                }
            }
        }
        Err(last_error)
    }
}

impl std::fmt::Debug for RpcLedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcLedgerClient")
            .field("endpoints", &self.endpoints.len())
            .field("rpc_url", &self.endpoints[0].as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

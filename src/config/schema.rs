//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the blink
//! service. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default tip destination.
pub const DEFAULT_RECIPIENT: &str = "Sab5y7LG3VefLz4E6DSCkxdmjG4pve3hcAb8NUPKn42";

/// Default tip amount (SOL) used until the first successful price refresh.
pub const DEFAULT_TIP_AMOUNT: f64 = 0.00655;

/// Root configuration for the blink service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BlinkConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Ledger RPC settings.
    pub ledger: LedgerConfig,

    /// Price oracle settings.
    pub price_oracle: PriceOracleConfig,

    /// Action endpoint settings.
    pub action: ActionConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Ledger (Solana JSON-RPC) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Cluster moniker: "devnet", "testnet" or "mainnet-beta".
    pub cluster: String,

    /// Explicit RPC endpoint; overrides `cluster` when set.
    pub rpc_url: Option<String>,

    /// Failover JSON-RPC endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            cluster: "devnet".to_string(),
            rpc_url: None,
            failover_urls: Vec::new(),
            rpc_timeout_secs: 10,
        }
    }
}

/// Price oracle (CoinGecko simple price API) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PriceOracleConfig {
    /// API base URL, without the trailing `/simple/price`.
    pub base_url: String,

    /// Token identifier as known by the oracle.
    pub token_id: String,

    /// Fiat currency code.
    pub fiat: String,

    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PriceOracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            token_id: "solana".to_string(),
            fiat: "usd".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Action endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Route the action is served on.
    pub path: String,

    /// Default tip recipient (base58 public key).
    pub recipient: String,

    /// Default tip amount before the first price refresh.
    pub initial_default_amount: f64,

    /// Answer non-account errors with 200 instead of 400/502.
    pub legacy_error_status: bool,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            path: "/api/action".to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
            initial_default_amount: DEFAULT_TIP_AMOUNT,
            legacy_error_status: true,
        }
    }
}

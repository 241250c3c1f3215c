//! Ledger-specific types and error definitions.

use serde::{Deserialize, Serialize};
use solana_sdk::hash::Hash;
use thiserror::Error;

// Re-export LedgerConfig from config module to avoid duplication
pub use crate::config::schema::LedgerConfig;

pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const TESTNET_RPC_URL: &str = "https://api.testnet.solana.com";
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC returned error {code}: {message}")]
    Node { code: i64, message: String },

    /// The node answered with something that is not a valid checkpoint.
    #[error("Malformed RPC response: {0}")]
    Malformed(String),

    /// Cluster moniker or endpoint could not be resolved.
    #[error("Unknown cluster '{0}'")]
    UnknownCluster(String),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors raised while assembling a transaction payload.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Amount {0} SOL does not fit in lamports")]
    AmountOutOfRange(f64),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] bincode::Error),
}

/// Ledger commitment levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

/// Latest blockhash plus the height after which it expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalityCheckpoint {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

/// Map a cluster moniker to its public RPC endpoint.
///
/// An explicit `rpc_url` always wins over the moniker.
pub fn resolve_cluster_url(cluster: &str, rpc_url: Option<&str>) -> LedgerResult<url::Url> {
    let raw = match rpc_url {
        Some(url) => url,
        None => match cluster {
            "devnet" => DEVNET_RPC_URL,
            "testnet" => TESTNET_RPC_URL,
            "mainnet-beta" | "mainnet" => MAINNET_RPC_URL,
            other => return Err(LedgerError::UnknownCluster(other.to_string())),
        },
    };
    raw.parse()
        .map_err(|e| LedgerError::Rpc(format!("Invalid RPC URL '{}': {}", raw, e)))
}

//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! LedgerConfig (cluster / RPC URL)
//!     → client.rs (JSON-RPC with timeouts and failover)
//!     → FinalityCheckpoint (blockhash + last valid height)
//!     → transaction.rs (build unsigned transfer, serialize)
//! ```
//!
//! # Constraints
//! - The service never holds keys; transactions leave unsigned
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;

pub use client::{LedgerClient, RpcLedgerClient};
pub use transaction::{build_unsigned_transfer, encode_transaction, sol_to_lamports, TransferRequest};
pub use types::{Commitment, FinalityCheckpoint, LedgerError, TransactionError};

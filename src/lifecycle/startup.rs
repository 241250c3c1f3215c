//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the price oracle and ledger client from validated config
//! - Seed the default tip with one awaited price refresh
//!
//! # Design Decisions
//! - Fail fast on construction errors
//! - Tolerate an unreachable oracle: the configured default stays in place

use std::sync::Arc;
use thiserror::Error;

use crate::blockchain::{LedgerError, RpcLedgerClient};
use crate::config::BlinkConfig;
use crate::http::AppState;
use crate::pricing::{CoinGeckoOracle, OracleError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Ledger client: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Price oracle: {0}")]
    Oracle(#[from] OracleError),

    #[error("Invalid recipient: {0}")]
    Recipient(#[from] solana_sdk::pubkey::ParsePubkeyError),
}

/// Build production collaborators and the initial application state.
pub async fn prepare_state(config: BlinkConfig) -> Result<AppState, StartupError> {
    let oracle = Arc::new(CoinGeckoOracle::new(&config.price_oracle)?);
    let ledger = Arc::new(RpcLedgerClient::new(&config.ledger)?);

    let state = AppState::new(config, oracle, ledger)?;
    let amount = state.refresh_default_amount().await;

    tracing::info!(
        recipient = %state.default_recipient,
        default_amount = amount,
        "Application state ready"
    );
    Ok(state)
}

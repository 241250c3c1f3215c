//! Unsigned transfer transaction construction.
//!
//! # Responsibilities
//! - Convert SOL amounts to lamports
//! - Build a System Program transfer with the sender as fee payer
//! - Serialize the unsigned transaction for client-side signing

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use solana_system_interface::instruction as system_instruction;

use crate::blockchain::types::{FinalityCheckpoint, TransactionError};

/// Ephemeral description of one tip transfer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferRequest {
    pub sender: Pubkey,
    pub recipient: Pubkey,
    /// Amount in SOL.
    pub amount: f64,
}

/// Convert SOL to lamports, rounding half away from zero.
pub fn sol_to_lamports(amount: f64) -> Result<u64, TransactionError> {
    let lamports = (amount * LAMPORTS_PER_SOL as f64).round();
    if !lamports.is_finite() || lamports < 0.0 || lamports >= u64::MAX as f64 {
        return Err(TransactionError::AmountOutOfRange(amount));
    }
    Ok(lamports as u64)
}

/// Build the unsigned transfer transaction bound to `checkpoint`.
pub fn build_unsigned_transfer(
    request: &TransferRequest,
    checkpoint: &FinalityCheckpoint,
) -> Result<Transaction, TransactionError> {
    let lamports = sol_to_lamports(request.amount)?;
    let instruction = system_instruction::transfer(&request.sender, &request.recipient, lamports);

    let mut transaction = Transaction::new_with_payer(&[instruction], Some(&request.sender));
    transaction.message.recent_blockhash = checkpoint.blockhash;

    tracing::debug!(
        sender = %request.sender,
        recipient = %request.recipient,
        lamports,
        last_valid_block_height = checkpoint.last_valid_block_height,
        "Built unsigned transfer"
    );

    Ok(transaction)
}

/// Serialize a transaction in wire format, base64 encoded.
///
/// Signatures are not required; missing ones are sent as zeroed slots.
pub fn encode_transaction(transaction: &Transaction) -> Result<String, TransactionError> {
    let bytes = bincode::serialize(transaction)?;
    Ok(BASE64.encode(bytes))
}

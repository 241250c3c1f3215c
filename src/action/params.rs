//! Query parameter validation shared by every action method.

use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::action::error::ActionError;

/// Raw query string parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionQuery {
    pub to: Option<String>,
    pub amount: Option<String>,
}

impl ActionQuery {
    /// Pick `to` and `amount` out of decoded query pairs. The first
    /// occurrence of a repeated key wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "to" if query.to.is_none() => query.to = Some(value),
                "amount" if query.amount.is_none() => query.amount = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Validated tip parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipParams {
    pub amount: f64,
    pub recipient: Pubkey,
}

/// Validate `to` and `amount`, falling back to the given defaults.
///
/// Empty values count as absent. `to` is checked first; the amount must be
/// finite and strictly positive whether it came from the query or the default.
pub fn validate_query(
    query: &ActionQuery,
    default_recipient: Pubkey,
    default_amount: f64,
) -> Result<TipParams, ActionError> {
    let recipient = match present(&query.to) {
        Some(raw) => Pubkey::from_str(raw).map_err(|e| {
            tracing::error!(to = %raw, error = %e, "{}", ActionError::InvalidRecipient);
            ActionError::InvalidRecipient
        })?,
        None => default_recipient,
    };

    let amount = match present(&query.amount) {
        Some(raw) => raw.trim().parse::<f64>().map_err(|e| {
            tracing::error!(amount = %raw, error = %e, "{}", ActionError::InvalidAmount);
            ActionError::InvalidAmount
        })?,
        None => default_amount,
    };

    if !(amount.is_finite() && amount > 0.0) {
        tracing::error!(amount, "{}: amount is too small", ActionError::InvalidAmount);
        return Err(ActionError::InvalidAmount);
    }

    Ok(TipParams { amount, recipient })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

//! Action protocol payloads.

use serde::{Deserialize, Serialize};

pub const ACTION_TITLE: &str = "Content Tipping - Send Tips";
pub const ACTION_ICON: &str = "https://solana.com/_next/static/media/logotype.e4df684f.svg";
pub const ACTION_DESCRIPTION: &str = "Tip your favorite content creators with SOL";
pub const ACTION_LABEL: &str = "Tip Now";

/// Discovery payload returned by GET/OPTIONS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionGetResponse {
    pub title: String,
    /// Absolute URL of the icon image.
    pub icon: String,
    pub description: String,
    pub label: String,
}

impl ActionGetResponse {
    /// Metadata for the tip action.
    pub fn tip() -> Self {
        Self {
            title: ACTION_TITLE.to_string(),
            icon: ACTION_ICON.to_string(),
            description: ACTION_DESCRIPTION.to_string(),
            label: ACTION_LABEL.to_string(),
        }
    }
}

/// Body of a POST. Only `account` is read; other fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPostRequest {
    /// Base58 public key of the signer.
    pub account: String,
}

/// Response to a POST: the unsigned transaction plus a human readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPostResponse {
    /// Base64 wire-format transaction.
    pub transaction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Message shown to the signer.
pub fn transfer_message(amount: f64, recipient: &impl std::fmt::Display) -> String {
    format!("Send {} SOL to {}", format_amount(amount), recipient)
}

/// Shortest round-trip decimal, switching to exponent notation below 1e-6
/// and from 1e21 up, with an explicit sign on positive exponents.
fn format_amount(amount: f64) -> String {
    let magnitude = amount.abs();
    if amount == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return amount.to_string();
    }
    let exp = format!("{:e}", amount);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// `actions.json` mapping website paths to action API paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionsJson {
    pub rules: Vec<ActionRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRule {
    pub path_pattern: String,
    pub api_path: String,
}

impl ActionsJson {
    pub fn for_path(path: &str) -> Self {
        Self {
            rules: vec![ActionRule {
                path_pattern: path.to_string(),
                api_path: path.to_string(),
            }],
        }
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, amounts positive)
//! - Check that addresses, keys and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BlinkConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::blockchain::types::resolve_cluster_url;
use crate::config::schema::BlinkConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];
/// Routes mounted next to the action route.
const RESERVED_PATHS: [&str; 2] = ["/health", "/actions.json"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &BlinkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if SocketAddr::from_str(&config.listener.bind_address).is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::new("listener.max_body_bytes", "must be > 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    let obs = &config.observability;
    if !LOG_LEVELS.contains(&obs.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", obs.log_level),
        ));
    }
    if !LOG_FORMATS.contains(&obs.log_format.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_format",
            format!("expected one of {:?}", LOG_FORMATS),
        ));
    }
    if obs.metrics_enabled && SocketAddr::from_str(&obs.metrics_address).is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", obs.metrics_address),
        ));
    }

    let ledger = &config.ledger;
    if let Err(e) = resolve_cluster_url(&ledger.cluster, ledger.rpc_url.as_deref()) {
        errors.push(ValidationError::new("ledger.cluster", e.to_string()));
    }
    for url in &ledger.failover_urls {
        if url::Url::parse(url).is_err() {
            errors.push(ValidationError::new(
                "ledger.failover_urls",
                format!("'{}' is not a URL", url),
            ));
        }
    }
    if ledger.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("ledger.rpc_timeout_secs", "must be > 0"));
    }

    let oracle = &config.price_oracle;
    if url::Url::parse(&oracle.base_url).is_err() {
        errors.push(ValidationError::new(
            "price_oracle.base_url",
            format!("'{}' is not a URL", oracle.base_url),
        ));
    }
    if oracle.token_id.is_empty() {
        errors.push(ValidationError::new("price_oracle.token_id", "must not be empty"));
    }
    if oracle.fiat.is_empty() {
        errors.push(ValidationError::new("price_oracle.fiat", "must not be empty"));
    }
    if oracle.timeout_secs == 0 {
        errors.push(ValidationError::new("price_oracle.timeout_secs", "must be > 0"));
    }

    let action = &config.action;
    if !action.path.starts_with('/') {
        errors.push(ValidationError::new("action.path", "must start with '/'"));
    }
    if RESERVED_PATHS.contains(&action.path.as_str()) {
        errors.push(ValidationError::new(
            "action.path",
            format!("'{}' is already served", action.path),
        ));
    }
    if action.path.contains(&['{', '}', '*', ':'][..]) {
        errors.push(ValidationError::new(
            "action.path",
            "must be a literal path without captures or wildcards",
        ));
    }
    if Pubkey::from_str(&action.recipient).is_err() {
        errors.push(ValidationError::new(
            "action.recipient",
            format!("'{}' is not a valid public key", action.recipient),
        ));
    }
    if !(action.initial_default_amount.is_finite() && action.initial_default_amount > 0.0) {
        errors.push(ValidationError::new(
            "action.initial_default_amount",
            "must be a positive number",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

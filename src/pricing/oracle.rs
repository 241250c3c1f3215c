//! Fiat price lookups for the native token.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::config::PriceOracleConfig;

/// Errors returned by a price oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Price request failed: {0}")]
    Request(String),

    #[error("Price oracle returned status {0}")]
    Status(u16),

    #[error("No {fiat} price for '{token}' in oracle response")]
    MissingPrice { token: String, fiat: String },

    #[error("Oracle price {0} is not a positive number")]
    InvalidPrice(f64),
}

/// Source of the native token's fiat price.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Current price of one whole token in fiat.
    async fn fetch_price(&self) -> Result<f64, OracleError>;
}

/// Shape of `/simple/price`: `{ "<token>": { "<fiat>": price } }`.
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// CoinGecko simple price API client.
#[derive(Debug, Clone)]
pub struct CoinGeckoOracle {
    http: reqwest::Client,
    endpoint: String,
    token_id: String,
    fiat: String,
}

impl CoinGeckoOracle {
    pub fn new(config: &PriceOracleConfig) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleError::Request(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/simple/price", config.base_url.trim_end_matches('/')),
            token_id: config.token_id.clone(),
            fiat: config.fiat.clone(),
        })
    }

    fn extract(&self, body: &SimplePriceResponse) -> Result<f64, OracleError> {
        let price = body
            .get(&self.token_id)
            .and_then(|quotes| quotes.get(&self.fiat))
            .copied()
            .ok_or_else(|| OracleError::MissingPrice {
                token: self.token_id.clone(),
                fiat: self.fiat.clone(),
            })?;

        if !(price.is_finite() && price > 0.0) {
            return Err(OracleError::InvalidPrice(price));
        }
        Ok(price)
    }
}

#[async_trait]
impl PriceOracle for CoinGeckoOracle {
    async fn fetch_price(&self) -> Result<f64, OracleError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("ids", self.token_id.as_str()), ("vs_currencies", self.fiat.as_str())])
            .send()
            .await
            .map_err(|e| OracleError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Status(status.as_u16()));
        }

        let body: SimplePriceResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Request(e.to_string()))?;

        self.extract(&body)
    }
}

//! Tip pricing.
//!
//! Keeps the default tip worth roughly one unit of fiat by refreshing it
//! from a price oracle before each request.

pub mod default_amount;
pub mod oracle;

pub use default_amount::{DefaultAmount, DefaultTip};
pub use oracle::{CoinGeckoOracle, OracleError, PriceOracle};

//! Last-known-good default tip amount.

use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::SystemTime;

use crate::observability::metrics;
use crate::pricing::oracle::PriceOracle;

/// Snapshot of the default tip.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultTip {
    /// Amount in SOL.
    pub amount: f64,
    /// Fiat price the amount was derived from, if any refresh succeeded.
    pub price: Option<f64>,
    pub refreshed_at: Option<SystemTime>,
}

/// Shared default tip amount, pegged to one unit of fiat.
///
/// Refreshes swap in a new snapshot; concurrent refreshes are last-writer-wins.
pub struct DefaultAmount {
    current: ArcSwap<DefaultTip>,
}

impl DefaultAmount {
    /// Start from a fixed amount until the first refresh.
    pub fn new(initial: f64) -> Self {
        Self {
            current: ArcSwap::from_pointee(DefaultTip {
                amount: initial,
                price: None,
                refreshed_at: None,
            }),
        }
    }

    /// Current default amount in SOL.
    pub fn get(&self) -> f64 {
        self.current.load().amount
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<DefaultTip> {
        self.current.load_full()
    }

    /// Re-derive the default as `1 / price` from the oracle.
    ///
    /// On failure the previous value is kept and the failure is logged.
    /// Returns the amount in effect afterwards.
    pub async fn refresh(&self, oracle: &dyn PriceOracle) -> f64 {
        match oracle.fetch_price().await {
            Ok(price) => {
                let amount = 1.0 / price;
                self.current.store(Arc::new(DefaultTip {
                    amount,
                    price: Some(price),
                    refreshed_at: Some(SystemTime::now()),
                }));
                metrics::record_price_refresh(true, amount);
                tracing::info!(price, default_amount = amount, "Updated default tip amount");
                amount
            }
            Err(e) => {
                let amount = self.get();
                metrics::record_price_refresh(false, amount);
                tracing::error!(error = %e, default_amount = amount, "Price refresh failed, keeping previous default");
                amount
            }
        }
    }
}

impl std::fmt::Debug for DefaultAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAmount")
            .field("current", &*self.current.load())
            .finish()
    }
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the action, discovery and health handlers
//! - Wire up middleware (tracing, limits, timeout, request ID)
//! - Serve on a listener until shutdown

use axum::{routing::get, Router};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::action::cors::TIP_CORS_HEADERS;
use crate::blockchain::LedgerClient;
use crate::config::BlinkConfig;
use crate::http::handlers::{action_get, action_post, actions_json, health};
use crate::pricing::{DefaultAmount, PriceOracle};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BlinkConfig>,
    pub default_recipient: Pubkey,
    pub default_amount: Arc<DefaultAmount>,
    pub oracle: Arc<dyn PriceOracle>,
    pub ledger: Arc<dyn LedgerClient>,
}

impl AppState {
    /// Assemble state from validated config and collaborators.
    ///
    /// Fails only if the configured recipient is not a public key.
    pub fn new(
        config: BlinkConfig,
        oracle: Arc<dyn PriceOracle>,
        ledger: Arc<dyn LedgerClient>,
    ) -> Result<Self, solana_sdk::pubkey::ParsePubkeyError> {
        let default_recipient = Pubkey::from_str(&config.action.recipient)?;
        let default_amount = Arc::new(DefaultAmount::new(config.action.initial_default_amount));
        Ok(Self {
            config: Arc::new(config),
            default_recipient,
            default_amount,
            oracle,
            ledger,
        })
    }

    /// Refresh the default tip from the oracle; failures keep the old value.
    pub async fn refresh_default_amount(&self) -> f64 {
        self.default_amount.refresh(self.oracle.as_ref()).await
    }
}

/// HTTP server for the blink service.
pub struct HttpServer {
    router: Router,
    config: Arc<BlinkConfig>,
}

impl HttpServer {
    /// Create a new HTTP server around prepared state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Responses generated by the body limit and timeout layers get the tip
    /// CORS headers too; handler responses keep the set they chose.
    #[allow(deprecated)]
    fn build_router(config: &BlinkConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route(
                &config.action.path,
                get(action_get).options(action_get).post(action_post),
            )
            .route("/actions.json", get(actions_json))
            .route("/health", get(health))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        for (name, value) in TIP_CORS_HEADERS {
            router = router.layer(SetResponseHeaderLayer::if_not_present(name, value));
        }

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            action_path = %self.config.action.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &BlinkConfig {
        &self.config
    }
}

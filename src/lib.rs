//! Solana tip blink service library.

pub mod action;
pub mod blockchain;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pricing;

pub use config::BlinkConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;

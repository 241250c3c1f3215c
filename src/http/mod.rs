//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout, body limit)
//!     → handlers.rs (refresh default tip, validate, build payload)
//!     → JSON or plain-text response with CORS headers
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};

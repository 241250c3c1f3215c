//! The tip action: payloads, CORS headers, parameter validation and errors.

pub mod cors;
pub mod error;
pub mod params;
pub mod types;

pub use error::ActionError;
pub use params::{validate_query, ActionQuery, TipParams};
pub use types::{ActionGetResponse, ActionPostRequest, ActionPostResponse, ActionsJson};

//! Client for a tip action endpoint.

mod client;

pub use client::{ActionClient, ActionMetadata, ActionReply, TransactionResponse};

//! Action endpoint handlers.
//!
//! GET and OPTIONS answer with the discovery metadata; POST answers with an
//! unsigned transfer transaction. Every method refreshes the default tip from
//! the price oracle first.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::time::Instant;

use crate::action::cors::TIP_CORS_HEADERS;
use crate::action::types::transfer_message;
use crate::action::{validate_query, ActionError, ActionGetResponse, ActionPostResponse, ActionQuery, ActionsJson};
use crate::blockchain::{build_unsigned_transfer, encode_transaction, Commitment, TransferRequest};
use crate::http::server::AppState;
use crate::observability::metrics;

type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// GET/OPTIONS: action metadata.
pub async fn action_get(
    State(state): State<AppState>,
    method: Method,
    query: RawQuery,
) -> Response {
    let start = Instant::now();
    state.refresh_default_amount().await;

    let response = match discover(&state, query) {
        Ok(payload) => (StatusCode::OK, TIP_CORS_HEADERS, Json(payload)).into_response(),
        Err(e) => {
            tracing::error!(method = %method, error = %e, "GET error");
            e.into_response_with(state.config.action.legacy_error_status)
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

/// POST: unsigned transfer from the posted account to the tip recipient.
pub async fn action_post(
    State(state): State<AppState>,
    query: RawQuery,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    state.refresh_default_amount().await;

    let response = match build_transaction(&state, query, &body).await {
        Ok(payload) => (StatusCode::OK, TIP_CORS_HEADERS, Json(payload)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "POST error");
            e.into_response_with(state.config.action.legacy_error_status)
        }
    };

    metrics::record_request("POST", response.status().as_u16(), start);
    response
}

/// `actions.json` pointing wallets at the action route.
pub async fn actions_json(State(state): State<AppState>) -> impl IntoResponse {
    (TIP_CORS_HEADERS, Json(ActionsJson::for_path(&state.config.action.path)))
}

/// Liveness plus the default tip currently in effect.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "default_amount": state.default_amount.get(),
    }))
}

fn query_params(state: &AppState, query: RawQuery) -> Result<crate::action::TipParams, ActionError> {
    let Query(pairs) = query.map_err(|e| ActionError::Upstream(format!("Unreadable query string: {}", e)))?;
    validate_query(
        &ActionQuery::from_pairs(pairs),
        state.default_recipient,
        state.default_amount.get(),
    )
}

fn discover(state: &AppState, query: RawQuery) -> Result<ActionGetResponse, ActionError> {
    // Values are unused here; validation only rejects malformed links early.
    query_params(state, query)?;
    Ok(ActionGetResponse::tip())
}

async fn build_transaction(
    state: &AppState,
    query: RawQuery,
    body: &[u8],
) -> Result<ActionPostResponse, ActionError> {
    let params = query_params(state, query)?;

    let body: Value = serde_json::from_slice(body)
        .map_err(|e| ActionError::Upstream(format!("Malformed request body: {}", e)))?;
    let sender = parse_account(body.get("account"))?;

    let checkpoint = state.ledger.latest_blockhash(Commitment::Finalized).await?;

    let transfer = TransferRequest {
        sender,
        recipient: params.recipient,
        amount: params.amount,
    };
    let transaction = build_unsigned_transfer(&transfer, &checkpoint)?;

    Ok(ActionPostResponse {
        transaction: encode_transaction(&transaction)?,
        message: Some(transfer_message(params.amount, &params.recipient)),
    })
}

fn parse_account(account: Option<&Value>) -> Result<Pubkey, ActionError> {
    let parsed = account
        .and_then(Value::as_str)
        .ok_or_else(|| "account is missing or not a string".to_string())
        .and_then(|raw| Pubkey::from_str(raw).map_err(|e| e.to_string()));

    match parsed {
        Ok(pubkey) => {
            tracing::info!(account = %pubkey, "Parsed account public key");
            Ok(pubkey)
        }
        Err(reason) => {
            tracing::error!(account = ?account, error = %reason, "Invalid \"account\" provided");
            Err(ActionError::InvalidAccount)
        }
    }
}

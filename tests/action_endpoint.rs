//! End-to-end behaviour of the action endpoint.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use blink_client::{ActionClient, ActionReply};
use reqwest::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use reqwest::{Method, StatusCode};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use std::str::FromStr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tip_blink::config::BlinkConfig;

mod common;
use common::*;

const METADATA_JSON: &str = r#"{"title":"Content Tipping - Send Tips","icon":"https://solana.com/_next/static/media/logotype.e4df684f.svg","description":"Tip your favorite content creators with SOL","label":"Tip Now"}"#;

fn assert_tip_cors(res: &reqwest::Response) {
    let h = res.headers();
    assert_eq!(h[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(h[ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, PUT, DELETE, OPTIONS");
    assert_eq!(
        h[ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type, Authorization, Content-Encoding, Accept-Encoding"
    );
}

fn decode_transaction(encoded: &str) -> Transaction {
    let bytes = BASE64.decode(encoded).unwrap();
    bincode::deserialize(&bytes).unwrap()
}

#[tokio::test]
async fn test_get_returns_fixed_metadata() {
    let server = spawn_default_server().await;

    let res = client().get(server.action_url()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_tip_cors(&res);
    assert_eq!(res.text().await.unwrap(), METADATA_JSON);
}

#[tokio::test]
async fn test_options_mirrors_get() {
    let server = spawn_default_server().await;

    let res = client()
        .request(Method::OPTIONS, server.action_url())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_tip_cors(&res);
    assert_eq!(res.text().await.unwrap(), METADATA_JSON);

    let res = client()
        .request(Method::OPTIONS, server.action_url())
        .query(&[("amount", "0")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_tip_cors(&res);
    assert_eq!(res.text().await.unwrap(), "Invalid input query parameter: amount");
}

#[tokio::test]
async fn test_repeated_gets_are_identical() {
    let server = spawn_default_server().await;
    let url = format!("{}?amount=0.1&to={}", server.action_url(), OTHER_RECIPIENT);

    let first = client().get(&url).send().await.unwrap().bytes().await.unwrap();
    let second = client().get(&url).send().await.unwrap().bytes().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_price_sets_default_amount() {
    let server = spawn_default_server().await;

    let res = client().get(server.action_url()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(server.state.default_amount.get(), 1.0 / 150.0);
}

#[tokio::test]
async fn test_post_with_defaults() {
    let server = spawn_default_server().await;
    let api = ActionClient::new(&server.action_url());

    let payload = match api.build_transaction(SENDER, &[]).await.unwrap() {
        ActionReply::Ok(payload) => payload,
        other => panic!("expected transaction, got {other:?}"),
    };

    assert_eq!(
        payload.message.as_deref(),
        Some("Send 0.006666666666666667 SOL to Sab5y7LG3VefLz4E6DSCkxdmjG4pve3hcAb8NUPKn42")
    );

    let tx = decode_transaction(&payload.transaction);
    let sender = Pubkey::from_str(SENDER).unwrap();
    let recipient = Pubkey::from_str(DEFAULT_RECIPIENT).unwrap();
    assert_eq!(tx.message.account_keys[0], sender);
    assert!(tx.message.account_keys.contains(&recipient));
    assert_eq!(tx.message.recent_blockhash, test_checkpoint().blockhash);
    assert_eq!(tx.signatures.len(), 1);
}

#[tokio::test]
async fn test_post_with_overrides() {
    let server = spawn_default_server().await;

    let res = client()
        .post(server.action_url())
        .query(&[("to", OTHER_RECIPIENT), ("amount", "0.25")])
        .json(&serde_json::json!({ "account": SENDER }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_tip_cors(&res);

    let body: serde_json::Value = res.json().await.unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("0.25"));
    assert!(message.contains(OTHER_RECIPIENT));

    let tx = decode_transaction(body["transaction"].as_str().unwrap());
    let ix = &tx.message.instructions[0];
    // System transfer: u32 discriminator 2 followed by u64 lamports, little endian.
    assert_eq!(&ix.data[..4], &[2, 0, 0, 0]);
    assert_eq!(u64::from_le_bytes(ix.data[4..12].try_into().unwrap()), 250_000_000);
}

#[tokio::test]
async fn test_non_positive_amount_rejected_everywhere() {
    let server = spawn_default_server().await;

    for amount in ["0", "-2", "abc"] {
        let res = client()
            .get(server.action_url())
            .query(&[("amount", amount)])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_tip_cors(&res);
        assert!(res.text().await.unwrap().contains("Invalid input query parameter: amount"));

        let res = client()
            .post(server.action_url())
            .query(&[("amount", amount)])
            .json(&serde_json::json!({ "account": SENDER }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_tip_cors(&res);
        assert!(res.text().await.unwrap().contains("Invalid input query parameter: amount"));
    }
}

#[tokio::test]
async fn test_malformed_recipient_rejected() {
    let server = spawn_default_server().await;
    let api = ActionClient::new(&server.action_url());

    match api.metadata(&[("to", "not-a-key")]).await.unwrap() {
        ActionReply::Error { status, body } => {
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "Invalid input query parameter: to");
        }
        other => panic!("unexpected reply {other:?}"),
    }

    match api.build_transaction(SENDER, &[("to", "0OIl")]).await.unwrap() {
        ActionReply::Error { body, .. } => assert!(body.contains("Invalid input query parameter: to")),
        other => panic!("unexpected reply {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_account_is_400_with_action_headers() {
    let ledger = Arc::new(StaticLedger::default());
    let server = spawn_server(BlinkConfig::default(), Arc::new(FixedOracle(150.0)), ledger.clone()).await;

    for body in [
        serde_json::json!({ "account": "definitely not base58 0OIl" }),
        serde_json::json!({ "account": 7 }),
        serde_json::json!({}),
    ] {
        let res = client().post(server.action_url()).json(&body).send().await.unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let h = res.headers();
        assert_eq!(h[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(h[ACCESS_CONTROL_ALLOW_METHODS], "GET,POST,PUT,OPTIONS");
        assert_eq!(h[CONTENT_TYPE], "application/json");
        assert_eq!(res.text().await.unwrap(), r#"Invalid "account" provided"#);
    }

    // The ledger is never consulted for a rejected account.
    assert_eq!(ledger.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_query_checked_before_account() {
    let server = spawn_default_server().await;

    let res = client()
        .post(server.action_url())
        .query(&[("amount", "-1")])
        .json(&serde_json::json!({ "account": "bad" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Invalid input query parameter: amount");
}

#[tokio::test]
async fn test_actions_json_and_health() {
    let server = spawn_default_server().await;

    let res = client().get(server.url("/actions.json")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_tip_cors(&res);
    let rules: serde_json::Value = res.json().await.unwrap();
    assert_eq!(rules["rules"][0]["apiPath"], "/api/action");

    let res = client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let health: serde_json::Value = res.json().await.unwrap();
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn test_request_id_is_assigned() {
    let server = spawn_default_server().await;

    let res = client().get(server.action_url()).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    let res = client()
        .get(server.action_url())
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "abc-123");
}

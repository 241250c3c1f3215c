use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMetadata {
    pub title: String,
    pub icon: String,
    pub description: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
struct PostBody<'a> {
    account: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub transaction: String, // base64 wire format, unsigned
    pub message: Option<String>,
}

/// Outcome of an action call. The endpoint reports most failures as plain
/// text, so the raw status and body are kept for inspection.
#[derive(Debug)]
pub enum ActionReply<T> {
    Ok(T),
    Error { status: StatusCode, body: String },
}

pub struct ActionClient {
    client: Client,
    action_url: String,
}

impl ActionClient {
    pub fn new(action_url: &str) -> Self {
        Self {
            client: Client::new(),
            action_url: action_url.to_string(),
        }
    }

    /// Fetch the action metadata, optionally with `to` / `amount` overrides.
    pub async fn metadata(&self, query: &[(&str, &str)]) -> Result<ActionReply<ActionMetadata>, Box<dyn std::error::Error>> {
        let resp = self.client
            .get(&self.action_url)
            .query(query)
            .send()
            .await?;
        decode(resp).await
    }

    /// Request an unsigned tip transaction for `account`.
    pub async fn build_transaction(
        &self,
        account: &str,
        query: &[(&str, &str)],
    ) -> Result<ActionReply<TransactionResponse>, Box<dyn std::error::Error>> {
        let resp = self.client
            .post(&self.action_url)
            .query(query)
            .json(&PostBody { account })
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<ActionReply<T>, Box<dyn std::error::Error>> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Ok(ActionReply::Error { status, body });
    }

    // A 2xx with a non-JSON body is an error message, not a payload.
    match serde_json::from_str::<T>(&body) {
        Ok(value) => Ok(ActionReply::Ok(value)),
        Err(_) => Ok(ActionReply::Error { status, body }),
    }
}

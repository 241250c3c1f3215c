//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use tip_blink::blockchain::types::LedgerResult;
use tip_blink::blockchain::{Commitment, FinalityCheckpoint, LedgerClient, LedgerError};
use tip_blink::config::BlinkConfig;
use tip_blink::pricing::{OracleError, PriceOracle};
use tip_blink::{AppState, HttpServer, Shutdown};

pub const DEFAULT_RECIPIENT: &str = "Sab5y7LG3VefLz4E6DSCkxdmjG4pve3hcAb8NUPKn42";
pub const SENDER: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";
pub const OTHER_RECIPIENT: &str = "11111111111111111111111111111111";

/// Oracle that always answers with the same price.
pub struct FixedOracle(pub f64);

#[async_trait]
impl PriceOracle for FixedOracle {
    async fn fetch_price(&self) -> Result<f64, OracleError> {
        Ok(self.0)
    }
}

/// Oracle that is always down.
pub struct DownOracle;

#[async_trait]
impl PriceOracle for DownOracle {
    async fn fetch_price(&self) -> Result<f64, OracleError> {
        Err(OracleError::Request("connection refused".into()))
    }
}

/// Oracle whose price can be changed between requests.
#[derive(Clone)]
pub struct AdjustableOracle(pub Arc<Mutex<Result<f64, ()>>>);

#[async_trait]
impl PriceOracle for AdjustableOracle {
    async fn fetch_price(&self) -> Result<f64, OracleError> {
        match *self.0.lock().unwrap() {
            Ok(price) => Ok(price),
            Err(()) => Err(OracleError::Status(503)),
        }
    }
}

/// Ledger that hands out a fixed checkpoint and counts calls.
#[derive(Default)]
pub struct StaticLedger {
    pub calls: AtomicU32,
}

pub fn test_checkpoint() -> FinalityCheckpoint {
    FinalityCheckpoint {
        blockhash: Hash::new_from_array([9; 32]),
        last_valid_block_height: 250_000_000,
    }
}

#[async_trait]
impl LedgerClient for StaticLedger {
    async fn latest_blockhash(&self, commitment: Commitment) -> LedgerResult<FinalityCheckpoint> {
        assert_eq!(commitment, Commitment::Finalized);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(test_checkpoint())
    }
}

/// Ledger that is always unreachable.
pub struct DownLedger;

#[async_trait]
impl LedgerClient for DownLedger {
    async fn latest_blockhash(&self, _commitment: Commitment) -> LedgerResult<FinalityCheckpoint> {
        Err(LedgerError::Rpc("All RPC endpoints failed".into()))
    }
}

/// A running server plus its shutdown handle.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn action_url(&self) -> String {
        format!("http://{}/api/action", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service on an ephemeral port with injected collaborators.
pub async fn spawn_server(
    config: BlinkConfig,
    oracle: Arc<dyn PriceOracle>,
    ledger: Arc<dyn LedgerClient>,
) -> TestServer {
    let state = AppState::new(config, oracle, ledger).unwrap();
    let server = HttpServer::new(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        state,
        shutdown,
    }
}

/// Start a server with a fixed $150 price and a healthy ledger.
pub async fn spawn_default_server() -> TestServer {
    spawn_server(
        BlinkConfig::default(),
        Arc::new(FixedOracle(150.0)),
        Arc::new(StaticLedger::default()),
    )
    .await
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Read one HTTP request (headers plus Content-Length body) and return it.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|l| {
                    let (k, v) = l.split_once(':')?;
                    k.eq_ignore_ascii_case("content-length")
                        .then(|| v.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Start a programmable mock backend. `f` gets the raw request text and
/// returns a status code and a JSON body.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock backend that returns a fixed JSON body.
pub async fn start_mock_backend(body: &'static str) -> SocketAddr {
    start_programmable_backend(move |_| async move { (200, body.to_string()) }).await
}

//! Shared utilities for integration tests.
//!
//! Provides a minimal JSON-RPC over HTTP/1.1 server on a random local port. It
//! records every method invoked and answers from a caller-supplied handler.

use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Well-known test private key (Anvil's first account).
#[allow(dead_code)]
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// One JSON-RPC request seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

type Handler = dyn Fn(&str, &Value) -> Result<Value, String> + Send + Sync;

/// Method whose reply is held back, and for how long.
type Delay = Option<(&'static str, Duration)>;

/// Handle to a running mock endpoint.
pub struct MockRpc {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockRpc {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }
}

/// Start a mock JSON-RPC endpoint. `handler` receives the method and params
/// and returns either a `result` value or an error message.
pub async fn start_mock_rpc<F>(handler: F) -> MockRpc
where
    F: Fn(&str, &Value) -> Result<Value, String> + Send + Sync + 'static,
{
    spawn_mock_rpc(None, handler).await
}

/// Like [`start_mock_rpc`], but replies to `method` only after `delay`.
#[allow(dead_code)]
pub async fn start_slow_mock_rpc<F>(method: &'static str, delay: Duration, handler: F) -> MockRpc
where
    F: Fn(&str, &Value) -> Result<Value, String> + Send + Sync + 'static,
{
    spawn_mock_rpc(Some((method, delay)), handler).await
}

async fn spawn_mock_rpc<F>(delay: Delay, handler: F) -> MockRpc
where
    F: Fn(&str, &Value) -> Result<Value, String> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let handler: Arc<Handler> = Arc::new(handler);

    let recorded = calls.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let recorded = recorded.clone();
                    let handler = handler.clone();
                    tokio::spawn(serve_connection(socket, recorded, handler, delay));
                }
                Err(_) => break,
            }
        }
    });

    MockRpc { addr, calls }
}

async fn serve_connection(
    mut socket: TcpStream,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    handler: Arc<Handler>,
    delay: Delay,
) {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let header_end = loop {
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        };

        let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = headers
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }

        let body: Vec<u8> = buf.drain(..header_end + content_length).skip(header_end).collect();
        let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

        let method = request["method"].as_str().unwrap_or_default().to_string();
        let params = request["params"].clone();
        calls.lock().unwrap().push(RecordedCall {
            method: method.clone(),
            params: params.clone(),
        });

        if let Some((slow, pause)) = delay {
            if slow == method {
                tokio::time::sleep(pause).await;
            }
        }

        let response = match handler(&method, &params) {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": request["id"], "result": result }),
            Err(message) => json!({
                "jsonrpc": "2.0",
                "id": request["id"],
                "error": { "code": 3, "message": message }
            }),
        };
        let payload = response.to_string();
        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            payload.len(),
            payload
        );
        if socket.write_all(reply.as_bytes()).await.is_err() {
            return;
        }
    }
}

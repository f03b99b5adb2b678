//! Test helpers for integration tests
//!
//! Spawns the real gateway application on an ephemeral loopback port and
//! wraps the WebSocket/HTTP clients used to drive it. No external services
//! are required.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use slidesync_common::AppConfig;
use slidesync_gateway::server::{create_app, GatewayState};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

/// How long to wait for an expected event before failing the test
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to listen when asserting that nothing arrives
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a gateway on an OS-assigned port
    pub async fn start() -> Result<Self> {
        let state = GatewayState::new(AppConfig::for_tests());
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the WebSocket URL with a raw query string
    pub fn ws_url(&self, query: &str) -> String {
        format!("ws://{}/gateway?{}", self.addr, query)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Fetch /stats as JSON
    pub async fn stats(&self) -> Result<Value> {
        Ok(self.get("/stats").await?.json().await?)
    }
}

/// A WebSocket client attached to the gateway
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Connect with the usual identity parameters
    pub async fn connect(
        server: &TestServer,
        presentation_id: &str,
        user_id: &str,
        mode: Option<&str>,
        user_name: Option<&str>,
    ) -> Result<Self> {
        let mut query = format!("presentationId={presentation_id}&userId={user_id}");
        if let Some(name) = user_name {
            query.push_str(&format!("&userName={name}"));
        }
        if let Some(mode) = mode {
            query.push_str(&format!("&mode={mode}"));
        }
        Self::connect_raw(server, &query).await
    }

    /// Connect with an arbitrary query string (for refusal tests)
    pub async fn connect_raw(server: &TestServer, query: &str) -> Result<Self> {
        let (stream, _response) = tokio_tungstenite::connect_async(server.ws_url(query))
            .await
            .context("WebSocket connect failed")?;
        Ok(Self { stream })
    }

    /// Send a named event with a payload
    pub async fn send_event(&mut self, event: &str, data: Value) -> Result<()> {
        let msg = serde_json::json!({ "event": event, "data": data });
        self.stream.send(Message::Text(msg.to_string())).await?;
        Ok(())
    }

    /// Send raw text (for malformed-envelope tests)
    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Receive the next event as `(name, data)`
    pub async fn recv_event(&mut self) -> Result<(String, Value)> {
        loop {
            let msg = timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for event")?
                .context("connection ended")??;

            match msg {
                Message::Text(text) => {
                    let value: Value = serde_json::from_str(&text)?;
                    let event = value["event"]
                        .as_str()
                        .context("message missing event field")?
                        .to_string();
                    return Ok((event, value["data"].clone()));
                }
                Message::Ping(_) | Message::Pong(_) => {}
                Message::Close(frame) => bail!("connection closed: {frame:?}"),
                other => bail!("unexpected frame: {other:?}"),
            }
        }
    }

    /// Receive an event and assert its name
    pub async fn expect_event(&mut self, expected: &str) -> Result<Value> {
        let (event, data) = self.recv_event().await?;
        if event != expected {
            bail!("expected {expected}, got {event} ({data})");
        }
        Ok(data)
    }

    /// Assert that no event arrives within the silence window
    pub async fn expect_silence(&mut self) -> Result<()> {
        match timeout(SILENCE_WINDOW, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => Ok(()),
            Ok(None) => bail!("connection ended during silence window"),
            Ok(Some(msg)) => bail!("unexpected message during silence window: {msg:?}"),
        }
    }

    /// Wait for a server-side close frame, returning `(code, reason)`
    pub async fn recv_close(&mut self) -> Result<(u16, String)> {
        loop {
            let msg = timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for close frame")?
                .context("stream ended without close frame")??;

            match msg {
                Message::Close(Some(frame)) => {
                    return Ok((u16::from(frame.code), frame.reason.to_string()));
                }
                Message::Close(None) => bail!("close frame carried no code"),
                Message::Ping(_) | Message::Pong(_) => {}
                other => bail!("expected close frame, got: {other:?}"),
            }
        }
    }

    /// Close the connection cleanly
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await.ok();
        Ok(())
    }
}

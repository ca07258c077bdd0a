//! Test helpers for integration tests
//!
//! Spawns the relay on an ephemeral port with an in-memory message store and
//! drives it with real WebSocket clients.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures_util::{SinkExt, StreamExt};
use relay_common::HubConfig;
use relay_core::{ClientId, Position};
use relay_db::MemoryMessageStore;
use relay_gateway::hub::Hub;
use relay_gateway::{create_app, GatewayState};
use reqwest::Client;
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::fixtures::HealthBody;

/// How long a client waits for a frame before giving up
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryMessageStore>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a relay backed by a store that accepts everything
    pub async fn start() -> Result<Self> {
        Self::start_with(Arc::new(MemoryMessageStore::new()), None).await
    }

    /// Start a relay with a given store and optional static directory
    pub async fn start_with(store: Arc<MemoryMessageStore>, static_dir: Option<PathBuf>) -> Result<Self> {
        let (hub, _hub_task) = Hub::spawn(HubConfig::default());
        let state = GatewayState::new(hub, store.clone(), HubConfig::default());
        let app = create_app(state, static_dir.as_deref());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            store,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// WebSocket endpoint URL
    pub fn ws_url(&self) -> String {
        format!("ws://{}/chat", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    pub async fn health(&self) -> Result<HealthBody> {
        Ok(self.get("/health").await?.json().await?)
    }

    /// Wait until the hub reports exactly `online` members
    pub async fn wait_for_online(&self, online: usize) -> Result<()> {
        for _ in 0..100 {
            if self.health().await?.online == online {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        bail!("relay never reached {online} online clients")
    }

    /// Connect a client and wait until the hub has registered it
    pub async fn connect(&self) -> Result<WsClient> {
        let expected = self.health().await?.online + 1;
        let client = WsClient::connect(&self.ws_url()).await?;
        self.wait_for_online(expected).await?;
        Ok(client)
    }
}

/// A relay client over a real WebSocket
pub struct WsClient {
    pub id: ClientId,
    pub position: Position,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Connect and consume the join acknowledgement
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _) = connect_async(url).await?;
        let mut client = Self {
            id: ClientId::generate(),
            position: Position::origin(),
            stream,
        };

        let ack = client.next_json().await?;
        if ack["type"] != "join" {
            bail!("expected join acknowledgement, got {ack}");
        }
        client.id = ack["to"]
            .as_str()
            .context("join acknowledgement without id")?
            .parse()?;
        client.position = serde_json::from_value(ack["position"].clone())?;

        Ok(client)
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<()> {
        self.stream.send(Message::Text(value.to_string())).await?;
        Ok(())
    }

    /// Next text frame as JSON, skipping control frames
    pub async fn next_json(&mut self) -> Result<Value> {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for frame")?;

            match frame {
                Some(Ok(Message::Text(text))) => return Ok(serde_json::from_str(&text)?),
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                Some(Ok(other)) => bail!("unexpected frame: {other:?}"),
                Some(Err(e)) => return Err(e.into()),
                None => bail!("connection closed"),
            }
        }
    }

    /// Fail if a text frame arrives within `window`
    pub async fn expect_silence(&mut self, window: Duration) -> Result<()> {
        match tokio::time::timeout(window, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(frame) => bail!("expected silence, got {frame:?}"),
        }
    }

    /// Close the connection with a normal close frame
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

//! Common test utilities - RollbotTest harness for end-to-end testing

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ed25519_dalek::{Signer, SigningKey};
use reqwest::Client;
use rollbot::{Config, Server};
use tokio::task::JoinHandle;

/// Fixed key so failures are reproducible
const TEST_KEY: [u8; 32] = [7u8; 32];

/// Timestamp sent with every signed request
pub const TEST_TIMESTAMP: &str = "1700000000";

/// Test harness that spawns a real rollbot server on a random port
pub struct RollbotTest {
    pub addr: SocketAddr,
    pub client: Client,
    signing_key: SigningKey,
    server: Arc<Server>,
    _handle: JoinHandle<()>,
}

impl RollbotTest {
    /// Start a new test server instance
    pub async fn start() -> Result<Self> {
        Self::start_with(Config::default()).await
    }

    /// Start with custom config; bind address and public key are overridden
    pub async fn start_with(mut config: Config) -> Result<Self> {
        // Find a random available port
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);

        let signing_key = SigningKey::from_bytes(&TEST_KEY);
        config.bind_addr = addr;
        config.public_key = Some(hex::encode(signing_key.verifying_key().to_bytes()));

        let server = Arc::new(Server::new(config)?);
        let server_clone = server.clone();

        // Spawn the server in a background task
        let handle = tokio::spawn(async move {
            if let Err(e) = server_clone.run().await {
                eprintln!("Server error: {}", e);
            }
        });

        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;

        // Poll until server is ready (max 2 seconds)
        let mut ready = false;
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if client
                .get(format!("http://{}/health", addr))
                .send()
                .await
                .is_ok()
            {
                ready = true;
                break;
            }
        }

        if !ready {
            panic!("Server failed to start within 2 seconds");
        }

        Ok(Self {
            addr,
            client,
            signing_key,
            server,
            _handle: handle,
        })
    }

    /// Get the base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await?)
    }

    /// Hex signature over `timestamp || body` with the test key
    pub fn sign(&self, timestamp: &str, body: &str) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body.as_bytes());
        hex::encode(self.signing_key.sign(&message).to_bytes())
    }

    /// POST a raw body to /interactions with the given signature headers
    pub async fn post_raw(
        &self,
        body: &str,
        signature: Option<&str>,
        timestamp: Option<&str>,
    ) -> Result<reqwest::Response> {
        let mut request = self
            .client
            .post(format!("{}/interactions", self.base_url()))
            .header("Content-Type", "application/json")
            .body(body.to_string());

        if let Some(signature) = signature {
            request = request.header("X-Signature-Ed25519", signature);
        }
        if let Some(timestamp) = timestamp {
            request = request.header("X-Signature-Timestamp", timestamp);
        }

        Ok(request.send().await?)
    }

    /// POST a correctly signed interaction
    pub async fn interact(&self, interaction: &serde_json::Value) -> Result<reqwest::Response> {
        let body = interaction.to_string();
        let signature = self.sign(TEST_TIMESTAMP, &body);
        self.post_raw(&body, Some(&signature), Some(TEST_TIMESTAMP))
            .await
    }

    /// Invoke `/roll <expression>` and return the reply JSON
    pub async fn roll(&self, expression: &str) -> Result<serde_json::Value> {
        let resp = self
            .interact(&serde_json::json!({
                "type": 2,
                "id": "1",
                "data": {
                    "name": "roll",
                    "options": [{"name": "expression", "type": 3, "value": expression}]
                }
            }))
            .await?;
        anyhow::ensure!(resp.status() == 200, "roll failed: {}", resp.status());
        Ok(resp.json().await?)
    }

    /// Shutdown the server gracefully
    pub fn shutdown(&self) {
        self.server.shutdown();
    }
}

impl Drop for RollbotTest {
    fn drop(&mut self) {
        self.server.shutdown();
    }
}

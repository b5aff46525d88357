use anyhow::{Context, Result};
use lovense_core::Credentials;
use lovense_mcp::McpServer;
use lovense_relay::config::{DEFAULT_COMMAND_URL, DEFAULT_QR_URL};
use lovense_relay::{LovenseRelay, RelayConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub lovense: LovenseConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LovenseConfig {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default = "default_command_url")]
    pub command_url: String,

    #[serde(default = "default_qr_url")]
    pub qr_url: String,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_command_url() -> String {
    DEFAULT_COMMAND_URL.to_string()
}

fn default_qr_url() -> String {
    DEFAULT_QR_URL.to_string()
}

impl Default for LovenseConfig {
    fn default() -> Self {
        Self {
            token: None,
            uid: None,
            command_url: default_command_url(),
            qr_url: default_qr_url(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for LovenseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LovenseConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("uid", &self.uid)
            .field("command_url", &self.command_url)
            .field("qr_url", &self.qr_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if !config_path.exists() {
            tracing::info!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(config_path).context("Failed to read configuration file")?;
        toml::from_str(&content).context("Failed to parse configuration file")
    }

    /// Command-line and environment values win over the file.
    pub fn with_overrides(mut self, token: Option<String>, uid: Option<String>) -> Self {
        if token.is_some() {
            self.lovense.token = token;
        }
        if uid.is_some() {
            self.lovense.uid = uid;
        }
        self
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.lovense.token.clone(), self.lovense.uid.clone())
    }

    pub fn relay_config(&self) -> Result<RelayConfig> {
        let config = RelayConfig::from_endpoints(&self.lovense.command_url, &self.lovense.qr_url)
            .context("Invalid Lovense endpoint URL")?;

        Ok(match self.lovense.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        })
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub credentials: Credentials,
    pub mcp: McpServer,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let relay =
            LovenseRelay::new(config.relay_config()?).context("Failed to create HTTP client")?;

        Ok(Self::with_relay(config.credentials(), relay))
    }

    pub fn with_relay(credentials: Credentials, relay: LovenseRelay) -> Self {
        Self {
            credentials,
            mcp: McpServer::new(relay),
        }
    }
}

//! Relay from encoded tool calls to the Lovense API.

use crate::config::RelayConfig;
use crate::error::RelayResult;
use crate::transport::{HttpTransport, Transport};
use lovense_core::{error_body, Command, CommandPayload, Credentials, Encoded, QrCodeRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Result body returned when no developer token is configured
pub const TOKEN_NOT_CONFIGURED: &str = "LOVENSE_TOKEN not configured";

/// Sends commands and QR requests, turning every failure into an
/// `{"error": "..."}` value rather than an `Err`.
#[derive(Clone)]
pub struct LovenseRelay {
    config: Arc<RelayConfig>,
    transport: Arc<dyn Transport>,
}

impl LovenseRelay {
    /// Create a relay that talks HTTP to the configured endpoints.
    pub fn new(config: RelayConfig) -> RelayResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a relay over any transport.
    pub fn with_transport(config: RelayConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Relay an encoded tool call to whichever endpoint it targets.
    pub async fn relay(&self, credentials: &Credentials, encoded: &Encoded) -> Value {
        match encoded {
            Encoded::QrCode => self.request_qr_code(credentials).await,
            Encoded::Command(command) => self.send_command(credentials, command).await,
        }
    }

    /// POST a command payload to the command endpoint.
    pub async fn send_command(&self, credentials: &Credentials, command: &Command) -> Value {
        let Some(token) = credentials.token() else {
            return error_body(TOKEN_NOT_CONFIGURED);
        };

        debug!(command = command.name(), uid = credentials.uid(), "Sending command");
        let payload = CommandPayload::new(token, credentials.uid(), command);
        self.post(&self.config.command_url, serde_json::to_value(&payload))
            .await
    }

    /// POST a pairing request to the QR endpoint.
    pub async fn request_qr_code(&self, credentials: &Credentials) -> Value {
        let Some(token) = credentials.token() else {
            return error_body(TOKEN_NOT_CONFIGURED);
        };

        debug!(uid = credentials.uid(), "Requesting QR code");
        let request = QrCodeRequest::new(token, credentials.uid());
        self.post(&self.config.qr_url, serde_json::to_value(&request))
            .await
    }

    async fn post(&self, url: &Url, body: serde_json::Result<Value>) -> Value {
        let result = match body {
            Ok(body) => self.transport.post_json(url, &body).await,
            Err(e) => Err(e.into()),
        };

        result.unwrap_or_else(|e| {
            warn!(url = %url, error = %e, "Lovense request failed");
            error_body(e)
        })
    }
}

// Tool dispatch: encode the call, then relay it

use lovense_core::{encode, error_body, Credentials, ToolInvocation};
use lovense_relay::LovenseRelay;
use serde_json::Value;
use tracing::info;

/// Runs tool calls against the Lovense API.
///
/// Validation failures and relay errors both come back as `{"error": ...}`
/// values; nothing here returns `Err`.
#[derive(Clone)]
pub struct ToolDispatcher {
    relay: LovenseRelay,
}

impl ToolDispatcher {
    pub fn new(relay: LovenseRelay) -> Self {
        Self { relay }
    }

    pub async fn dispatch(&self, credentials: &Credentials, invocation: &ToolInvocation) -> Value {
        info!(tool = %invocation.name, "Tool call");

        match encode(invocation) {
            Ok(encoded) => self.relay.relay(credentials, &encoded).await,
            Err(e) => {
                info!(tool = %invocation.name, error = %e, "Tool call rejected");
                error_body(e)
            }
        }
    }
}

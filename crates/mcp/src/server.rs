// MCP server: routes JSON-RPC messages to the tool dispatcher

use crate::protocol::{
    CallToolParams, CallToolResult, IncomingMessage, InitializeParams, InitializeResult,
    JsonRpcError, JsonRpcResponse, ListToolsResult, ServerCatalog, ToolContent, SERVER_NAME,
    SERVER_VERSION,
};
use crate::tools::{ToolCatalog, ToolDispatcher};
use lovense_core::{is_error_body, Credentials, ToolInvocation, ToolKind};
use lovense_relay::LovenseRelay;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct McpServer {
    catalog: Arc<ToolCatalog>,
    dispatcher: ToolDispatcher,
}

impl McpServer {
    pub fn new(relay: LovenseRelay) -> Self {
        Self {
            catalog: Arc::new(ToolCatalog::new()),
            dispatcher: ToolDispatcher::new(relay),
        }
    }

    /// Names of every declared tool, in declaration order
    pub fn tool_names(&self) -> Vec<&str> {
        self.catalog.names()
    }

    /// Tool list plus server identity, for plain `GET` requests
    pub fn catalog(&self) -> ServerCatalog {
        ServerCatalog {
            tools: self.catalog.schemas().to_vec(),
            name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
        }
    }

    /// Run one tool and return its raw result value.
    pub async fn call_tool(&self, credentials: &Credentials, invocation: &ToolInvocation) -> Value {
        self.dispatcher.dispatch(credentials, invocation).await
    }

    /// Run an argument-less tool directly, bypassing the JSON-RPC envelope.
    pub async fn call_direct(&self, credentials: &Credentials, kind: ToolKind) -> Value {
        self.call_tool(credentials, &ToolInvocation::without_arguments(kind))
            .await
    }

    /// Handle a parsed JSON body. Bodies that are not a single JSON-RPC-ish
    /// object get an `Invalid Request` error.
    pub async fn handle_value(&self, credentials: &Credentials, body: Value) -> Option<JsonRpcResponse> {
        match serde_json::from_value::<IncomingMessage>(body) {
            Ok(message) => self.handle(credentials, message).await,
            Err(e) => Some(JsonRpcResponse::error(
                None,
                JsonRpcError::invalid_request(e.to_string()),
            )),
        }
    }

    /// Handle one message. Returns `None` for notifications, which get no reply.
    pub async fn handle(
        &self,
        credentials: &Credentials,
        message: IncomingMessage,
    ) -> Option<JsonRpcResponse> {
        // A `tool` field wins over any method, as in the legacy direct shape
        if message.method() == Some("tools/call") || is_truthy(message.tool.as_ref()) {
            return Some(self.handle_tool_call(credentials, message).await);
        }

        let id = message.id;
        match message.method.as_deref() {
            Some("tools/list") => Some(JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.catalog.schemas().to_vec(),
                },
            )),
            Some("initialize") => {
                let params: InitializeParams = message
                    .params
                    .and_then(|p| serde_json::from_value(p).ok())
                    .unwrap_or_default();
                info!(
                    client = params.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
                    protocol = params.protocol_version.as_deref().unwrap_or("unspecified"),
                    "MCP client initializing"
                );
                Some(JsonRpcResponse::success(id, InitializeResult::lovense_cloud()))
            }
            Some("ping") => Some(JsonRpcResponse::success(id, serde_json::json!({}))),
            Some(method) if method.starts_with("notifications/") => {
                debug!(method, "Notification received");
                None
            }
            Some(method) => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::method_not_found(method),
            )),
            None => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request("missing method"),
            )),
        }
    }

    async fn handle_tool_call(
        &self,
        credentials: &Credentials,
        message: IncomingMessage,
    ) -> JsonRpcResponse {
        let params: CallToolParams = message
            .params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        let name = first_truthy(params.name, message.tool)
            .map(|name| match name {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_default();
        let arguments = first_truthy(params.arguments, message.args).unwrap_or(Value::Null);

        let invocation = ToolInvocation::new(name, arguments);
        let result = self.dispatcher.dispatch(credentials, &invocation).await;

        let is_error = is_error_body(&result).then_some(true);
        let text = serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string());

        JsonRpcResponse::success(
            message.id,
            CallToolResult {
                content: vec![ToolContent::text(text)],
                is_error,
            },
        )
    }
}

/// `null`, `false`, `0` and `""` count as absent.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    }
}

fn first_truthy(primary: Option<Value>, fallback: Option<Value>) -> Option<Value> {
    if is_truthy(primary.as_ref()) {
        primary
    } else if is_truthy(fallback.as_ref()) {
        fallback
    } else {
        None
    }
}

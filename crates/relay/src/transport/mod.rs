//! Transport layer for outbound API calls.

pub mod http;

pub use http::HttpTransport;

use crate::error::RelayResult;
use serde_json::Value;
use url::Url;

/// Something that can POST a JSON body and return the JSON it gets back.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &Url, body: &Value) -> RelayResult<Value>;
}

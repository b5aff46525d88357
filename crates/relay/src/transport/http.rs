//! HTTP transport backed by `reqwest`.

use super::Transport;
use crate::config::RelayConfig;
use crate::error::RelayResult;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// HTTP transport for outbound API requests.
///
/// No retries: each call is a single POST, and the response body is parsed
/// as JSON whatever the status code.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: &RelayConfig) -> RelayResult<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("lovense-cloud/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &Url, body: &Value) -> RelayResult<Value> {
        debug!(url = %url, "POST request");

        let response = self.client.post(url.clone()).json(body).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;

        debug!(url = %url, status = status.as_u16(), "POST response");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_transport() -> HttpTransport {
        HttpTransport::new(&RelayConfig::lovense_cloud().unwrap()).unwrap()
    }

    fn endpoint(server: &MockServer, route: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), route)).unwrap()
    }

    #[tokio::test]
    async fn test_post_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/echo"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"name": "test"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport();
        let result = transport
            .post_json(&endpoint(&server, "/api/echo"), &json!({"name": "test"}))
            .await
            .unwrap();

        assert_eq!(result, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_error_status_body_passes_through() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/bad"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"result": false, "code": 400, "message": "Invalid token"})),
            )
            .mount(&server)
            .await;

        let transport = create_transport();
        let result = transport
            .post_json(&endpoint(&server, "/api/bad"), &json!({}))
            .await
            .unwrap();

        assert_eq!(result["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/html"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let transport = create_transport();
        let result = transport
            .post_json(&endpoint(&server, "/api/html"), &json!({}))
            .await;

        assert!(matches!(result, Err(RelayError::Http(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        let url = Url::parse("http://127.0.0.1:1/api/gone").unwrap();

        let transport = create_transport();
        let result = transport.post_json(&url, &json!({})).await;

        assert!(result.is_err());
    }
}

//! # Lovense relay
//!
//! Sends encoded tool calls to the Lovense cloud API and hands the JSON
//! response back untouched.
//!
//! ```rust,no_run
//! use lovense_core::{encode, Credentials, ToolInvocation};
//! use lovense_relay::{LovenseRelay, RelayConfig, RelayResult};
//!
//! # async fn example() -> RelayResult<()> {
//! let relay = LovenseRelay::new(RelayConfig::lovense_cloud()?)?;
//! let credentials = Credentials::new(Some("dev-token".to_string()), None);
//!
//! let invocation = ToolInvocation::new("vibrate", serde_json::json!({"intensity": 8}));
//! if let Ok(encoded) = encode(&invocation) {
//!     let response = relay.relay(&credentials, &encoded).await;
//!     println!("{}", response);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod relay;
pub mod transport;

pub use config::RelayConfig;
pub use error::{RelayError, RelayResult};
pub use relay::{LovenseRelay, TOKEN_NOT_CONFIGURED};
pub use transport::{HttpTransport, Transport};

// Core types and command encoding for the Lovense cloud adapter

pub mod command;
pub mod encoder;
pub mod error;
pub mod tool;
pub mod types;

pub use command::{Action, Command, CommandPayload, PatternRule, QrCodeRequest, Strengths};
pub use encoder::{encode, Encoded};
pub use error::{error_body, is_error_body, EncodeError, EncodeResult};
pub use tool::{Arguments, ToolInvocation, ToolKind};
pub use types::*;

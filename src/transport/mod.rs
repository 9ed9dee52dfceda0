//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod create_call;
mod create_message;
mod error_body;

pub use create_call::{CallResource, CreateCall};
pub use create_message::{CreateMessage, MessageResource};
pub(crate) use create_call::{decode_create_call_json_response, encode_create_call_form};
pub(crate) use create_message::{decode_create_message_json_response, encode_create_message_form};
pub(crate) use error_body::decode_api_error_body;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

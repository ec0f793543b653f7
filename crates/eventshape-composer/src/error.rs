use std::path::PathBuf;

use eventshape_core::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error(transparent)]
    InvalidDescriptor(#[from] SchemaError),
    #[error("Shape mismatch for {event_type} event at '{field}': {reason}")]
    ShapeMismatch {
        event_type: String,
        field: String,
        reason: String,
    },
    #[error("Malformed event instance: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),
    #[error("Invalid inclusion config {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, EventError>;

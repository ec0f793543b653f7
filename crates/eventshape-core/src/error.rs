use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Invalid descriptor for field '{field}': {reason}")]
    InvalidDescriptor { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, SchemaError>;

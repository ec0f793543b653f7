#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Field schema registry for eventshape.
//!
//! Holds the reusable field descriptors every event type is assembled from:
//! the seven common fields and the factories for the six optional ones.

pub mod currency;
pub mod descriptor;
pub mod error;
pub mod fields;

pub use currency::{is_known_currency, UNKNOWN_CURRENCY};
pub use descriptor::{Choice, FieldDefault, FieldDescriptor, FieldMap, FieldType};
pub use error::{Result, SchemaError};
pub use fields::OptionalField;

#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Per-event-type schema composition and payload normalization.
//!
//! An [`EventSchema`] is built once from an event type and an
//! [`InclusionSpec`]. It hands the host an ordered field map to render and
//! validate, and turns the instance the host collects into the canonical
//! [`EventPayload`] wire format.
//!
//! ```
//! use eventshape_composer::{EventSchema, EventType};
//! use serde_json::json;
//!
//! let schema = EventSchema::for_event_type(EventType::ItemPageView)?;
//! let payload = schema.normalize_value(&json!({
//!     "timestamp": "2024-03-01T12:00:00Z",
//!     "channelType": "SITE",
//!     "defaultCurrency": "USD",
//!     "items": [{ "id": "sku1", "price": { "amount": 9.99 } }]
//! }))?;
//! assert_eq!(payload.items.unwrap()[0].price.as_ref().unwrap().currency, "USD");
//! # Ok::<(), eventshape_composer::EventError>(())
//! ```

mod telemetry;

pub mod catalog;
pub mod error;
pub mod event_type;
pub mod inclusion;
pub mod instance;
pub mod payload;
pub mod schema;

pub use catalog::SchemaCatalog;
pub use error::{EventError, Result};
pub use event_type::EventType;
pub use inclusion::{Inclusion, InclusionSpec, RequireFlags};
pub use instance::{DeviceInput, EventInstance, ItemInput, MoneyInput};
pub use payload::{ChannelType, DevicePayload, EventPayload, ItemPayload, MoneyPayload, Timestamp};
pub use schema::EventSchema;

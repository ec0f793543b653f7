//! Inclusion configuration per event type.
//!
//! A catalog starts from the built-in [`EventType`] presets and may be
//! overridden from a JSON file:
//!
//! ```json
//! { "PURCHASE": { "items": "required", "revenue": "optional" },
//!   "WISHLIST_SHARE": { "items": "optional" } }
//! ```
//!
//! Flags a file entry does not mention are absent. Entries may name event
//! types outside the built-in set.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EventError, Result};
use crate::event_type::EventType;
use crate::inclusion::InclusionSpec;
use crate::schema::EventSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaCatalog {
    overrides: BTreeMap<String, InclusionSpec>,
}

impl SchemaCatalog {
    /// Catalog with only the built-in presets.
    pub fn presets() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads overrides from a JSON file.
    ///
    /// # Errors
    ///
    /// [`EventError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let config_err = |reason: String| EventError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let text = fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| config_err(e.to_string()))
    }

    #[must_use]
    pub fn with_override(mut self, event_type: impl Into<String>, spec: InclusionSpec) -> Self {
        self.overrides.insert(event_type.into(), spec);
        self
    }

    /// Configured inclusion, falling back to the preset of a known type.
    pub fn inclusion(&self, event_type: &str) -> Option<InclusionSpec> {
        self.overrides.get(event_type).copied().or_else(|| {
            EventType::from_str(event_type)
                .ok()
                .map(EventType::default_inclusion)
        })
    }

    /// Composes the schema for `event_type`.
    ///
    /// # Errors
    ///
    /// [`EventError::UnknownEventType`] if the type is neither configured
    /// nor built in.
    pub fn schema(&self, event_type: &str) -> Result<EventSchema> {
        let spec = self
            .inclusion(event_type)
            .ok_or_else(|| EventError::UnknownEventType(event_type.to_string()))?;
        EventSchema::new(event_type, spec)
    }

    /// Built-in types followed by configured extra types.
    pub fn event_types(&self) -> Vec<String> {
        let mut types: Vec<String> = EventType::ALL
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();
        for name in self.overrides.keys() {
            if !types.contains(name) {
                types.push(name.clone());
            }
        }
        types
    }
}

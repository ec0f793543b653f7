//! Event schema composition and payload normalization.

use eventshape_core::fields::{common_fields, keys};
use eventshape_core::{is_known_currency, FieldMap, OptionalField, UNKNOWN_CURRENCY};
use serde::Deserialize;
use serde_json::Value;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::{EventError, Result};
use crate::event_type::EventType;
use crate::inclusion::{Inclusion, InclusionSpec};
use crate::instance::{EventInstance, ItemInput, MoneyInput};
use crate::payload::{ChannelType, DevicePayload, EventPayload, ItemPayload, MoneyPayload, Timestamp};
use crate::telemetry::debug_event;

/// Field schema of one event type, fixed at construction.
///
/// Holds the composed field map for the host and normalizes filled-in
/// instances into [`EventPayload`]s. The schema is never mutated after
/// [`EventSchema::new`], so one value can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSchema {
    event_type: String,
    inclusion: InclusionSpec,
    fields: FieldMap,
}

impl EventSchema {
    /// Composes the schema for `event_type`.
    ///
    /// The event type is a free-form tag; unknown names are accepted and
    /// left for the host to reject. Optional fields marked
    /// [`Inclusion::Absent`] are not part of the resulting field map.
    ///
    /// # Errors
    ///
    /// [`EventError::InvalidDescriptor`] if a registry descriptor breaks the
    /// object/scalar shape invariant.
    pub fn new(event_type: impl Into<String>, inclusion: InclusionSpec) -> Result<Self> {
        let mut fields = common_fields();
        for (field, flag) in inclusion.enabled() {
            fields.insert(field.key(), field.descriptor(flag.is_required()));
        }
        for (name, descriptor) in fields.iter() {
            descriptor.validate(name)?;
        }

        Ok(Self {
            event_type: event_type.into(),
            inclusion,
            fields,
        })
    }

    /// Schema for a known event type using its built-in inclusion.
    pub fn for_event_type(event_type: EventType) -> Result<Self> {
        Self::new(event_type.as_str(), event_type.default_inclusion())
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn inclusion(&self) -> InclusionSpec {
        self.inclusion
    }

    /// Common fields followed by the enabled optional fields, in declared
    /// order.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Maps a host instance onto the wire payload.
    ///
    /// Optional fields not enabled for this event type are dropped even if
    /// the instance carries them. Missing optional values are omitted,
    /// never filled with `null`.
    ///
    /// # Errors
    ///
    /// [`EventError::ShapeMismatch`] when a field required by the common
    /// schema or by this schema's inclusion is missing, or when a value
    /// cannot be represented on the wire (bad timestamp, channel type, item
    /// without id, money without amount).
    pub fn normalize(&self, instance: &EventInstance) -> Result<EventPayload> {
        let timestamp = self.timestamp(instance.timestamp.as_ref())?;
        let channel_type = match instance.channel_type.as_deref() {
            None => return Err(self.missing(keys::CHANNEL_TYPE)),
            Some(raw) => ChannelType::parse(raw).ok_or_else(|| {
                self.mismatch(keys::CHANNEL_TYPE, format!("expected APP or SITE, got '{raw}'"))
            })?,
        };

        let items = match self.select(OptionalField::Items, instance.items.as_ref())? {
            Some(items) => Some(self.items(items, instance.default_currency.as_deref())?),
            None => None,
        };
        let revenue = self
            .select(OptionalField::Revenue, instance.revenue.as_ref())?
            .map(|money| self.money(keys::REVENUE, money, None))
            .transpose()?;
        let shipping_charge = self
            .select(OptionalField::ShippingCharge, instance.shipping_charge.as_ref())?
            .map(|money| self.money(keys::SHIPPING_CHARGE, money, None))
            .transpose()?;

        Ok(EventPayload {
            event_type: self.event_type.clone(),
            event_id: instance.event_id.clone(),
            timestamp,
            channel_type,
            user_id: instance.user_id.clone(),
            device: instance.device.as_ref().map(DevicePayload::from),
            session_id: instance.session_id.clone(),
            decision_track_id: instance.decision_track_id.clone(),
            items,
            revenue,
            search_query: self
                .select(OptionalField::SearchQuery, instance.search_query.as_ref())?
                .cloned(),
            page_id: self
                .select(OptionalField::PageId, instance.page_id.as_ref())?
                .cloned(),
            referrer_page_id: self
                .select(OptionalField::ReferrerPageId, instance.referrer_page_id.as_ref())?
                .cloned(),
            shipping_charge,
        })
    }

    /// Like [`normalize`](Self::normalize) for an untyped JSON instance.
    ///
    /// Keys of optional fields this schema excludes are dropped before the
    /// instance is decoded, whatever their shape.
    ///
    /// # Errors
    ///
    /// [`EventError::Malformed`] if the remaining value does not have the
    /// instance shape, otherwise as [`normalize`](Self::normalize).
    pub fn normalize_value(&self, value: &Value) -> Result<EventPayload> {
        let instance = match value {
            Value::Object(obj) => {
                let mut obj = obj.clone();
                for field in OptionalField::ALL {
                    if self.inclusion.get(field).is_present() {
                        continue;
                    }
                    if obj.remove(field.key()).is_some() {
                        debug_event!(
                            "dropping '{}' from {} event: field is not part of its schema",
                            field.key(),
                            self.event_type
                        );
                    }
                }
                EventInstance::deserialize(Value::Object(obj))?
            }
            other => EventInstance::deserialize(other)?,
        };
        self.normalize(&instance)
    }

    /// Like [`normalize_value`](Self::normalize_value) for JSON text.
    pub fn normalize_json(&self, json: &str) -> Result<EventPayload> {
        let value: Value = serde_json::from_str(json)?;
        self.normalize_value(&value)
    }

    /// Request body for the delivery layer.
    pub fn to_json_body(&self, payload: &EventPayload) -> Result<Value> {
        Ok(serde_json::to_value(payload)?)
    }

    fn timestamp(&self, timestamp: Option<&Timestamp>) -> Result<Timestamp> {
        match timestamp {
            None => Err(self.missing(keys::TIMESTAMP)),
            Some(Timestamp::Iso(raw)) => {
                let parses = OffsetDateTime::parse(raw, &Rfc3339).is_ok()
                    || OffsetDateTime::parse(raw, &Iso8601::DEFAULT).is_ok()
                    || PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT).is_ok();
                if !parses {
                    return Err(self.mismatch(
                        keys::TIMESTAMP,
                        format!("'{raw}' is not an ISO 8601 datetime"),
                    ));
                }
                Ok(Timestamp::Iso(raw.clone()))
            }
            Some(epoch) => Ok(epoch.clone()),
        }
    }

    /// Applies this schema's inclusion for `field` to an instance value.
    fn select<'a, T>(&self, field: OptionalField, value: Option<&'a T>) -> Result<Option<&'a T>> {
        match (self.inclusion.get(field), value) {
            (Inclusion::Absent, Some(_)) => {
                debug_event!(
                    "dropping '{}' from {} event: field is not part of its schema",
                    field.key(),
                    self.event_type
                );
                Ok(None)
            }
            (Inclusion::Required, None) => Err(self.missing(field.key())),
            (_, value) => Ok(value),
        }
    }

    fn items(&self, items: &[ItemInput], default_currency: Option<&str>) -> Result<Vec<ItemPayload>> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| -> Result<ItemPayload> {
                let path = format!("{}[{index}]", keys::ITEMS);
                let id = item
                    .id
                    .clone()
                    .ok_or_else(|| self.missing(&format!("{path}.id")))?;
                let fallback = item.currency.as_deref().or(default_currency);
                let price = item
                    .price
                    .as_ref()
                    .map(|money| self.money(&format!("{path}.price"), money, fallback))
                    .transpose()?;

                Ok(ItemPayload {
                    id,
                    price,
                    quantity: item.quantity.clone(),
                    item_group_id: item.item_group_id.clone(),
                    seller_id: item.seller_id.clone(),
                })
            })
            .collect()
    }

    /// Folds a money input into an amount with an explicit currency:
    /// the value's own currency, then `fallback`, then `UNKNOWN_CURRENCY`.
    fn money(&self, path: &str, money: &MoneyInput, fallback: Option<&str>) -> Result<MoneyPayload> {
        let amount = money
            .amount()
            .cloned()
            .ok_or_else(|| self.missing(&format!("{path}.amount")))?;
        let currency = money.currency().or(fallback).unwrap_or(UNKNOWN_CURRENCY);
        if !is_known_currency(currency) {
            debug_event!("passing through unlisted currency '{currency}' at {path}");
        }

        Ok(MoneyPayload {
            currency: currency.to_string(),
            amount,
        })
    }

    fn missing(&self, field: &str) -> EventError {
        self.mismatch(field, "required field is missing".to_string())
    }

    fn mismatch(&self, field: &str, reason: String) -> EventError {
        debug_event!("{} event rejected at '{field}': {reason}", self.event_type);
        EventError::ShapeMismatch {
            event_type: self.event_type.clone(),
            field: field.to_string(),
            reason,
        }
    }
}

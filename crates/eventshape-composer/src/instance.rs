//! Host-collected event instance, shaped like the composed field map.
//!
//! Everything is optional here: requiredness is decided by the
//! [`EventSchema`](crate::EventSchema) at normalization time, not by
//! deserialization. Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::payload::{DevicePayload, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInstance {
    pub event_id: Option<String>,
    pub timestamp: Option<Timestamp>,
    pub channel_type: Option<String>,
    pub user_id: Option<String>,
    pub device: Option<DeviceInput>,
    pub session_id: Option<String>,
    pub decision_track_id: Option<String>,
    /// Currency applied to item prices that do not name one.
    pub default_currency: Option<String>,
    pub items: Option<Vec<ItemInput>>,
    pub revenue: Option<MoneyInput>,
    pub search_query: Option<String>,
    pub page_id: Option<String>,
    pub referrer_page_id: Option<String>,
    pub shipping_charge: Option<MoneyInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInput {
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub advertising_id: Option<String>,
    pub unique_device_id: Option<String>,
    pub model: Option<String>,
    pub ua: Option<String>,
    pub language: Option<String>,
    pub ip: Option<String>,
}

impl From<&DeviceInput> for DevicePayload {
    fn from(device: &DeviceInput) -> Self {
        Self {
            os: device.os.clone(),
            os_version: device.os_version.clone(),
            advertising_id: device.advertising_id.clone(),
            unique_device_id: device.unique_device_id.clone(),
            model: device.model.clone(),
            ua: device.ua.clone(),
            language: device.language.clone(),
            ip: device.ip.clone(),
        }
    }
}

/// One item as collected by the host.
///
/// `price` may be nested (`{"amount": 9.99, "currency": "USD"}`) or a bare
/// number, in which case the item-level `currency` applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub id: Option<String>,
    pub price: Option<MoneyInput>,
    pub currency: Option<String>,
    pub quantity: Option<Number>,
    pub item_group_id: Option<String>,
    pub seller_id: Option<String>,
}

/// Monetary value as collected by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoneyInput {
    /// Bare amount with no currency.
    Amount(Number),
    Detailed {
        #[serde(default)]
        currency: Option<String>,
        #[serde(default, alias = "price")]
        amount: Option<Number>,
    },
}

impl MoneyInput {
    pub fn currency(&self) -> Option<&str> {
        match self {
            MoneyInput::Amount(_) => None,
            MoneyInput::Detailed { currency, .. } => currency.as_deref(),
        }
    }

    pub fn amount(&self) -> Option<&Number> {
        match self {
            MoneyInput::Amount(amount) => Some(amount),
            MoneyInput::Detailed { amount, .. } => amount.as_ref(),
        }
    }
}

//! Registry of every field an event schema can expose.
//!
//! The seven common fields are fixed descriptors shared by all event types.
//! The six optional fields vary per event type in whether they appear and
//! whether they are required, so they are built by factories taking the
//! `required` flag. Each factory call returns a fresh descriptor.

use std::sync::LazyLock;

use crate::currency::{currency_options, UNKNOWN_CURRENCY};
use crate::descriptor::{Choice, FieldDescriptor, FieldMap, FieldType};

/// Field names as they appear in the field map and in host instances.
pub mod keys {
    pub const EVENT_ID: &str = "eventId";
    pub const TIMESTAMP: &str = "timestamp";
    pub const CHANNEL_TYPE: &str = "channelType";
    pub const USER_ID: &str = "userId";
    pub const DEVICE: &str = "device";
    pub const SESSION_ID: &str = "sessionId";
    pub const DECISION_TRACK_ID: &str = "decisionTrackId";

    pub const ITEMS: &str = "items";
    pub const REVENUE: &str = "revenue";
    pub const SEARCH_QUERY: &str = "searchQuery";
    pub const PAGE_ID: &str = "pageId";
    pub const REFERRER_PAGE_ID: &str = "referrerPageId";
    pub const SHIPPING_CHARGE: &str = "shippingCharge";

    /// Common field names in field-map order.
    pub const COMMON: [&str; 7] = [
        EVENT_ID,
        TIMESTAMP,
        CHANNEL_TYPE,
        USER_ID,
        DEVICE,
        SESSION_ID,
        DECISION_TRACK_ID,
    ];
}

fn text(label: &str, description: &str) -> FieldDescriptor {
    FieldDescriptor::scalar(label, description, FieldType::String, false)
}

pub static EVENT_ID: LazyLock<FieldDescriptor> = LazyLock::new(|| {
    text(
        "Event ID",
        "Unique ID generated by the client to suppress duplicate events. The length should not exceed 128 characters.",
    )
    .with_default_path("$.messageId")
});

pub static TIMESTAMP: LazyLock<FieldDescriptor> = LazyLock::new(|| {
    FieldDescriptor::scalar(
        "Timestamp",
        "Timestamp that the event happened at.",
        FieldType::Datetime,
        true,
    )
    .with_default_path("$.timestamp")
});

pub static CHANNEL_TYPE: LazyLock<FieldDescriptor> = LazyLock::new(|| {
    FieldDescriptor::scalar(
        "Channel Type",
        "Type of channel, either APP or SITE",
        FieldType::String,
        true,
    )
    .with_choices(vec![Choice::new("App", "APP"), Choice::new("Site", "SITE")])
});

pub static USER_ID: LazyLock<FieldDescriptor> = LazyLock::new(|| {
    text(
        "User ID",
        "User Identifier for the platform. Recommended to hash it before sending for anonymization. The length should not exceed 128 characters.",
    )
    .with_default_path("$.userId")
});

pub static DEVICE: LazyLock<FieldDescriptor> = LazyLock::new(|| {
    let properties = FieldMap::new()
        .with(
            "os",
            text(
                "OS",
                "OS of the device. \"ios\" or \"android\" must be included for the APP channel type.",
            )
            .with_default_path("$.context.os.name"),
        )
        .with(
            "osVersion",
            text(
                "OS Version",
                "Device OS version, which is taken from the device without manipulation or normalization. (e.g., \"14.4.1\")",
            )
            .with_default_path("$.context.os.version"),
        )
        .with(
            "advertisingId",
            text(
                "Advertising ID",
                "For app traffic, IDFA of iOS or ADID of android should be filled in this field. (e.g., 7acefbed-d1f6-4e4e-aa26-74e93dd017e4)",
            )
            .with_default_path("$.context.device.advertisingId"),
        )
        .with(
            "uniqueDeviceId",
            text(
                "Unique Device ID",
                "For app traffic, a unique identifier for the device being used should be provided in this field.\n  Clients can issue identifiers for their user devices or use their IDFV values if using iOS apps.\n  The length of this id should not exceed 128 characters.",
            )
            .with_default_path("$.context.device.id"),
        )
        .with(
            "model",
            text(
                "Model",
                "Device model, which is taken from the device without manipulation or normalization. (e.g., \"iPhone 11 Pro\")",
            )
            .with_default_path("$.context.device.model"),
        )
        .with(
            "ua",
            text(
                "User Agent",
                "User Agent. (e.g., \"Mozilla/5.0 (iPhone; CPU iPhone OS 14_4_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/111FFF\")",
            )
            .with_default_path("$.context.userAgent"),
        )
        // no reliable source path; hosts may map context.locale themselves
        .with(
            "language",
            text("Language", "ISO-639-1 alpha-2 language code. (e.g., \"en\")"),
        )
        .with(
            "ip",
            text("IP Address", "IP in IPv4 format. (e.g., 216.212.237.213)")
                .with_default_path("$.context.ip"),
        );
    FieldDescriptor::object("Device", "Device information of the event", false, properties)
});

pub static SESSION_ID: LazyLock<FieldDescriptor> = LazyLock::new(|| {
    text(
        "Session ID",
        "Identifier for tracking users regardless of sign-in status. The length should not exceed 128 characters.",
    )
    .with_default_path("$.anonymousId")
});

pub static DECISION_TRACK_ID: LazyLock<FieldDescriptor> = LazyLock::new(|| {
    text(
        "Decision Track ID",
        "Track ID for the event. Track ID is generated by a call to the Decision API.\n  Fill in this field accordingly if the user event is to be associated with a Decision API response.",
    )
});

/// Returns fresh copies of the seven common fields in field-map order.
pub fn common_fields() -> FieldMap {
    FieldMap::new()
        .with(keys::EVENT_ID, EVENT_ID.clone())
        .with(keys::TIMESTAMP, TIMESTAMP.clone())
        .with(keys::CHANNEL_TYPE, CHANNEL_TYPE.clone())
        .with(keys::USER_ID, USER_ID.clone())
        .with(keys::DEVICE, DEVICE.clone())
        .with(keys::SESSION_ID, SESSION_ID.clone())
        .with(keys::DECISION_TRACK_ID, DECISION_TRACK_ID.clone())
}

/// Currency + amount composite shared by revenue, shipping charge and item
/// prices.
pub fn money_field(label: &str, description: &str, required: bool) -> FieldDescriptor {
    let properties = FieldMap::new()
        .with(
            "currency",
            FieldDescriptor::scalar(
                "Currency",
                format!(
                    "{}\n\n  Default: {UNKNOWN_CURRENCY}",
                    currency_options("Currency information.")
                ),
                FieldType::String,
                true,
            )
            .with_default_value(UNKNOWN_CURRENCY),
        )
        .with(
            "amount",
            FieldDescriptor::scalar(
                "Amount",
                "Amount of money. (e.g., 12.34 for $12.34 if currency is \"USD\")",
                FieldType::Number,
                true,
            ),
        );
    FieldDescriptor::object(label, description, required, properties)
}

pub fn items_field(required: bool) -> FieldDescriptor {
    let properties = FieldMap::new()
        .with(
            "id",
            FieldDescriptor::scalar(
                "ID",
                "Unique identifier of the Item.",
                FieldType::String,
                true,
            ),
        )
        .with(
            "price",
            money_field("Price", "Price information of the item", false),
        )
        .with(
            "quantity",
            FieldDescriptor::scalar(
                "Quantity",
                "Quantity of the item. Recommended.",
                FieldType::Number,
                false,
            ),
        )
        .with(
            "itemGroupId",
            text("Item Group ID", "Unique identifier of the Item Group."),
        )
        .with("sellerId", text("Seller ID", "Unique identifier of the Seller."));
    FieldDescriptor::object(
        "Items",
        "Item information list related to the event.",
        required,
        properties,
    )
    .repeated()
}

pub fn revenue_field(required: bool) -> FieldDescriptor {
    money_field("Revenue", "Revenue of the event", required)
}

pub fn search_query_field(required: bool) -> FieldDescriptor {
    FieldDescriptor::scalar(
        "Search Query",
        "Query string for the search.",
        FieldType::String,
        required,
    )
}

pub fn page_id_field(required: bool) -> FieldDescriptor {
    FieldDescriptor::scalar(
        "Page ID",
        "A string that can identify a context of the event,\n  such as \"electronics\", \"categories/12312\", \"azd911d\" or \"/classes/foo/lectures/bar\".\n  Any value is acceptable if it helps identifying unique pages.",
        FieldType::String,
        required,
    )
    .with_default_path("$.context.page.path")
}

pub fn referrer_page_id_field(required: bool) -> FieldDescriptor {
    FieldDescriptor::scalar(
        "Referrer Page ID",
        "Similar to referrer in HTTP, this value indicates from which page the user came to the current page.",
        FieldType::String,
        required,
    )
    .with_default_path("$.context.page.referrer")
}

pub fn shipping_charge_field(required: bool) -> FieldDescriptor {
    money_field(
        "Shipping Charge",
        "Shipping charge's monetary amount in a specific currency.",
        required,
    )
}

/// The six fields whose presence varies by event type, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionalField {
    Items,
    Revenue,
    SearchQuery,
    PageId,
    ReferrerPageId,
    ShippingCharge,
}

impl OptionalField {
    pub const ALL: [OptionalField; 6] = [
        OptionalField::Items,
        OptionalField::Revenue,
        OptionalField::SearchQuery,
        OptionalField::PageId,
        OptionalField::ReferrerPageId,
        OptionalField::ShippingCharge,
    ];

    /// Field-map / instance key.
    pub fn key(self) -> &'static str {
        match self {
            OptionalField::Items => keys::ITEMS,
            OptionalField::Revenue => keys::REVENUE,
            OptionalField::SearchQuery => keys::SEARCH_QUERY,
            OptionalField::PageId => keys::PAGE_ID,
            OptionalField::ReferrerPageId => keys::REFERRER_PAGE_ID,
            OptionalField::ShippingCharge => keys::SHIPPING_CHARGE,
        }
    }

    /// Key of the same field in the wire payload.
    pub fn wire_key(self) -> &'static str {
        match self {
            OptionalField::Items => "items",
            OptionalField::Revenue => "revenue",
            OptionalField::SearchQuery => "search_query",
            OptionalField::PageId => "page_id",
            OptionalField::ReferrerPageId => "referrer_page_id",
            OptionalField::ShippingCharge => "shipping_charge",
        }
    }

    /// Calls the registry factory for this field.
    pub fn descriptor(self, required: bool) -> FieldDescriptor {
        match self {
            OptionalField::Items => items_field(required),
            OptionalField::Revenue => revenue_field(required),
            OptionalField::SearchQuery => search_query_field(required),
            OptionalField::PageId => page_id_field(required),
            OptionalField::ReferrerPageId => referrer_page_id_field(required),
            OptionalField::ShippingCharge => shipping_charge_field(required),
        }
    }
}

//! Which optional fields an event type exposes, and how strictly.

use std::fmt;

use eventshape_core::OptionalField;
use serde::{Deserialize, Serialize};

/// Presence of one optional field in an event schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inclusion {
    /// The field does not exist for this event type.
    #[default]
    Absent,
    Optional,
    Required,
}

impl Inclusion {
    pub fn is_present(self) -> bool {
        self != Inclusion::Absent
    }

    pub fn is_required(self) -> bool {
        self == Inclusion::Required
    }
}

/// `None` means "not configured" and excludes the field; `Some(required)`
/// includes it.
impl From<Option<bool>> for Inclusion {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => Inclusion::Absent,
            Some(false) => Inclusion::Optional,
            Some(true) => Inclusion::Required,
        }
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Inclusion::Absent => "absent",
            Inclusion::Optional => "optional",
            Inclusion::Required => "required",
        };
        f.write_str(s)
    }
}

/// Inclusion of all six optional fields for one event type.
///
/// Deserializes from `{"items": "required", "pageId": "optional"}`;
/// flags that are not mentioned stay [`Inclusion::Absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct InclusionSpec {
    pub items: Inclusion,
    pub revenue: Inclusion,
    pub search_query: Inclusion,
    pub page_id: Inclusion,
    pub referrer_page_id: Inclusion,
    pub shipping_charge: Inclusion,
}

impl InclusionSpec {
    /// Every optional field absent.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn get(&self, field: OptionalField) -> Inclusion {
        match field {
            OptionalField::Items => self.items,
            OptionalField::Revenue => self.revenue,
            OptionalField::SearchQuery => self.search_query,
            OptionalField::PageId => self.page_id,
            OptionalField::ReferrerPageId => self.referrer_page_id,
            OptionalField::ShippingCharge => self.shipping_charge,
        }
    }

    #[must_use]
    pub fn with(mut self, field: OptionalField, inclusion: Inclusion) -> Self {
        let slot = match field {
            OptionalField::Items => &mut self.items,
            OptionalField::Revenue => &mut self.revenue,
            OptionalField::SearchQuery => &mut self.search_query,
            OptionalField::PageId => &mut self.page_id,
            OptionalField::ReferrerPageId => &mut self.referrer_page_id,
            OptionalField::ShippingCharge => &mut self.shipping_charge,
        };
        *slot = inclusion;
        self
    }

    /// Non-absent fields in declared order.
    pub fn enabled(&self) -> impl Iterator<Item = (OptionalField, Inclusion)> + '_ {
        OptionalField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
            .filter(|(_, inclusion)| inclusion.is_present())
    }
}

/// Per-call-site `require*` flags, where an unset flag drops the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequireFlags {
    pub require_items: Option<bool>,
    pub require_revenue: Option<bool>,
    pub require_search_query: Option<bool>,
    pub require_page_id: Option<bool>,
    pub require_referrer_page_id: Option<bool>,
    pub require_shipping_charge: Option<bool>,
}

impl From<RequireFlags> for InclusionSpec {
    fn from(flags: RequireFlags) -> Self {
        Self {
            items: flags.require_items.into(),
            revenue: flags.require_revenue.into(),
            search_query: flags.require_search_query.into(),
            page_id: flags.require_page_id.into(),
            referrer_page_id: flags.require_referrer_page_id.into(),
            shipping_charge: flags.require_shipping_charge.into(),
        }
    }
}

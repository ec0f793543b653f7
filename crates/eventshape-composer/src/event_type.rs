//! The eight event kinds the downstream API understands.

use std::fmt;
use std::str::FromStr;

use eventshape_core::OptionalField;
use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::inclusion::{Inclusion, InclusionSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// A user searching for an item.
    Search,
    /// A user viewing an item page.
    ItemPageView,
    /// A user adding an item to the cart.
    AddToCart,
    /// A user purchasing items.
    Purchase,
    /// A user adding an item to the wishlist.
    AddToWishlist,
    /// A user visiting the home page.
    Home,
    /// A user landing on the site from an external source (e.g. Google Shopping).
    Land,
    /// A user viewing a page relevant to sequence-based model training.
    PageView,
}

impl EventType {
    pub const ALL: [EventType; 8] = [
        EventType::Search,
        EventType::ItemPageView,
        EventType::AddToCart,
        EventType::Purchase,
        EventType::AddToWishlist,
        EventType::Home,
        EventType::Land,
        EventType::PageView,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Search => "SEARCH",
            EventType::ItemPageView => "ITEM_PAGE_VIEW",
            EventType::AddToCart => "ADD_TO_CART",
            EventType::Purchase => "PURCHASE",
            EventType::AddToWishlist => "ADD_TO_WISHLIST",
            EventType::Home => "HOME",
            EventType::Land => "LAND",
            EventType::PageView => "PAGE_VIEW",
        }
    }

    /// Built-in inclusion used when no configuration overrides it.
    pub fn default_inclusion(self) -> InclusionSpec {
        use Inclusion::{Optional, Required};
        use OptionalField::*;

        let pages = InclusionSpec::none()
            .with(PageId, Optional)
            .with(ReferrerPageId, Optional);

        match self {
            EventType::Search => pages.with(SearchQuery, Required).with(Items, Optional),
            EventType::ItemPageView | EventType::AddToCart | EventType::AddToWishlist => {
                pages.with(Items, Required)
            }
            EventType::Purchase => pages
                .with(Items, Required)
                .with(Revenue, Required)
                .with(ShippingCharge, Optional),
            EventType::Home | EventType::Land => {
                pages.with(Items, Optional).with(Revenue, Optional)
            }
            EventType::PageView => pages.with(PageId, Required),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EventError::UnknownEventType(s.to_string()))
    }
}

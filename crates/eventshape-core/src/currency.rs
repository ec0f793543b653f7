//! Currency codes accepted by the downstream API.
//!
//! The catalogue is advisory: it feeds the host-facing description text and
//! [`is_known_currency`], but nothing rejects a code that is not listed.

/// Fallback code for money values that arrive without a currency.
pub const UNKNOWN_CURRENCY: &str = "UNKNOWN_CURRENCY";

/// Known currency codes with their display names, in catalogue order.
pub const CURRENCIES: &[(&str, &str)] = &[
    (UNKNOWN_CURRENCY, "Unknown currency"),
    ("USD", "US Dollar"),
    ("KRW", "Korean Won"),
    ("JPY", "Japanese Yen"),
    ("EUR", "EU Euro"),
    ("GBP", "British Pound"),
    ("SEK", "Swedish Krona"),
    ("INR", "India Rupee"),
    ("THB", "Thailand Baht"),
    ("IDR", "Indonesia Rupiah"),
    ("CNY", "China Yuan"),
    ("CAD", "Canada Dollar"),
    ("RUB", "Russia Ruble"),
    ("BRL", "Brazil Real"),
    ("SGD", "Singapore Dollar"),
    ("HKD", "Hong Kong Dollar"),
    ("AUD", "Australia Dollar"),
    ("PLN", "Poland Zloty"),
    ("DKK", "Denmark Krone"),
    ("VND", "Viet Nam Dong"),
    ("MYR", "Malaysia Ringgit"),
    ("PHP", "Philippines Peso"),
    ("TRY", "Turkey Lira"),
    ("VEF", "Venezuela Bolívar"),
];

pub fn is_known_currency(code: &str) -> bool {
    CURRENCIES.iter().any(|(known, _)| *known == code)
}

/// Renders the catalogue as a host-facing option list, preceded by `intro`.
pub fn currency_options(intro: &str) -> String {
    let mut text = format!("{intro} Available options are the followings");
    for (code, name) in CURRENCIES {
        text.push_str(&format!("\n  {code}: {name}."));
    }
    text
}

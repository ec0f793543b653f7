//! Reads one event instance (JSON) from stdin and prints its wire payload.
//!
//! ```sh
//! echo '{"channelType":"SITE","items":[{"id":"sku1","price":9.5}]}' \
//!   | cargo run -p eventshape-composer --example normalize -- ADD_TO_CART
//! ```

use std::io::{self, Read};

use eventshape_composer::SchemaCatalog;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

fn iso8601_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let event_type = std::env::args().nth(1).unwrap_or_else(|| "HOME".to_string());

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let mut instance: Value = if input.trim().is_empty() {
        json!({ "channelType": "APP" })
    } else {
        serde_json::from_str(&input)?
    };

    // Stamp instances captured without a clock.
    if let Value::Object(obj) = &mut instance {
        obj.entry("timestamp").or_insert_with(|| json!(iso8601_now()));
    }

    let schema = SchemaCatalog::presets().schema(&event_type)?;
    let body = schema.to_json_body(&schema.normalize_value(&instance)?)?;

    serde_json::to_writer_pretty(io::stdout(), &body)?;
    println!();

    Ok(())
}

use serde::{Deserialize, Serialize};

/// A single stock record as held by the inventory service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Store-assigned stable identifier. Never invented locally.
    pub id: i64,
    /// Display name. Non-empty, not guaranteed unique.
    pub name: String,
    /// Units on hand. Decoded leniently — see [`coerce_quantity`].
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: i64,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Write payload for create and full-record-replace update calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: i64,
    pub description: String,
}

impl ItemDraft {
    /// Draft for a brand-new item added from chat (no description yet).
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
            description: String::new(),
        }
    }

    /// Draft that replaces only the quantity of an existing item,
    /// carrying its name and description forward unchanged.
    pub fn requantify(item: &Item, quantity: i64) -> Self {
        Self {
            name: item.name.clone(),
            quantity,
            description: item.description.clone().unwrap_or_default(),
        }
    }
}

/// Normalization rule for quantities arriving off the wire: numbers pass
/// through, numeric strings parse, and anything else (null, booleans,
/// unparseable text, missing fields) becomes 0.
///
/// Keeping this a named step makes "treat non-numeric quantity as 0" a
/// documented invariant instead of an accidental decode detail.
pub fn coerce_quantity(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_quantity(&value))
}

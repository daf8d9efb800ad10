use serde::{Deserialize, Serialize};

/// A classified chat command. Built exactly once by the classifier and
/// immutable afterwards; `Unknown` is an ordinary variant, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    /// List the current snapshot.
    ShowInventory,
    /// Sum quantities across all items.
    TotalStock,
    /// Items with quantity strictly below the threshold.
    LowStock { threshold: i64 },
    /// Case-insensitive substring search on item names.
    Find { query: String },
    /// Create a new item.
    Add { name: String, qty: i64 },
    /// Replace the quantity of an existing item.
    Update { target: Reference, qty: i64 },
    /// Remove an existing item.
    Delete { target: Reference },
    /// Nothing matched; the dispatcher answers with help text.
    Unknown,
}

/// How a mutating command points at an existing item. Produced only by the
/// classifier from the literal target token — never both at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reference {
    ById(i64),
    ByName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tag_serialization() {
        let json = serde_json::to_value(&Command::TotalStock).unwrap();
        assert_eq!(json["kind"], "total_stock");

        let json = serde_json::to_value(&Command::LowStock { threshold: 5 }).unwrap();
        assert_eq!(json["kind"], "low_stock");
        assert_eq!(json["threshold"], 5);
    }

    #[test]
    fn update_by_id_roundtrip() {
        let cmd = Command::Update {
            target: Reference::ById(3),
            qty: 7,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn delete_by_name_roundtrip() {
        let cmd = Command::Delete {
            target: Reference::ByName("Mango".into()),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}

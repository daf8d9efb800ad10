//! Rule-based command classifier — ordered pattern matching over chat text.
//!
//! Each rule is an independent matcher tried in a fixed precedence; the
//! first match wins. Order is part of the contract because the patterns
//! overlap: `show items` is a find, not an inventory listing, and a short
//! unmatched line becomes a bare-word lookup before giving up.

use sp_protocol::{Command, Reference};

/// Low-stock threshold used when the text doesn't carry one.
const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Bounds for the bare-word fallback: anything short enough is treated
/// as a find query instead of an unknown command.
const BARE_QUERY_MAX_LEN: usize = 30;
const BARE_QUERY_MAX_TOKENS: usize = 4;

/// Classify one line of chat input into a command.
///
/// Total and deterministic: every input maps to exactly one command and
/// nothing panics. Keywords match case-insensitively; extracted names and
/// queries keep the user's casing.
pub fn classify(text: &str) -> Command {
    let text = text.trim();
    let lower = text.to_lowercase();

    // ── Mutating patterns (require a strictly numeric count) ────
    if let Some(cmd) = try_add(text) {
        return cmd;
    }
    if let Some(cmd) = try_update(text) {
        return cmd;
    }
    if let Some(cmd) = try_delete(text) {
        return cmd;
    }

    // ── Read-only patterns ──────────────────────────────────────
    if let Some(cmd) = try_find(text) {
        return cmd;
    }
    if let Some(cmd) = try_show_inventory(&lower) {
        return cmd;
    }
    if let Some(cmd) = try_total_stock(&lower) {
        return cmd;
    }
    if let Some(cmd) = try_low_stock(&lower) {
        return cmd;
    }
    if let Some(cmd) = try_bare_query(text) {
        return cmd;
    }

    Command::Unknown
}

/// `add <name> <qty>` / `add item <name> <qty>`. The longer keyword is
/// tried first so the `item` noise word never leaks into the name.
fn try_add(text: &str) -> Option<Command> {
    let rest = strip_keyword(text, "add item").or_else(|| strip_keyword(text, "add"))?;
    let (name, qty) = split_trailing_count(rest)?;
    Some(Command::Add {
        name: name.to_string(),
        qty,
    })
}

/// `update <target> <qty>` / `set <target> <qty>`.
fn try_update(text: &str) -> Option<Command> {
    let rest = strip_keyword(text, "update").or_else(|| strip_keyword(text, "set"))?;
    let (target, qty) = split_trailing_count(rest)?;
    Some(Command::Update {
        target: parse_reference(target),
        qty,
    })
}

/// `delete <target>` / `remove <target>` — the whole remainder is the target.
fn try_delete(text: &str) -> Option<Command> {
    let target = strip_keyword(text, "delete").or_else(|| strip_keyword(text, "remove"))?;
    Some(Command::Delete {
        target: parse_reference(target),
    })
}

/// `find <query>` / `search <query>` / `show <query>`.
fn try_find(text: &str) -> Option<Command> {
    let query = ["find", "search", "show"]
        .iter()
        .find_map(|kw| strip_keyword(text, kw))?;
    Some(Command::Find {
        query: query.to_string(),
    })
}

fn try_show_inventory(lower: &str) -> Option<Command> {
    let is_listing = lower.contains("show inventory")
        || lower == "inventory"
        || lower == "list items"
        || lower == "show items";
    is_listing.then_some(Command::ShowInventory)
}

fn try_total_stock(lower: &str) -> Option<Command> {
    matches_any(lower, &["total stock", "total items", "total quantity"])
        .then_some(Command::TotalStock)
}

/// `low stock` / `low inventory` / `below <N>`. The leftmost occurrence
/// wins, so "low stock below 2" keeps the default threshold.
fn try_low_stock(lower: &str) -> Option<Command> {
    let phrase = ["low stock", "low inventory"]
        .iter()
        .filter_map(|p| lower.find(p))
        .min();
    let below = find_below_threshold(lower);

    let threshold = match (phrase, below) {
        (Some(p), Some((b, _))) if p <= b => DEFAULT_LOW_STOCK_THRESHOLD,
        (_, Some((_, n))) => n,
        (Some(_), None) => DEFAULT_LOW_STOCK_THRESHOLD,
        (None, None) => return None,
    };
    Some(Command::LowStock { threshold })
}

/// Bare-word convenience: a short line that matched nothing else is
/// looked up as a find query.
fn try_bare_query(text: &str) -> Option<Command> {
    let fits = text.len() <= BARE_QUERY_MAX_LEN
        && text.split_whitespace().count() <= BARE_QUERY_MAX_TOKENS;
    fits.then(|| Command::Find {
        query: text.to_string(),
    })
}

// ── Helpers ─────────────────────────────────────────────────────

/// Check if the text contains any of the given patterns.
fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

/// Strip a leading keyword (ASCII case-insensitive) and the mandatory
/// whitespace after it; returns the remainder, leading whitespace removed.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &text[keyword.len()..];
    rest.starts_with(char::is_whitespace)
        .then(|| rest.trim_start())
}

/// Split off a strictly numeric final token: `"Box2 5"` → `("Box2", 5)`.
///
/// The quantity is the trailing digit run; the name is everything before
/// it, so `"Thing 10 20"` splits as `("Thing 10", 20)`. A final token
/// with any non-digit means no match, and the caller's rule falls through.
fn split_trailing_count(rest: &str) -> Option<(&str, i64)> {
    let (head, last) = rest.rsplit_once(char::is_whitespace)?;
    if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((head.trim_end(), last.parse().ok()?))
}

/// All-digit targets refer to ids, everything else to names.
fn parse_reference(target: &str) -> Reference {
    if !target.is_empty()
        && target.bytes().all(|b| b.is_ascii_digit())
        && let Ok(id) = target.parse::<i64>()
    {
        return Reference::ById(id);
    }
    Reference::ByName(target.to_string())
}

/// Find the leftmost `below <digits>` occurrence; returns (position, N).
fn find_below_threshold(lower: &str) -> Option<(usize, i64)> {
    let mut from = 0;
    while let Some(offset) = lower[from..].find("below") {
        let pos = from + offset;
        let after = &lower[pos + "below".len()..];
        let trimmed = after.trim_start();
        if trimmed.len() < after.len()
            && let Some(n) = leading_integer(trimmed)
        {
            return Some((pos, n));
        }
        from = pos + "below".len();
    }
    None
}

/// Parse the digit run at the start of the text, if any.
fn leading_integer(text: &str) -> Option<i64> {
    let end = text
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    text[..end].parse().ok()
}

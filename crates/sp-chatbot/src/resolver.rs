//! Entity resolution — mapping a command's target onto the snapshot.
//!
//! Distinct from find: resolution is exact (ids numerically, names
//! case-insensitively), never fuzzy, and a miss is a normal outcome.

use sp_protocol::{Item, Reference};

/// Resolve a target against the current snapshot.
///
/// Returns the first matching item, or `None` when nothing matches —
/// the caller decides what a miss means.
pub fn resolve<'a>(target: &Reference, items: &'a [Item]) -> Option<&'a Item> {
    match target {
        Reference::ById(id) => items.iter().find(|it| it.id == *id),
        Reference::ByName(name) => {
            let wanted = name.to_lowercase();
            items.iter().find(|it| it.name.to_lowercase() == wanted)
        }
    }
}

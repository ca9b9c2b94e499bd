//! Response normalization
//!
//! Repairs two collection-shape quirks of the LibreNMS API so callers always
//! see a flat, correctly counted list:
//!
//! - `/services` wraps its list in a vestigial outer list (`[[...]]`), which
//!   also pins the reported `count` to 1.
//! - `/devicegroups` and `/services` have no single-item endpoint, so a lookup
//!   fetches the whole collection and filters it client-side.
//!
//! The API's own `count` is never trusted here: it is recomputed from the
//! items actually returned.

use crate::models::Envelope;

/// Items that can be looked up by numeric ID or by name
pub trait Identified {
    /// Numeric ID
    fn id(&self) -> i64;

    /// Name, if the resource has one
    fn name(&self) -> Option<&str>;

    /// Whether `identifier` equals the decimal ID or the name
    fn matches(&self, identifier: &str) -> bool {
        self.id().to_string() == identifier || self.name() == Some(identifier)
    }
}

/// Concatenate the inner lists in order and recount
pub fn flatten_one_level<T>(envelope: &Envelope, nested: Vec<Vec<T>>) -> (Envelope, Vec<T>) {
    let items: Vec<T> = nested.into_iter().flatten().collect();
    (envelope.with_count(items.len()), items)
}

/// Keep only the first item matching `identifier`
///
/// Not finding anything is not an error: the result is an empty list with
/// `count == 0`.
pub fn filter_to_one<T: Identified>(
    envelope: &Envelope,
    items: Vec<T>,
    identifier: &str,
) -> (Envelope, Vec<T>) {
    keep_first(envelope, items, |item| item.matches(identifier))
}

/// Keep only the first item whose numeric ID is `id`
///
/// Names are ignored, so a service named `"12"` never stands in for
/// service 12.
pub fn filter_to_id<T: Identified>(
    envelope: &Envelope,
    items: Vec<T>,
    id: i64,
) -> (Envelope, Vec<T>) {
    keep_first(envelope, items, |item| item.id() == id)
}

fn keep_first<T>(
    envelope: &Envelope,
    items: Vec<T>,
    predicate: impl FnMut(&T) -> bool,
) -> (Envelope, Vec<T>) {
    let found: Vec<T> = items.into_iter().find(predicate).into_iter().collect();
    (envelope.with_count(found.len()), found)
}

//! Swapping two method clusters in place.

use ordo_diagnostics::{Edit, Fix};
use ordo_text_size::{TextRange, overlaps};

/// A fix exchanging the text of two spans, or `None` if they overlap.
pub fn swap_fix(source: &str, previous: TextRange, current: TextRange) -> Option<Fix> {
    if overlaps(previous, current) {
        return None;
    }
    Some(Fix::safe_edits(
        Edit::range_replacement(source[current].to_string(), previous),
        [Edit::range_replacement(source[previous].to_string(), current)],
    ))
}

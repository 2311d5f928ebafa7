//! Movie key construction and key-based conditions.
//!
//! Pure functions. Attribute names are passed through verbatim; whether a
//! name needs an alias is decided when the condition is rendered.

use crate::attribute::{number, string, Item};
use crate::expression::Condition;

use super::{MovieKey, YearRange};

// ============================================================================
// Attribute names
// ============================================================================

/// Partition key, numeric. Reserved word.
pub const YEAR: &str = "Year";
/// Sort key, string.
pub const TITLE: &str = "Title";
/// Optional plot summary, string.
pub const PLOT: &str = "Plot";
/// Optional rank, numeric. Reserved word.
pub const RANK: &str = "Rank";

// ============================================================================
// Keys
// ============================================================================

/// Build the key map `{Year: N, Title: S}` for a movie.
pub fn movie_key(key: &MovieKey) -> Item {
    let mut item = Item::new();
    item.insert(YEAR.to_string(), number(key.year));
    item.insert(TITLE.to_string(), string(key.title.clone()));
    item
}

// ============================================================================
// Conditions
// ============================================================================

/// Guard for an insert that must not overwrite: neither key attribute exists.
pub fn key_absent() -> Condition {
    Condition::attribute_not_exists(YEAR).and(Condition::attribute_not_exists(TITLE))
}

/// Guard for writes that require the item to exist.
pub fn key_present() -> Condition {
    Condition::attribute_exists(YEAR)
}

/// Key condition selecting one partition.
pub fn year_equals(year: i32) -> Condition {
    Condition::equals(YEAR, number(year))
}

/// Filter selecting an inclusive range of years.
pub fn year_between(range: YearRange) -> Condition {
    Condition::between(YEAR, number(range.low), number(range.high))
}

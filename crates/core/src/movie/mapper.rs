//! Decoding of raw item collections into domain records.
//!
//! A malformed item never fails the collection: it is recorded as a
//! [`DecodeFault`] and the remaining items are still decoded.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::attribute::{CodecError, Item};

use super::conversions::item_to_movie;
use super::Movie;

/// A single item that could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("Item {index} could not be decoded: {reason}")]
pub struct DecodeFault {
    /// Position of the item within the response.
    pub index: usize,
    #[serde(serialize_with = "serialize_display")]
    pub reason: CodecError,
}

fn serialize_display<S: Serializer>(reason: &CodecError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

/// Successfully decoded records plus the faults for the items that were dropped.
///
/// Serializes with a `skipped` count next to the faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub faults: Vec<DecodeFault>,
    /// The store had more items than one response page carried.
    pub truncated: bool,
}

impl<T: Serialize> Serialize for Decoded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Decoded", 4)?;
        state.serialize_field("records", &self.records)?;
        state.serialize_field("skipped", &self.faults.len())?;
        state.serialize_field("faults", &self.faults)?;
        state.serialize_field("truncated", &self.truncated)?;
        state.end()
    }
}

impl<T> Decoded<T> {
    /// Number of decoded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when no item was dropped.
    pub fn is_complete(&self) -> bool {
        self.faults.is_empty()
    }
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            faults: Vec::new(),
            truncated: false,
        }
    }
}

/// Decode every item with `decode`, splitting successes from faults.
pub fn decode_items<T, F>(items: &[Item], decode: F) -> Decoded<T>
where
    F: Fn(&Item) -> Result<T, CodecError>,
{
    let mut decoded = Decoded::default();
    for (index, item) in items.iter().enumerate() {
        match decode(item) {
            Ok(record) => decoded.records.push(record),
            Err(reason) => {
                tracing::warn!(index, error = %reason, "Skipping malformed item");
                decoded.faults.push(DecodeFault { index, reason });
            }
        }
    }
    decoded
}

/// Decode a page of items into movies.
pub fn decode_movies(items: &[Item]) -> Decoded<Movie> {
    decode_items(items, item_to_movie)
}

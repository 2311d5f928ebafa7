//! Store attribute values and the codec between them and domain values.
//!
//! `AttributeValue` mirrors the store's tagged-value model. The movie
//! domain only ever produces or consumes the `N` and `S` variants, but the
//! rest are kept so that foreign items can be represented without loss.

mod codec;
mod value;

pub use codec::{
    get_number, get_optional_number, get_optional_string, get_string, number, string, CodecError,
};
pub use value::{AttributeValue, Item};

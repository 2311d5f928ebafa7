//! Functional core of moviedb.
//!
//! Everything here is pure: the movie model, the codec between domain values
//! and store attribute values, expression rendering with reserved-word
//! aliasing, result decoding, and the [`storage::StoreConnection`] seam that
//! the imperative shell implements.

pub mod attribute;
pub mod expression;
pub mod movie;
pub mod storage;

//! Condition, key-condition, filter and update expressions.
//!
//! Conditions are built as typed values and rendered into the store's
//! expression grammar on demand. Rendering is where reserved attribute names
//! get replaced by `#` placeholders; nothing here is shared between requests.

mod builder;
mod condition;
mod reserved;

pub use builder::{
    attribute_ref, render_condition, unaliased_reserved_word, ExpressionAttributes,
    ExpressionBuilder, RenderedExpression,
};
pub use condition::{Condition, UpdateExpression};
pub use reserved::is_reserved;

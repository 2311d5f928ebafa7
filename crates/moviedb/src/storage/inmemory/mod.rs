//! In-memory store connection, used for testing.

mod eval;
mod store;

pub use store::InMemoryStore;

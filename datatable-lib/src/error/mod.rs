//! Error types
//!
//! Table state operations are infallible. Errors only arise at the edges:
//! loading configuration, decoding server pages and committing optimistic
//! cache mutations.

mod config;
mod mutation;
mod query;

pub use config::*;
pub use mutation::*;
pub use query::*;

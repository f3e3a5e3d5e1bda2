//! Shared building blocks for the student registry crates.
//!
//! - `types`: wire types shared between the HTTP layer and its tests.
//! - `utils::logging`: one place to install the tracing subscriber.

pub mod types;
pub mod utils;

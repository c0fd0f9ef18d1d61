//! Cuisine CLI Library
//!
//! Recipe feed client, disk-backed photo cache, cuisine filter pipeline and
//! the list model tying them together. Exposed for the binary and for
//! integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod filter;
pub mod output;

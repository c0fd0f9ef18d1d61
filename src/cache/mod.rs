//! Cache module for storing recipe photos on disk
//!
//! This module provides a cache that persists downloaded photos to the
//! filesystem under a file name derived from a hash of the source URL. A
//! lookup for a URL that is already on disk is answered without touching the
//! network. Entries never expire; they stay until the cache is cleared.

mod manager;

pub use manager::{cache_key, ImageCache};

//! Cache module for persisting menu data to disk
//!
//! This module provides a cache manager that persists fetched menu data to
//! the filesystem with a configurable TTL (time-to-live). Expired and
//! unreadable entries are evicted on read and reported as cache misses, so
//! the provider falls through to its remote strategies instead of serving
//! stale or corrupt data.

mod manager;

pub use manager::{CacheManager, CachedData};

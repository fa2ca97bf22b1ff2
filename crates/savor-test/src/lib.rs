#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for the in-memory store.
pub const TRACING_TARGET_MEMORY: &str = "savor_test::memory";

mod memory;

pub use memory::{MemoryStore, StoreMetrics};

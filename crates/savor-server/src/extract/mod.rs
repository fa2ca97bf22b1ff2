//! Request extractors with consistent `{"error": "..."}` rejections.
//!
//! - [`Json`] - JSON bodies with readable syntax and type errors
//! - [`ValidateJson`] - JSON bodies checked with the `validator` crate
//! - [`Path`] - path parameters
//! - [`Query`] - query string parameters

pub mod reject;

pub use crate::extract::reject::{Json, Path, Query, ValidateJson};

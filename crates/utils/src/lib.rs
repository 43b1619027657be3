//! Shared utilities for tryscope
//!
//! Logging setup and the structured events every crate in the workspace
//! emits while driving scoped blocks.

pub mod tracing;

pub use self::tracing::*;

//! Error types shared by resources, factories and block bodies.
//!
//! A scoped block never rewraps the errors it collects, so the same `Error`
//! type flows through construction, the protected body and every release.

mod builders;
mod extensions;
mod types;

pub use extensions::ResultExt;
pub use types::{BoxError, Error, Result};

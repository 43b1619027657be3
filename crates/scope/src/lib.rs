//! Scoped multi-resource blocks.
//!
//! A block acquires resources left to right, runs a body with all of them
//! live, then releases them right to left whatever happened. Failures are
//! aggregated instead of lost:
//!
//! - a construction failure stops acquisition, releases what was already
//!   acquired and becomes the primary failure; the body never runs;
//! - a body failure is the primary failure;
//! - when nothing failed earlier, the first release failure becomes primary;
//! - every other release failure is suppressed behind the primary, in the
//!   order it was encountered;
//! - absent slots are skipped without comment.
//!
//! ## Examples
//!
//! ```rust
//! use std::borrow::Cow;
//! use tryscope_core::{Error, Outcome, Resource, Result};
//! use tryscope_scope::ScopedBlock;
//!
//! struct Connection(&'static str);
//!
//! impl Resource for Connection {
//!     fn label(&self) -> Cow<'_, str> {
//!         Cow::Borrowed(self.0)
//!     }
//!
//!     fn close(&mut self) -> Result<()> {
//!         Err(Error::release(self.0, "peer already gone"))
//!     }
//! }
//!
//! let outcome = ScopedBlock::new("sync")
//!     .acquire(|| Ok(Connection("primary")))
//!     .acquire_optional(|| Ok(None::<Connection>))
//!     .acquire(|| Ok(Connection("replica")))
//!     .run(|_scope| Ok(()));
//!
//! let failure = match outcome {
//!     Outcome::Failed(failure) => failure,
//!     Outcome::Completed(()) => unreachable!(),
//! };
//! // Released right to left: the replica fails first and becomes primary.
//! assert!(failure.primary().to_string().contains("replica"));
//! assert_eq!(failure.suppressed().len(), 1);
//! ```

pub mod block;
pub mod deferred;
pub mod report;
pub mod scope;

pub use block::{run_scoped, Factory, ScopedBlock};
pub use deferred::Deferred;
pub use report::BlockReport;
pub use scope::Scope;

//! Core domain types and errors for `tryscope`.
//!
//! This crate holds the vocabulary shared by the scoped block and its
//! callers. It has no knowledge of how a block is driven; it only describes
//! what a resource is, how failures are reported and what a finished block
//! hands back.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias used by resources,
//!   factories and block bodies alike.
//! - **`resource`**: the `Resource` trait and the `ResourceId` the block
//!   assigns to every declared slot.
//! - **`outcome`**: `Outcome` and `Failure`, the primary/suppressed failure
//!   aggregate produced by a block.
//! - **`state`**: `BlockState`, the lifecycle a block walks through.

pub mod errors;
pub mod outcome;
pub mod resource;
pub mod state;

pub use self::{
    errors::{Error, Result, ResultExt},
    outcome::{Failure, Outcome},
    resource::{AsAny, Resource, ResourceId},
    state::BlockState,
};

//! Resources the commands scope.

pub mod announce;
pub mod file;
pub mod lines;

pub use announce::{AnotherCloseFailure, AnotherResource, CloseFailure, MyResource, Transcript};
pub use file::{AppendFile, BufferedLines};
pub use lines::LineSource;

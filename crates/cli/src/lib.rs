pub mod commands;
pub mod config;
mod execute;
pub mod resources;

pub use commands::{Commands, Scenario};
pub use config::DemoConfig;

/// Commands fail with the block's aggregated failure.
pub type CommandResult<T> = std::result::Result<T, tryscope_core::Failure>;

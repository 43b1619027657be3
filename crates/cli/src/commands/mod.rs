use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod demo;
pub mod lines;
pub mod write;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Append a timestamped line to the configured file
    #[command(visible_alias = "w")]
    Write {
        /// Text to append
        text: String,
    },

    /// Print every line of a file
    #[command(visible_alias = "l")]
    Lines {
        /// File to read
        path: PathBuf,
    },

    /// Walk through how a scoped block acquires and releases
    Demo {
        /// Which scenario to run
        #[arg(value_enum, default_value_t = Scenario::All)]
        scenario: Scenario,
    },
}

/// The walkthroughs the `demo` command knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// One live resource next to an absent slot
    Absent,
    /// Two resources, showing acquisition and release order
    Order,
    /// Several resources failing on close
    Suppressed,
    /// Every scenario above, in turn
    All,
}

impl Scenario {
    /// The concrete scenarios `self` stands for
    pub fn expand(self) -> &'static [Scenario] {
        match self {
            Scenario::Absent => &[Scenario::Absent],
            Scenario::Order => &[Scenario::Order],
            Scenario::Suppressed => &[Scenario::Suppressed],
            Scenario::All => &[Scenario::Absent, Scenario::Order, Scenario::Suppressed],
        }
    }
}

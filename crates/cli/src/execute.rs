use crate::commands::{demo, lines, write, Commands};
use crate::config::DemoConfig;
use crate::CommandResult;
use std::io::Write;

impl Commands {
    pub fn execute(self, config: &DemoConfig, out: &mut dyn Write) -> CommandResult<()> {
        match self {
            Commands::Write { text } => write::execute(config, &text, out).map(|_| ()),
            Commands::Lines { path } => lines::execute(&path, out),
            Commands::Demo { scenario } => demo::execute(scenario, out),
        }
    }
}

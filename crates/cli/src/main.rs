use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use tryscope_cli::commands::{Commands, Scenario};
use tryscope_cli::config::DemoConfig;

#[derive(Parser)]
#[command(name = "tryscope")]
#[command(about = "Scoped resources released in reverse order, failures kept", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory the write command appends to
    #[arg(long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// File name the write command appends to
    #[arg(long, global = true)]
    file_name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tryscope_utils::init().map_err(|e| eyre::eyre!("failed to initialize logging: {e}"))?;

    let config =
        DemoConfig::load(cli.config.as_deref())?.with_overrides(cli.output_dir, cli.file_name);

    // Without a subcommand, walk through every scenario
    let command = cli.command.unwrap_or(Commands::Demo {
        scenario: Scenario::All,
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    command.execute(&config, &mut out)?;
    out.flush()?;
    Ok(())
}

use crate::config::DemoConfig;
use crate::resources::{AppendFile, BufferedLines};
use crate::CommandResult;
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;
use tryscope_scope::ScopedBlock;

/// Append `"(timestamp) text"` on a new line of the configured file.
///
/// Returns the path written to. The configuration is validated first, so a
/// bad file name or timestamp format fails before anything is opened.
pub fn execute(config: &DemoConfig, text: &str, out: &mut dyn Write) -> CommandResult<PathBuf> {
    config.validate()?;
    let path = config.output_path();
    let line = format!("({}) {}", Local::now().format(&config.timestamp_format), text);

    ScopedBlock::new("write")
        .acquire(|| AppendFile::open(&path))
        .acquire_with(|scope| BufferedLines::over(scope.get::<AppendFile>(0)?))
        .run(|scope| {
            let lines = scope.get_mut::<BufferedLines>(1)?;
            lines.new_line()?;
            lines.write(&line)
        })
        .into_result()?;

    tracing::info!(path = %path.display(), "file_written");
    writeln!(out, "File written!").map_err(tryscope_core::Error::from)?;
    Ok(path)
}

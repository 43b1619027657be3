use crate::resources::LineSource;
use crate::CommandResult;
use std::io::Write;
use std::path::Path;
use tryscope_core::Error;
use tryscope_scope::ScopedBlock;

/// Print every line of `path`, or say that it does not exist.
pub fn execute(path: &Path, out: &mut dyn Write) -> CommandResult<()> {
    if !path.exists() {
        writeln!(out, "The file {} does not exist!", path.display()).map_err(Error::from)?;
        return Ok(());
    }

    ScopedBlock::new("lines")
        .acquire(|| LineSource::open(path))
        .run(|scope| {
            let source = scope.get_mut::<LineSource>(0)?;
            for line in source.lines() {
                writeln!(out, "{}", line?)?;
            }
            Ok(())
        })
        .into_result()
}

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tryscope_core::{Error, Resource, Result};

/// A text file read line by line.
#[derive(Debug)]
pub struct LineSource {
    path: PathBuf,
    reader: Option<BufReader<File>>,
}

impl LineSource {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::open(&path).map_err(|e| {
            Error::construction_with_source("LineSource", format!("cannot open {}", path.display()), e)
        })?;
        Ok(Self {
            path,
            reader: Some(BufReader::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remaining lines, without their terminators.
    pub fn lines(&mut self) -> impl Iterator<Item = Result<String>> + '_ {
        let path = &self.path;
        self.reader
            .iter_mut()
            .flat_map(|reader| reader.lines())
            .map(move |line| {
                line.map_err(|e| Error::body_with_source(format!("reading {} failed", path.display()), e))
            })
    }
}

impl Resource for LineSource {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed("LineSource")
    }

    fn close(&mut self) -> Result<()> {
        self.reader = None;
        Ok(())
    }
}

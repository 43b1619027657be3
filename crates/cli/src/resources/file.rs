//! Appending to a text file through a buffered writer.

use std::borrow::Cow;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tryscope_core::{Error, Resource, Result};

/// A file opened for appending, created along with its parent directory
/// when missing.
#[derive(Debug)]
pub struct AppendFile {
    path: PathBuf,
    file: File,
}

impl AppendFile {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::construction_with_source(
                    "AppendFile",
                    format!("cannot create directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                Error::construction_with_source(
                    "AppendFile",
                    format!("cannot open {}", path.display()),
                    e,
                )
            })?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A second handle on the same open file.
    pub fn handle(&self) -> Result<File> {
        self.file.try_clone().map_err(|e| {
            Error::construction_with_source(
                "BufferedLines",
                format!("cannot share handle on {}", self.path.display()),
                e,
            )
        })
    }
}

impl Resource for AppendFile {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed("AppendFile")
    }

    fn close(&mut self) -> Result<()> {
        self.file.sync_data().map_err(|e| {
            Error::release_with_source("AppendFile", format!("sync of {} failed", self.path.display()), e)
        })
    }
}

/// Line-oriented buffered writer over an [`AppendFile`].
///
/// Nothing reaches the file until release flushes the buffer, so this must
/// be released before the file it wraps.
#[derive(Debug)]
pub struct BufferedLines {
    writer: BufWriter<File>,
}

impl BufferedLines {
    pub fn over(file: &AppendFile) -> Result<Self> {
        Ok(Self {
            writer: BufWriter::new(file.handle()?),
        })
    }

    pub fn new_line(&mut self) -> Result<()> {
        self.write("\n")
    }

    pub fn write(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|e| Error::body_with_source("buffered write failed", e))
    }
}

impl Resource for BufferedLines {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed("BufferedLines")
    }

    fn close(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::release_with_source("BufferedLines", "flush failed", e))
    }
}

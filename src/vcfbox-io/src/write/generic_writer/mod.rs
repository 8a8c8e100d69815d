use std::{fs::File, io::{Write, BufWriter}, path::Path};
use anyhow::Result;

use located_error::LocatedError;

pub mod error;
pub use error::WriterError;

/// A buffered, line-oriented text file writer.
pub struct GenericWriter {
    source: BufWriter<File>
}

impl GenericWriter {
    /// Create (or truncate) the file at `path`.
    ///
    /// # Errors
    /// if `path` is either an invalid file, or the user does not have the proper
    /// UNIX permissions to write at this location.
    pub fn new(path: impl AsRef<Path>) -> Result<GenericWriter> {
        let file = File::create(path).map_err(WriterError::IOError).loc("While creating file")?;
        Ok(GenericWriter{source: BufWriter::new(file)})
    }

    /// Write a single line.
    ///
    /// # Errors
    /// - if `line` fails to get written.
    pub fn write_line<I: std::fmt::Display>(&mut self, line: I) -> Result<()> {
        writeln!(self.source, "{line}").map_err(WriterError::IOError).loc("While writing line into file")
    }

    /// # Errors
    /// - if the inner buffer cannot be flushed.
    pub fn flush(&mut self) -> Result<()> {
        self.source.flush().map_err(WriterError::IOError).loc("While flushing buffer contents of Writer")
    }
}

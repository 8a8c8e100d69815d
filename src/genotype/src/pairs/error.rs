use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PairListError {
    #[error("Failed to open sample pair file '{}'", .path.display())]
    Open{path: PathBuf, #[source] source: std::io::Error},

    #[error("Failed to read line {line} of the sample pair list")]
    Read{line: usize, #[source] source: std::io::Error},
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError{
    #[error("File {0} does not exist")]
    MissingFile(String),

    #[error("{0} is not a file")]
    NotAFile(String),

    #[error("Failed to serialize command line arguments")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Unable to write arguments into '{}'", .0.display())]
    WriteYaml(PathBuf, #[source] std::io::Error),

    #[error("Unable to open '{}'", .0.display())]
    OpenYaml(PathBuf, #[source] std::io::Error),

    #[error("Unable to deserialize arguments from '{}'", .0.display())]
    Deserialize(PathBuf, #[source] serde_yaml::Error),
}

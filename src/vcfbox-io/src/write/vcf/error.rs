use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariantWriterError {
    #[error("Failed to create output variant file '{}'", .path.display())]
    Create{path: PathBuf, #[source] source: rust_htslib::errors::Error},

    #[error("Failed to allocate {0} compression thread(s)")]
    SetThreads(usize, #[source] rust_htslib::errors::Error),

    #[error("Contig '{0}' is not declared within the output header")]
    UnknownContig(String),

    #[error("Invalid record position: {0}")]
    InvalidPosition(u64),

    #[error("Record carries {found} genotype(s), while the output header declares {expected} sample(s)")]
    GenotypeCount{expected: usize, found: usize},

    #[error("Failed to fill the output record")]
    FillRecord(#[source] rust_htslib::errors::Error),

    #[error("Failed to write record into '{}'", .path.display())]
    Write{path: PathBuf, #[source] source: rust_htslib::errors::Error},
}

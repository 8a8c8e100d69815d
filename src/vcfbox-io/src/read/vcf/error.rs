use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariantReaderError {
    #[error("Failed to open variant file '{}'", .path.display())]
    Open{path: PathBuf, #[source] source: rust_htslib::errors::Error},

    #[error("Failed to allocate {0} decompression thread(s)")]
    SetThreads(usize, #[source] rust_htslib::errors::Error),

    #[error("Failed to read the next record of the variant file")]
    ReadRecord(#[source] rust_htslib::errors::Error),

    #[error("Record does not point to any contig")]
    MissingContig,

    #[error("Failed to resolve contig #{0} from the input header")]
    UnknownContig(u32, #[source] rust_htslib::errors::Error),

    #[error("Invalid record position: {0}")]
    InvalidPosition(i64),

    #[error("Variant file field contains invalid UTF-8 data")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

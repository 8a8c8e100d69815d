use anyhow::Result;
use genotype::{InputHeader, Site};

mod vcf;
pub use vcf::{VcfReader, VariantReaderError, count_records};

/// A streaming source of decoded variant sites.
pub trait VariantSource {
    /// Header information of the underlying file.
    fn header(&self) -> &InputHeader;

    /// Decode the next site of the stream. `None` once the stream is exhausted.
    ///
    /// Per-site genotype decoding failures are not errors at this level: they are carried by `Site::genotypes`.
    fn next_site(&mut self) -> Option<Result<Site>>;
}

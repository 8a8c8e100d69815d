use anyhow::Result;
use genotype::OutputSite;

mod vcf;
pub use vcf::{VcfWriter, VariantWriterError};

mod mode;
pub use mode::OutputMode;

pub mod generic_writer;
pub use generic_writer::GenericWriter;

/// A destination for combined variant records. The header is expected to be written
/// when the sink gets created.
pub trait VariantSink {
    /// Append a single record.
    fn write_site(&mut self, site: &OutputSite) -> Result<()>;
}

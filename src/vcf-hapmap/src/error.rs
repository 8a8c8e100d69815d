use thiserror::Error;

use genotype::DecodeFailure;

/// Reasons for a site to be left out of a HapMap table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HapMapError {
    #[error("Site carries {0} alleles. Only bi-allelic sites can be converted")]
    MultiAllelic(usize),

    #[error("Site does not carry any alternate allele")]
    Monomorphic,

    #[error(transparent)]
    Undecodable(#[from] DecodeFailure),
}

use thiserror::Error;

/// Per-site genotype decoding failure. Recovered from by skipping the offending site.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error("Failed to retrieve the GT field: {0}")]
    MissingGenotypes(String),

    #[error("Sample #{sample} carries {ploidy} alleles. Only haploid and diploid calls are supported")]
    UnsupportedPloidy{sample: usize, ploidy: usize},

    #[error("Expected {expected} genotype calls, found {found}")]
    SampleCount{expected: usize, found: usize},
}

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCallError {
    #[error("Failed to parse '{0}' into a valid allele index")]
    InvalidAllele(String),

    #[error("'{0}' carries more than two alleles. Only diploid genotypes are supported")]
    Polyploid(String),
}

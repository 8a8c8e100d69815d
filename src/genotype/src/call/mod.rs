use std::{fmt::{self, Display, Formatter}, str::FromStr};

mod error;
pub use error::ParseCallError;

/// A single allele of a genotype call: either an index into the site's allele list
/// (`0` = REF, `1..` = ALT), or a missing value (`.`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allele {
    Index(u32),
    Missing,
}

impl Allele {
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    #[must_use]
    pub fn index(&self) -> Option<u32> {
        match self {
            Self::Index(idx) => Some(*idx),
            Self::Missing    => None,
        }
    }
}

impl Display for Allele {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "{idx}"),
            Self::Missing    => write!(f, "."),
        }
    }
}

impl FromStr for Allele {
    type Err = ParseCallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "." => Ok(Self::Missing),
            _   => s.parse::<u32>()
                .map(Self::Index)
                .map_err(|_| ParseCallError::InvalidAllele(s.to_string()))
        }
    }
}

/// A diploid genotype call. Haploid calls are stored with a missing second allele.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenotypeCall {
    alleles: [Allele; 2],
    phased : bool,
}

impl GenotypeCall {
    /// Fully missing, unphased genotype (`./.`)
    pub const MISSING: Self = Self{alleles: [Allele::Missing, Allele::Missing], phased: false};

    #[must_use]
    pub fn new(alleles: [Allele; 2], phased: bool) -> Self {
        Self{alleles, phased}
    }

    #[must_use]
    pub fn unphased(first: Allele, second: Allele) -> Self {
        Self::new([first, second], false)
    }

    #[must_use]
    pub fn alleles(&self) -> [Allele; 2] {
        self.alleles
    }

    #[must_use]
    pub fn first(&self) -> Allele {
        self.alleles[0]
    }

    #[must_use]
    pub fn second(&self) -> Allele {
        self.alleles[1]
    }

    #[must_use]
    pub fn is_phased(&self) -> bool {
        self.phased
    }

    /// true if at least one of the two alleles is missing.
    #[must_use]
    pub fn has_missing(&self) -> bool {
        self.alleles.iter().any(Allele::is_missing)
    }

    /// true if both alleles are called, and point to the same index.
    #[must_use]
    pub fn is_homozygous(&self) -> bool {
        !self.first().is_missing() && self.first() == self.second()
    }
}

impl Display for GenotypeCall {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let separator = if self.phased { '|' } else { '/' };
        write!(f, "{}{separator}{}", self.first(), self.second())
    }
}

/// Parse a VCF-style `GT` string (`0/1`, `1|1`, `./.`, `.`, `1`)
impl FromStr for GenotypeCall {
    type Err = ParseCallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let phased = s.contains('|');
        let mut fields = s.split(|c: char| c == '/' || c == '|');

        let first  = fields.next().unwrap_or(".").parse::<Allele>()?;
        let second = match fields.next() {
            Some(allele) => allele.parse::<Allele>()?,
            None         => Allele::Missing,
        };

        if fields.next().is_some() {
            return Err(ParseCallError::Polyploid(s.to_string()))
        }
        Ok(Self::new([first, second], phased))
    }
}

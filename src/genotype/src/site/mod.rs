use crate::call::GenotypeCall;

mod error;
pub use error::DecodeFailure;

/// One decoded record of the input variant file.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// Contig name, as declared in the input header.
    pub contig   : String,
    /// 1-based position.
    pub position : u64,
    pub id       : String,
    /// Reference allele, followed by every alternate allele.
    pub alleles  : Vec<String>,
    pub quality  : Option<f32>,
    /// One call per input sample, or the reason why genotypes could not be decoded.
    pub genotypes: Result<Vec<GenotypeCall>, DecodeFailure>,
}

impl Site {
    #[must_use]
    pub fn allele_count(&self) -> usize {
        self.alleles.len()
    }

    /// true if the site carries more than one alternate allele.
    #[must_use]
    pub fn is_multiallelic(&self) -> bool {
        self.allele_count() > 2
    }

    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.alleles.first().map(String::as_str)
    }

    #[must_use]
    pub fn alternates(&self) -> &[String] {
        self.alleles.get(1..).unwrap_or_default()
    }

    /// # Errors
    /// - the `DecodeFailure` raised while decoding this site's genotypes.
    pub fn calls(&self) -> Result<&[GenotypeCall], DecodeFailure> {
        self.genotypes.as_deref().map_err(Clone::clone)
    }
}

/// Everything an output record copies verbatim from its input site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSkeleton {
    pub contig  : String,
    pub position: u64,
    pub id      : String,
    pub alleles : Vec<String>,
    pub quality : Option<f32>,
}

/// A fully assembled output record.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSite {
    pub skeleton : SiteSkeleton,
    pub genotypes: Vec<GenotypeCall>,
}

impl OutputSite {
    #[must_use]
    pub fn new(skeleton: SiteSkeleton, genotypes: Vec<GenotypeCall>) -> Self {
        Self{skeleton, genotypes}
    }
}

pub struct RecordProjector;

impl RecordProjector {
    /// Copy the site coordinates, identifier, alleles and quality. Genotypes are left out.
    /// Contigs are carried by name: resolving them against the output header is up to the writer.
    #[must_use]
    pub fn project(site: &Site) -> SiteSkeleton {
        SiteSkeleton {
            contig  : site.contig.clone(),
            position: site.position,
            id      : site.id.clone(),
            alleles : site.alleles.clone(),
            quality : site.quality,
        }
    }
}

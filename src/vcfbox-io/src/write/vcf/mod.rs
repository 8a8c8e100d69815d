use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;
use rust_htslib::bcf::{self, record::{GenotypeAllele, Numeric}};

use genotype::{Allele, GenotypeCall, OutputHeader, OutputSite};
use located_error::{loc, LocatedError};

use crate::write::{OutputMode, VariantSink};

mod error;
pub use error::VariantWriterError;

/// htslib-backed VCF/BCF writer. The header is written at creation.
pub struct VcfWriter {
    inner    : bcf::Writer,
    path     : PathBuf,
    n_samples: usize,
}

impl VcfWriter {
    /// Create `path` and write `header` into it.
    ///
    /// The output header only declares the contigs, the `GT` field and the samples of `header`.
    ///
    /// # Errors
    /// - if `path` cannot be created.
    /// - if `threads` > 0 and htslib fails to set up its compression thread pool.
    pub fn create(path: &Path, header: &OutputHeader, mode: OutputMode, threads: usize) -> Result<Self> {
        use VariantWriterError::{Create, SetThreads};
        let loc_msg = || format!("While creating '{}'", path.display());

        let mut hts_header = bcf::Header::new();
        for line in header.meta_lines() {
            hts_header.push_record(line.as_bytes());
        }
        for sample in header.roster().names() {
            hts_header.push_sample(sample.as_bytes());
        }

        let (uncompressed, format) = mode.htslib_args();
        let mut inner = bcf::Writer::from_path(path, &hts_header, uncompressed, format)
            .map_err(|source| Create{path: path.to_path_buf(), source})
            .with_loc(loc_msg)?;

        if threads > 0 {
            inner.set_threads(threads).map_err(|e| SetThreads(threads, e)).with_loc(loc_msg)?;
        }

        debug!("Writing {mode} output to '{}' ({} sample(s))", path.display(), header.roster().len());
        Ok(Self{inner, path: path.to_path_buf(), n_samples: header.roster().len()})
    }
}

impl VariantSink for VcfWriter {
    fn write_site(&mut self, site: &OutputSite) -> Result<()> {
        use VariantWriterError::{UnknownContig, InvalidPosition, GenotypeCount, FillRecord, Write};
        let skeleton = &site.skeleton;
        let loc_msg  = || format!("While writing record {}:{}", skeleton.contig, skeleton.position);

        if site.genotypes.len() != self.n_samples {
            return loc!(GenotypeCount{expected: self.n_samples, found: site.genotypes.len()})
        }

        // Contigs are resolved by name: the output header may not share the input contig ordering.
        let rid = self.inner.header().name2rid(skeleton.contig.as_bytes())
            .map_err(|_| UnknownContig(skeleton.contig.clone()))
            .with_loc(loc_msg)?;

        let pos = skeleton.position.checked_sub(1)
            .and_then(|pos| i64::try_from(pos).ok())
            .ok_or(InvalidPosition(skeleton.position))
            .with_loc(loc_msg)?;

        let mut record = self.inner.empty_record();
        record.set_rid(Some(rid));
        record.set_pos(pos);
        record.set_id(skeleton.id.as_bytes()).map_err(FillRecord).with_loc(loc_msg)?;

        let alleles: Vec<&[u8]> = skeleton.alleles.iter().map(String::as_bytes).collect();
        record.set_alleles(&alleles).map_err(FillRecord).with_loc(loc_msg)?;
        record.set_qual(skeleton.quality.unwrap_or_else(f32::missing));

        if !site.genotypes.is_empty() {
            let genotypes: Vec<GenotypeAllele> = site.genotypes.iter().flat_map(encode_call).collect();
            record.push_genotypes(&genotypes).map_err(FillRecord).with_loc(loc_msg)?;
        }

        self.inner.write(&record)
            .map_err(|source| Write{path: self.path.clone(), source})
            .with_loc(loc_msg)
    }
}

/// htslib carries the phase on the second allele.
fn encode_call(call: &GenotypeCall) -> [GenotypeAllele; 2] {
    [encode_allele(call.first(), false), encode_allele(call.second(), call.is_phased())]
}

fn encode_allele(allele: Allele, phased: bool) -> GenotypeAllele {
    match (allele.index().and_then(|idx| i32::try_from(idx).ok()), phased) {
        (Some(idx), false) => GenotypeAllele::Unphased(idx),
        (Some(idx), true)  => GenotypeAllele::Phased(idx),
        (None, false)      => GenotypeAllele::UnphasedMissing,
        (None, true)       => GenotypeAllele::PhasedMissing,
    }
}

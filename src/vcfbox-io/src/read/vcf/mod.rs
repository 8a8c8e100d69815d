use std::path::{Path, PathBuf};

use anyhow::Result;
use itertools::Itertools;
use log::{debug, trace};
use rust_htslib::bcf::{
    self,
    Read as BcfRead,
    header::{HeaderRecord, HeaderView},
    record::{GenotypeAllele, Numeric},
    Record,
};

use genotype::{Allele, DecodeFailure, GenotypeCall, InputHeader, Site};
use located_error::LocatedError;

use crate::{progress::ProgressSink, read::VariantSource};

mod error;
pub use error::VariantReaderError;

/// Streaming VCF/BCF reader (plain, bgzipped or binary: htslib sniffs the format).
pub struct VcfReader {
    inner : bcf::Reader,
    record: Record,
    header: InputHeader,
    source: PathBuf,
}

impl VcfReader {
    /// Open a variant file and parse its header.
    ///
    /// # Errors
    /// - if `path` cannot be opened, or is not a valid VCF/BCF file.
    /// - if `threads` > 0 and htslib fails to set up its decompression thread pool.
    /// - if sample names contain invalid UTF-8
    pub fn new(path: &Path, threads: usize) -> Result<Self> {
        use VariantReaderError::{Open, SetThreads};
        let loc_msg = || format!("While opening '{}'", path.display());
        let mut inner = bcf::Reader::from_path(path)
            .map_err(|source| Open{path: path.to_path_buf(), source})
            .with_loc(loc_msg)?;

        if threads > 0 {
            inner.set_threads(threads).map_err(|e| SetThreads(threads, e)).with_loc(loc_msg)?;
        }

        let header = Self::parse_header(inner.header()).with_loc(loc_msg)?;
        debug!("Found {} contig(s) and {} sample(s) within '{}'", header.contigs.len(), header.roster.len(), path.display());
        let record = inner.empty_record();
        Ok(Self{inner, record, header, source: path.to_path_buf()})
    }

    /// Extract contig definitions, the `GT` definition and the sample roster.
    fn parse_header(view: &HeaderView) -> Result<InputHeader> {
        let mut header = InputHeader::default();
        for record in view.header_records() {
            match record {
                HeaderRecord::Contig{key, values} => {
                    header.contigs.push(render_header_line(&key, values.iter()));
                },
                HeaderRecord::Format{key, values} if values.get("ID").is_some_and(|id| id == "GT") => {
                    header.genotype_field = Some(render_header_line(&key, values.iter()));
                },
                _ => {}
            }
        }

        header.roster = view.samples().into_iter()
            .map(|name| std::str::from_utf8(name).map(ToString::to_string))
            .collect::<Result<Vec<_>, _>>()
            .map_err(VariantReaderError::InvalidUtf8)
            .loc("While parsing sample names")?;
        Ok(header)
    }

    /// Decode the record currently held within the inner buffer.
    fn current_site(&self) -> Result<Site> {
        use VariantReaderError::{MissingContig, UnknownContig, InvalidPosition, InvalidUtf8};
        let record = &self.record;

        let rid    = record.rid().ok_or(MissingContig).loc("While decoding record")?;
        let contig = record.header().rid2name(rid).map_err(|e| UnknownContig(rid, e)).loc("While decoding record")?;
        let contig = std::str::from_utf8(contig).map_err(InvalidUtf8).loc("While decoding contig name")?.to_string();

        let position = u64::try_from(record.pos()).map_err(|_| InvalidPosition(record.pos())).loc("While decoding record")? + 1;
        let id       = String::from_utf8_lossy(&record.id()).into_owned();
        let alleles  = record.alleles().into_iter()
            .map(|allele| String::from_utf8_lossy(allele).into_owned())
            .collect();

        let quality = Some(record.qual()).filter(|qual| !qual.is_missing());
        let genotypes = decode_genotypes(record, self.header.roster.len());
        Ok(Site{contig, position, id, alleles, quality, genotypes})
    }
}

impl VariantSource for VcfReader {
    fn header(&self) -> &InputHeader {
        &self.header
    }

    fn next_site(&mut self) -> Option<Result<Site>> {
        use VariantReaderError::ReadRecord;
        match self.inner.read(&mut self.record)? {
            Ok(())  => Some(self.current_site()),
            Err(e) => Some(Err(ReadRecord(e)).with_loc(|| format!("While reading '{}'", self.source.display()))),
        }
    }
}

/// `##{key}=<k1=v1,k2=v2,...>`. htslib's internal `IDX` key is left out.
fn render_header_line<'a>(key: &str, values: impl Iterator<Item = (&'a String, &'a String)>) -> String {
    let fields = values.filter(|(k, _)| k.as_str() != "IDX")
        .map(|(k, v)| format!("{k}={v}"))
        .join(",");
    format!("##{key}=<{fields}>")
}

/// Decode the `GT` field of every sample. A lone allele (haploid call) is padded with a missing value.
fn decode_genotypes(record: &Record, n_samples: usize) -> Result<Vec<GenotypeCall>, DecodeFailure> {
    let genotypes = record.genotypes().map_err(|e| DecodeFailure::MissingGenotypes(e.to_string()))?;

    let found = record.sample_count() as usize;
    if found != n_samples {
        return Err(DecodeFailure::SampleCount{expected: n_samples, found})
    }

    (0..n_samples).map(|sample| {
        let genotype = genotypes.get(sample);
        match &genotype[..] {
            []              => Ok(GenotypeCall::MISSING),
            [first]         => Ok(GenotypeCall::unphased(to_allele(first), Allele::Missing)),
            [first, second] => {
                let phased = matches!(second, GenotypeAllele::Phased(_) | GenotypeAllele::PhasedMissing);
                Ok(GenotypeCall::new([to_allele(first), to_allele(second)], phased))
            },
            alleles => Err(DecodeFailure::UnsupportedPloidy{sample, ploidy: alleles.len()})
        }
    }).collect()
}

fn to_allele(allele: &GenotypeAllele) -> Allele {
    match allele {
        GenotypeAllele::Unphased(idx) | GenotypeAllele::Phased(idx) => u32::try_from(*idx).map_or(Allele::Missing, Allele::Index),
        GenotypeAllele::UnphasedMissing | GenotypeAllele::PhasedMissing => Allele::Missing,
    }
}

/// Count every record of a variant file, notifying `progress` along the way.
///
/// # Errors
/// - if `path` cannot be opened or if any record fails to be read.
pub fn count_records<P: ProgressSink + ?Sized>(path: &Path, threads: usize, progress: &P) -> Result<u64> {
    use VariantReaderError::{Open, SetThreads, ReadRecord};
    let loc_msg = || format!("While counting records of '{}'", path.display());
    let mut reader = bcf::Reader::from_path(path)
        .map_err(|source| Open{path: path.to_path_buf(), source})
        .with_loc(loc_msg)?;
    if threads > 0 {
        reader.set_threads(threads).map_err(|e| SetThreads(threads, e)).with_loc(loc_msg)?;
    }

    let mut record = reader.empty_record();
    let mut count  = 0u64;
    while let Some(result) = reader.read(&mut record) {
        result.map_err(ReadRecord).with_loc(loc_msg)?;
        count += 1;
        progress.increment();
    }
    progress.finish();
    trace!("'{}' contains {count} record(s)", path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MockProgressSink;
    use pretty_assertions::assert_eq;
    use std::{fs::File, io::Write};

    const TEST_VCF: &str = "\
##fileformat=VCFv4.2
##FILTER=<ID=PASS,Description=\"All filters passed\">
##contig=<ID=chr1,length=1000>
##contig=<ID=chr2,length=500>
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Read Depth\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tP1\tP2\tP3
chr1\t100\trs1\tA\tC\t50\tPASS\tDP=10\tGT\t0/0\t1|1\t./.
chr1\t200\trs2\tA\tC,G\t.\t.\t.\tGT\t0/1\t2\t0/0
chr2\t300\t.\tG\tT\t.\t.\t.\tGT\t0/1/1\t0/0\t0/0
chr2\t400\trs4\tT\tA\t.\t.\t.\tDP\t3\t4\t5
";

    fn write_vcf(dir: &Path, contents: &str) -> Result<PathBuf> {
        let path = dir.join("test.vcf");
        File::create(&path)?.write_all(contents.as_bytes())?;
        Ok(path)
    }

    fn gt(s: &str) -> GenotypeCall {
        s.parse().expect("Invalid test genotype")
    }

    #[test]
    fn parse_header() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let reader = VcfReader::new(&write_vcf(tmpdir.path(), TEST_VCF)?, 0)?;
        let header = reader.header();

        assert_eq!(header.contigs, ["##contig=<ID=chr1,length=1000>", "##contig=<ID=chr2,length=500>"]);
        assert_eq!(header.genotype_field.as_deref(), Some("##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">"));
        assert_eq!(header.roster, ["P1", "P2", "P3"]);
        Ok(())
    }

    #[test]
    fn read_sites() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let mut reader = VcfReader::new(&write_vcf(tmpdir.path(), TEST_VCF)?, 0)?;

        let site = reader.next_site().expect("Missing first site")?;
        assert_eq!(site.contig, "chr1");
        assert_eq!(site.position, 100);
        assert_eq!(site.id, "rs1");
        assert_eq!(site.alleles, ["A", "C"]);
        assert_eq!(site.quality, Some(50.0));
        assert_eq!(site.genotypes, Ok(vec![gt("0/0"), gt("1|1"), gt("./.")]));

        let site = reader.next_site().expect("Missing second site")?;
        assert!(site.is_multiallelic());
        assert_eq!(site.quality, None);
        assert_eq!(site.genotypes, Ok(vec![gt("0/1"), gt("2/."), gt("0/0")]));

        let site = reader.next_site().expect("Missing third site")?;
        assert_eq!(site.contig, "chr2");
        assert_eq!(site.id, ".");
        assert_eq!(site.genotypes, Err(DecodeFailure::UnsupportedPloidy{sample: 0, ploidy: 3}));

        let site = reader.next_site().expect("Missing fourth site")?;
        assert!(matches!(site.genotypes, Err(DecodeFailure::MissingGenotypes(_))));

        assert!(reader.next_site().is_none());
        Ok(())
    }

    #[test]
    fn missing_gt_definition() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let contents = "##fileformat=VCFv4.2\n##contig=<ID=chr1>\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";
        let mut reader = VcfReader::new(&write_vcf(tmpdir.path(), contents)?, 0)?;
        assert_eq!(reader.header().genotype_field, None);
        assert!(reader.header().roster.is_empty());
        assert!(reader.next_site().is_none());
        Ok(())
    }

    #[test]
    fn open_missing_file() {
        let result = VcfReader::new(Path::new("not-a-variant-file.vcf"), 0);
        assert!(result.is_err_and(|e| matches!(e.downcast_ref::<VariantReaderError>(), Some(VariantReaderError::Open{..}))));
    }

    #[test]
    fn count() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = write_vcf(tmpdir.path(), TEST_VCF)?;

        let mut progress = MockProgressSink::new();
        progress.expect_increment().times(4).return_const(());
        progress.expect_finish().times(1).return_const(());
        assert_eq!(count_records(&path, 0, &progress)?, 4);
        Ok(())
    }
}

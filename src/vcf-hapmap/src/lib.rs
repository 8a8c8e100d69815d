use std::fmt::{self, Display, Formatter};

use anyhow::Result;
use itertools::Itertools;
use log::{info, trace};

use genotype::{GenotypeCall, Site};
use located_error::LocatedError;
use vcfbox_io::{
    parse,
    progress::{self, ProgressSink},
    read::{VariantSource, VcfReader},
    write::GenericWriter,
};

mod error;
pub use error::HapMapError;

/// Fixed HapMap columns, preceding the sample columns.
pub const HAPMAP_COLUMNS: [&str; 11] = [
    "rs", "alleles", "chrom", "pos", "strand", "assembly", "center", "protLSID", "assayLSID", "panel", "QCcode"
];

/// Placeholder for every column after `pos` that a VCF has no information for.
const NA: &str = "NA";

/// HapMap header line: fixed columns, followed by every sample name.
pub struct HapMapHeader<'a>(pub &'a [String]);

impl Display for HapMapHeader<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", HAPMAP_COLUMNS.iter().copied().chain(self.0.iter().map(String::as_str)).join("\t"))
    }
}

/// A single HapMap row. `chrom` holds the contig name as declared in the input header, not a
/// `chr{index}` label derived from the contig's position within the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HapMapRow {
    pub chrom    : String,
    pub pos      : u64,
    pub reference: String,
    pub alternate: String,
    pub genotypes: Vec<String>,
}

impl HapMapRow {
    /// # Errors
    /// - `HapMapError::MultiAllelic` or `HapMapError::Monomorphic` if `site` is not bi-allelic.
    /// - `HapMapError::Undecodable` if the genotypes of `site` could not be decoded.
    pub fn from_site(site: &Site) -> Result<Self, HapMapError> {
        let (reference, alternate) = match (site.reference(), site.alternates()) {
            (Some(reference), [alternate]) => (reference, alternate.as_str()),
            (_, [])                        => return Err(HapMapError::Monomorphic),
            (_, _)                         => return Err(HapMapError::MultiAllelic(site.allele_count())),
        };

        let genotypes = site.calls()?.iter()
            .map(|call| genotype_cell(call, reference, alternate))
            .collect();

        Ok(Self {
            chrom    : site.contig.clone(),
            pos      : site.position,
            reference: reference.to_string(),
            alternate: alternate.to_string(),
            genotypes,
        })
    }

    /// `{chrom}_{pos}_{ref}_{alt}`
    #[must_use]
    pub fn rs(&self) -> String {
        format!("{}_{}_{}_{}", self.chrom, self.pos, self.reference, self.alternate)
    }
}

impl Display for HapMapRow {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}\t{}/{}\t{}\t{}", self.rs(), self.reference, self.alternate, self.chrom, self.pos)?;
        for _ in 4..HAPMAP_COLUMNS.len() {
            write!(f, "\t{NA}")?;
        }
        for genotype in &self.genotypes {
            write!(f, "\t{genotype}")?;
        }
        Ok(())
    }
}

/// Nucleotide-encoded genotype:
/// - `NN` if any allele is missing
/// - `{ref}{ref}` or `{alt}{alt}` for homozygous calls
/// - `{ref}{alt}` for heterozygous calls (whatever the allele order)
#[must_use]
pub fn genotype_cell(call: &GenotypeCall, reference: &str, alternate: &str) -> String {
    if call.has_missing() {
        return "NN".to_string()
    }
    match (call.is_homozygous(), call.first().index()) {
        (true, Some(0)) => format!("{reference}{reference}"),
        (true, _)       => format!("{alternate}{alternate}"),
        (false, _)      => format!("{reference}{alternate}"),
    }
}

/// Site counts of a HapMap conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HapMapSummary {
    pub processed: u64,
    pub written  : u64,
}

/// Convert every bi-allelic site of `source` into a HapMap row.
///
/// # Errors
/// - if any site fails to be read, or if `writer` fails.
pub fn write_hapmap<S, P>(source: &mut S, writer: &mut GenericWriter, progress: &P) -> Result<HapMapSummary>
where
    S: VariantSource + ?Sized,
    P: ProgressSink + ?Sized,
{
    writer.write_line(HapMapHeader(&source.header().roster))?;

    let mut summary = HapMapSummary::default();
    while let Some(site) = source.next_site() {
        let site = site.loc("While reading input sites")?;
        summary.processed += 1;
        progress.increment();

        match HapMapRow::from_site(&site) {
            Ok(row) => {
                writer.write_line(row)?;
                summary.written += 1;
            },
            Err(reason) => trace!("Skipping {}:{} ({reason})", site.contig, site.position),
        }
    }
    progress.finish();
    writer.flush()?;
    Ok(summary)
}

/// Run the `hapmap` module.
///
/// # Errors
/// - if `--output` already exists and `--overwrite` was not requested.
/// - if the input variant file cannot be read, or if the output cannot be written.
pub fn run(args: &parser::HapMap) -> Result<HapMapSummary> {
    parse::can_write_file(args.overwrite, &args.output)?;
    let mut reader = VcfReader::new(&args.vcf, 0)?;

    parse::create_parent_directory(&args.output)?;
    let mut writer = GenericWriter::new(&args.output)?;

    info!("Converting '{}' into HapMap format...", args.vcf.display());
    let spinner = progress::spinner("Converting to HapMap format")?;
    let summary = write_hapmap(&mut reader, &mut writer, &spinner)
        .with_loc(|| format!("While writing '{}'", args.output.display()))?;

    info!("Wrote {} out of {} site(s) into '{}'", summary.written, summary.processed, args.output.display());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use genotype::{DecodeFailure, InputHeader};
    use pretty_assertions::assert_eq;
    use vcfbox_io::progress::Silent;

    fn gt(s: &str) -> GenotypeCall {
        s.parse().expect("Invalid test genotype")
    }

    fn site(position: u64, alleles: &[&str], gts: &[&str]) -> Site {
        Site {
            contig   : "chr2".into(),
            position,
            id       : ".".into(),
            alleles  : alleles.iter().map(ToString::to_string).collect(),
            quality  : None,
            genotypes: Ok(gts.iter().map(|s| gt(s)).collect()),
        }
    }

    struct MemorySource {
        header: InputHeader,
        sites : std::vec::IntoIter<Site>,
    }

    impl VariantSource for MemorySource {
        fn header(&self) -> &InputHeader {
            &self.header
        }

        fn next_site(&mut self) -> Option<Result<Site>> {
            self.sites.next().map(Ok)
        }
    }

    #[test]
    fn genotype_cells() {
        for (call, expected) in [("0/0", "AA"), ("1/1", "GG"), ("0/1", "AG"), ("1|0", "AG"), ("0|0", "AA"), ("./.", "NN"), ("0/.", "NN")] {
            assert_eq!(genotype_cell(&gt(call), "A", "G"), expected, "{call}");
        }
    }

    #[test]
    fn header_line() {
        let roster = vec!["S1".to_string(), "S2".to_string()];
        assert_eq!(
            HapMapHeader(&roster).to_string(),
            "rs\talleles\tchrom\tpos\tstrand\tassembly\tcenter\tprotLSID\tassayLSID\tpanel\tQCcode\tS1\tS2"
        );
    }

    #[test]
    fn row_line() -> Result<()> {
        let row = HapMapRow::from_site(&site(1500, &["C", "T"], &["0/0", "0/1", "1/1", "./."]))?;
        assert_eq!(row.rs(), "chr2_1500_C_T");
        assert_eq!(row.to_string(), "chr2_1500_C_T\tC/T\tchr2\t1500\tNA\tNA\tNA\tNA\tNA\tNA\tNA\tCC\tCT\tTT\tNN");
        Ok(())
    }

    #[test]
    fn chrom_is_the_contig_name() -> Result<()> {
        let mut input = site(7, &["A", "T"], &["0/1"]);
        input.contig = "scaffold_12".into();
        let row = HapMapRow::from_site(&input)?;
        assert_eq!(row.chrom, "scaffold_12");
        assert!(row.to_string().starts_with("scaffold_12_7_A_T\tA/T\tscaffold_12\t7\t"));
        Ok(())
    }

    #[test]
    fn skipped_sites() {
        assert_eq!(HapMapRow::from_site(&site(1, &["C", "T", "G"], &["0/0"])), Err(HapMapError::MultiAllelic(3)));
        assert_eq!(HapMapRow::from_site(&site(1, &["C"], &["0/0"])), Err(HapMapError::Monomorphic));

        let mut undecodable = site(1, &["C", "T"], &[]);
        undecodable.genotypes = Err(DecodeFailure::UnsupportedPloidy{sample: 0, ploidy: 4});
        assert!(matches!(HapMapRow::from_site(&undecodable), Err(HapMapError::Undecodable(_))));
    }

    #[test]
    fn write_table() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path   = tmpdir.path().join("genotypes.hmp.txt");

        let mut source = MemorySource {
            header: InputHeader{roster: vec!["S1".into(), "S2".into()], ..Default::default()},
            sites : vec![
                site(100, &["A", "C"], &["0/0", "0/1"]),
                site(200, &["A", "C", "G"], &["0/0", "0/1"]),
                site(300, &["G", "T"], &["1/1", "./."]),
            ].into_iter(),
        };

        let summary = {
            let mut writer = GenericWriter::new(&path)?;
            write_hapmap(&mut source, &mut writer, &Silent)?
        };
        assert_eq!(summary, HapMapSummary{processed: 3, written: 2});

        let contents = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("QCcode\tS1\tS2"));
        assert_eq!(lines[1], "chr2_100_A_C\tA/C\tchr2\t100\tNA\tNA\tNA\tNA\tNA\tNA\tNA\tAA\tAC");
        assert_eq!(lines[2], "chr2_300_G_T\tG/T\tchr2\t300\tNA\tNA\tNA\tNA\tNA\tNA\tNA\tTT\tNN");
        Ok(())
    }
}

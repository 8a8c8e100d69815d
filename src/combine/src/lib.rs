use anyhow::Result;
use log::info;

use genotype::PairList;
use located_error::LocatedError;
use vcfbox_io::{
    parse,
    progress,
    read::{self, VariantSource, VcfReader},
    write::{OutputMode, VcfWriter},
};

pub mod pipeline;
pub use pipeline::{CombinePipeline, CombineSummary, PipelineState, SiteOutcome, SkipReason, CombineError};

/// Run the `combine` module: synthesize one sample per pair of `--paired-sample`, and write
/// every bi-allelic site of `--vcf` into `--output`.
///
/// # Errors
/// - if the pair list or the input variant file cannot be read.
/// - if `--output` already exists and `--overwrite` was not requested.
/// - if any pair member is missing from the input roster (no output is created in that case).
/// - if the output file cannot be created or written.
pub fn run(args: &parser::Combine) -> Result<CombineSummary> {
    // ----------------------------- Parse sample pairs
    let pairs = PairList::from_path(&args.paired_sample).loc("While parsing the sample pair list")?;
    info!("Found {} sample pair(s) within '{}'", pairs.len(), args.paired_sample.display());

    // ----------------------------- Ensure the output can be written.
    parse::can_write_file(args.overwrite, &args.output)?;
    let mode = OutputMode::from_path(&args.output);

    // ----------------------------- Open the input and validate pairs, before any expensive pass.
    let reader = VcfReader::new(&args.vcf, args.threads)?;
    let mut pipeline = CombinePipeline::new(&pairs, args.keep_old_samples);
    pipeline.validate_samples(&reader.header().roster)?;

    // ----------------------------- Count records, to size the progress bar.
    info!("Counting records within '{}'...", args.vcf.display());
    let spinner = progress::spinner("Counting SNPs")?;
    let total   = read::count_records(&args.vcf, args.threads, &spinner)?;
    spinner.finish_and_clear();

    // ----------------------------- Combine.
    info!("Combining {} sample pair(s) into '{}' ({mode})", pairs.len(), args.output.display());
    let bar = progress::progress_bar(total, "Adding SNPs")?;
    let summary = pipeline.run(
        || Ok(reader),
        |header| {
            parse::create_parent_directory(&args.output)?;
            VcfWriter::create(&args.output, header, mode, args.threads)
        },
        &bar,
    ).loc("While combining samples")?;

    info!("{summary}");
    Ok(summary)
}

use std::fmt::{self, Display, Formatter};

use anyhow::Result;
use log::{debug, trace};

use genotype::{
    DecodeFailure, GenotypeMerger, HeaderProjector, OutputHeader, OutputRoster, OutputSite,
    PairList, RecordProjector, SampleDirectory, Site,
};
use located_error::{loc, LocatedError};
use vcfbox_io::{progress::ProgressSink, read::VariantSource, write::VariantSink};

mod error;
pub use error::CombineError;

/// Lifecycle of a `CombinePipeline`. `Failed` is reachable from every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    ValidatingSamples,
    WritingHeader,
    StreamingRecords,
    Done,
    Failed,
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Self::Init              => "init",
            Self::ValidatingSamples => "validating-samples",
            Self::WritingHeader     => "writing-header",
            Self::StreamingRecords  => "streaming-records",
            Self::Done              => "done",
            Self::Failed            => "failed",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MultiAllelic{allele_count: usize},
    Undecodable(DecodeFailure),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::MultiAllelic{allele_count} => write!(f, "multi-allelic site ({allele_count} alleles)"),
            Self::Undecodable(failure)       => write!(f, "undecodable genotypes: {failure}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SiteOutcome {
    Emit(OutputSite),
    Skip(SkipReason),
}

/// Site counts of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombineSummary {
    pub processed   : u64,
    pub emitted     : u64,
    pub multiallelic: u64,
    pub undecodable : u64,
}

impl CombineSummary {
    fn record(&mut self, outcome: &SiteOutcome) {
        self.processed += 1;
        match outcome {
            SiteOutcome::Emit(_)                                => self.emitted += 1,
            SiteOutcome::Skip(SkipReason::MultiAllelic{..})     => self.multiallelic += 1,
            SiteOutcome::Skip(SkipReason::Undecodable(_))       => self.undecodable += 1,
        }
    }
}

impl Display for CombineSummary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Processed {} site(s): {} written, {} multi-allelic site(s) skipped, {} undecodable site(s) skipped",
            self.processed, self.emitted, self.multiallelic, self.undecodable
        )
    }
}

/// Single-pass sample combination: reads a variant stream, synthesizes one sample per pair and
/// writes every bi-allelic site into a sink.
///
/// The sink is only opened once every pair member has been found within the input roster and
/// the output roster is known to be free of name collisions. A failure while streaming leaves
/// whatever was already written in place.
pub struct CombinePipeline<'a> {
    pairs           : &'a PairList,
    keep_old_samples: bool,
    state           : PipelineState,
}

impl<'a> CombinePipeline<'a> {
    #[must_use]
    pub fn new(pairs: &'a PairList, keep_old_samples: bool) -> Self {
        Self{pairs, keep_old_samples, state: PipelineState::Init}
    }

    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run the pipeline to completion.
    ///
    /// - `open_source`: opens the input stream.
    /// - `open_sink`  : creates the output stream, and writes the projected header into it.
    /// - `progress`   : notified once per input site.
    ///
    /// # Errors
    /// - `CombineError::AlreadyStarted` if this pipeline was already run.
    /// - `ValidationError` if a pair member is missing from the input, or if output names collide.
    /// - any error raised by `open_source`, `open_sink`, or while reading and writing sites.
    pub fn run<S, W, P>(
        &mut self,
        open_source: impl FnOnce() -> Result<S>,
        open_sink  : impl FnOnce(&OutputHeader) -> Result<W>,
        progress   : &P,
    ) -> Result<CombineSummary>
    where
        S: VariantSource,
        W: VariantSink,
        P: ProgressSink + ?Sized,
    {
        if self.state != PipelineState::Init {
            return loc!(CombineError::AlreadyStarted(self.state))
        }

        let result = self.drive(open_source, open_sink, progress);
        if result.is_err() {
            self.transition(PipelineState::Failed);
        }
        result
    }

    fn drive<S, W, P>(
        &mut self,
        open_source: impl FnOnce() -> Result<S>,
        open_sink  : impl FnOnce(&OutputHeader) -> Result<W>,
        progress   : &P,
    ) -> Result<CombineSummary>
    where
        S: VariantSource,
        W: VariantSink,
        P: ProgressSink + ?Sized,
    {
        // ---- Open the input and index its roster.
        let mut source = open_source().loc("While opening the input variant stream")?;

        // ---- Every pair member must exist, and output names must be unique.
        self.transition(PipelineState::ValidatingSamples);
        let (merger, roster) = self.validate_samples(&source.header().roster)?;

        // ---- Project and write the output header.
        self.transition(PipelineState::WritingHeader);
        let header   = HeaderProjector::project(source.header(), roster);
        let mut sink = open_sink(&header).loc("While opening the output variant stream")?;

        // ---- Stream records.
        self.transition(PipelineState::StreamingRecords);
        let mut summary = CombineSummary::default();
        while let Some(site) = source.next_site() {
            let site    = site.loc("While reading input sites")?;
            let outcome = Self::process_site(&merger, &site);
            summary.record(&outcome);
            progress.increment();

            match outcome {
                SiteOutcome::Emit(output) => {
                    sink.write_site(&output).with_loc(|| format!("While writing site {}:{}", site.contig, site.position))?;
                },
                SiteOutcome::Skip(reason) => {
                    trace!("Skipping {}:{} ({reason})", site.contig, site.position);
                },
            }
        }
        progress.finish();

        self.transition(PipelineState::Done);
        Ok(summary)
    }

    /// Check every pair member against the input `roster`, and the output roster for name collisions.
    /// Does not change the state of the pipeline, and may be called before `run()`.
    ///
    /// # Errors
    /// - `ValidationError` if a pair member is missing from `roster`, or if output names collide.
    pub fn validate_samples(&self, roster: &[String]) -> Result<(GenotypeMerger, OutputRoster)> {
        let loc_msg   = "While validating sample pairs against the input roster";
        let directory = SampleDirectory::build(roster.iter());
        directory.validate(self.pairs).loc(loc_msg)?;
        let output = OutputRoster::new(directory.roster(), self.pairs, self.keep_old_samples).loc(loc_msg)?;
        let merger = GenotypeMerger::new(&directory, self.pairs, self.keep_old_samples).loc(loc_msg)?;
        Ok((merger, output))
    }

    /// Filter and combine a single site.
    ///
    /// Sites with more than two alleles, or whose genotypes could not be decoded are skipped.
    #[must_use]
    pub fn process_site(merger: &GenotypeMerger, site: &Site) -> SiteOutcome {
        if site.is_multiallelic() {
            return SiteOutcome::Skip(SkipReason::MultiAllelic{allele_count: site.allele_count()})
        }

        match site.calls() {
            Ok(calls)    => SiteOutcome::Emit(OutputSite::new(RecordProjector::project(site), merger.merge_site(calls))),
            Err(failure) => SiteOutcome::Skip(SkipReason::Undecodable(failure)),
        }
    }

    fn transition(&mut self, next: PipelineState) {
        debug!("Combine pipeline: {} -> {next}", self.state);
        self.state = next;
    }
}

use log::debug;

use crate::{
    call::{Allele, GenotypeCall},
    directory::{SampleDirectory, ValidationError},
    pairs::PairList,
};

/// Per-site genotype combination.
///
/// Output calls are laid out in output roster order:
/// 1. every input sample, in input order (only if `keep_old_samples` is set).
///    Homozygous calls are passed through untouched, anything else becomes `./.`
/// 2. one call per sample pair, in pair order. The call is `first/second`, with `first` and
///    `second` being the homozygous allele of each member. If any of the two members is
///    heterozygous or carries a missing allele, the call is `./.`
///
/// Pair members are resolved to input indices once, at construction.
#[derive(Debug, Clone)]
pub struct GenotypeMerger {
    pair_indices    : Vec<[usize; 2]>,
    keep_old_samples: bool,
}

impl GenotypeMerger {
    /// # Errors
    /// - `ValidationError::MissingSamples` if any member of `pairs` is absent from `directory`.
    pub fn new(directory: &SampleDirectory, pairs: &PairList, keep_old_samples: bool) -> Result<Self, ValidationError> {
        directory.validate(pairs)?;
        let pair_indices = pairs.iter()
            .map(|pair| directory.resolve(pair))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Genotype merger ready: {} pair(s), keep_old_samples={keep_old_samples}", pair_indices.len());
        Ok(Self{pair_indices, keep_old_samples})
    }

    /// Number of output calls produced for a site carrying `n_input` calls.
    #[must_use]
    pub fn output_len(&self, n_input: usize) -> usize {
        let retained = if self.keep_old_samples { n_input } else { 0 };
        retained + self.pair_indices.len()
    }

    /// Combine the genotypes of a single site. Pure and total: an index that falls outside
    /// of `calls` is treated as a missing genotype.
    #[must_use]
    pub fn merge_site(&self, calls: &[GenotypeCall]) -> Vec<GenotypeCall> {
        let mut merged = Vec::with_capacity(self.output_len(calls.len()));
        if self.keep_old_samples {
            merged.extend(calls.iter().map(Self::retain_original));
        }

        let call_at = |i: usize| calls.get(i).copied().unwrap_or(GenotypeCall::MISSING);
        merged.extend(self.pair_indices.iter().map(|[first, second]| {
            Self::merge_pair(&call_at(*first), &call_at(*second))
        }));
        merged
    }

    /// Keep homozygous calls as they are (phase included). Everything else becomes missing.
    #[must_use]
    pub fn retain_original(call: &GenotypeCall) -> GenotypeCall {
        match call.is_homozygous() {
            true  => *call,
            false => GenotypeCall::MISSING,
        }
    }

    /// Unphased `(first, second)` call, built from the homozygous alleles of both members.
    #[must_use]
    pub fn merge_pair(first: &GenotypeCall, second: &GenotypeCall) -> GenotypeCall {
        match (first.is_homozygous(), second.is_homozygous()) {
            (true, true) => GenotypeCall::unphased(first.first(), second.first()),
            _            => GenotypeCall::unphased(Allele::Missing, Allele::Missing),
        }
    }
}

use ahash::AHashMap;
use log::{debug, info};

use crate::{directory::ValidationError, pairs::PairList};

/// `##FORMAT` line used whenever the input file does not declare its own `GT` field.
pub const DEFAULT_GT_DEFINITION: &str = r#"##FORMAT=<ID=GT,Number=1,Type=String,Description="Genotype">"#;

/// The subset of an input variant file header required to combine samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputHeader {
    /// `##contig=<...>` definitions, verbatim and in file order.
    pub contigs       : Vec<String>,
    /// `##FORMAT=<ID=GT,...>` definition, if any.
    pub genotype_field: Option<String>,
    /// Sample names, in column order.
    pub roster        : Vec<String>,
}

/// Ordered list of output sample names: retained originals (optional), followed by one
/// synthesized `{first}_{second}` name per sample pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRoster(Vec<String>);

impl OutputRoster {
    /// # Errors
    /// - `ValidationError::RosterCollision` if any output name would appear more than once. This
    ///   covers synthesized names shadowing a retained original sample, and duplicated pairs.
    pub fn new(input_roster: &[String], pairs: &PairList, keep_old_samples: bool) -> Result<Self, ValidationError> {
        let retained = input_roster.iter().cloned().filter(|_| keep_old_samples);
        let names: Vec<String> = retained.chain(pairs.combined_names()).collect();

        let input_len = if keep_old_samples { input_roster.len() } else { 0 };
        let mut seen: AHashMap<&str, usize> = AHashMap::with_capacity(names.len());
        let mut collisions = Vec::new();
        for (i, name) in names.iter().enumerate() {
            if let Some(previous) = seen.insert(name.as_str(), i) {
                // Duplicates among the retained originals are inherited from the input file. Let them be.
                if previous < input_len && i < input_len {
                    continue
                }
                collisions.push(name.clone());
            }
        }

        match collisions.is_empty() {
            true  => Ok(Self(names)),
            false => Err(ValidationError::RosterCollision(collisions))
        }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output header definition: contigs, genotype field and roster. Nothing else gets declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputHeader {
    contigs       : Vec<String>,
    genotype_field: String,
    roster        : OutputRoster,
}

impl OutputHeader {
    #[must_use]
    pub fn contigs(&self) -> &[String] {
        &self.contigs
    }

    #[must_use]
    pub fn genotype_field(&self) -> &str {
        &self.genotype_field
    }

    #[must_use]
    pub fn roster(&self) -> &OutputRoster {
        &self.roster
    }

    /// Meta-information lines, in declaration order: contigs first, then the `GT` definition.
    pub fn meta_lines(&self) -> impl Iterator<Item = &str> {
        self.contigs.iter().map(String::as_str).chain(std::iter::once(self.genotype_field.as_str()))
    }
}

pub struct HeaderProjector;

impl HeaderProjector {
    #[must_use]
    pub fn project(input: &InputHeader, roster: OutputRoster) -> OutputHeader {
        let genotype_field = match &input.genotype_field {
            Some(field) => field.clone(),
            None => {
                info!("Input header does not define the GT field. Using the default definition.");
                DEFAULT_GT_DEFINITION.to_string()
            }
        };
        debug!("Output header: {} contig(s), {} sample(s)", input.contigs.len(), roster.len());
        OutputHeader{contigs: input.contigs.clone(), genotype_field, roster}
    }
}

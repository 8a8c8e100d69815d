use ahash::AHashMap;
use log::{trace, warn};

use crate::pairs::{PairList, SamplePair};

mod error;
pub use error::ValidationError;

/// Name -> index lookup over the roster of an input variant file.
#[derive(Debug, Clone, Default)]
pub struct SampleDirectory {
    roster : Vec<String>,
    indices: AHashMap<String, usize>,
}

impl SampleDirectory {
    /// Build a directory from an ordered sample roster. When a name is duplicated, its last occurrence wins.
    pub fn build<I, S>(roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roster: Vec<String> = roster.into_iter().map(Into::into).collect();
        let mut indices = AHashMap::with_capacity(roster.len());
        for (i, name) in roster.iter().enumerate() {
            if let Some(previous) = indices.insert(name.clone(), i) {
                warn!("Sample '{name}' is duplicated within the input roster (#{previous} and #{i}). Using #{i}");
            }
        }
        Self{roster, indices}
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    #[must_use]
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Number of samples within the input roster (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Check that every sample referenced by `pairs` is found within this directory.
    ///
    /// # Errors
    /// - `ValidationError::MissingSamples` carrying every missing reference, in pair order.
    ///   A name referenced multiple times is reported as many times.
    pub fn validate(&self, pairs: &PairList) -> Result<(), ValidationError> {
        let missing: Vec<String> = pairs.iter()
            .flat_map(SamplePair::members)
            .filter(|name| !self.contains(name))
            .map(ToString::to_string)
            .collect();

        match missing.is_empty() {
            true  => Ok(()),
            false => Err(ValidationError::MissingSamples(missing))
        }
    }

    /// Input indices of both members of `pair`.
    ///
    /// # Errors
    /// - `ValidationError::MissingSamples` if any member is absent from the roster.
    pub fn resolve(&self, pair: &SamplePair) -> Result<[usize; 2], ValidationError> {
        match (self.get(pair.first()), self.get(pair.second())) {
            (Some(first), Some(second)) => {
                trace!("{pair} -> [{first}, {second}]");
                Ok([first, second])
            },
            _ => Err(ValidationError::MissingSamples(
                pair.members().into_iter().filter(|name| !self.contains(name)).map(ToString::to_string).collect()
            ))
        }
    }
}

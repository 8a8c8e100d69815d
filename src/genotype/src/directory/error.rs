use thiserror::Error;
use itertools::Itertools;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Samples not found in the input variant file: [{}]. Make sure the sample pair list matches the variant file roster", .0.iter().join(", "))]
    MissingSamples(Vec<String>),

    #[error("Output sample names would collide: [{}]. Either rename the conflicting samples or disable --keep-old-samples", .0.iter().join(", "))]
    RosterCollision(Vec<String>),
}

pub mod call;
pub use call::{Allele, GenotypeCall};

pub mod pairs;
pub use pairs::{SamplePair, PairList};

pub mod directory;
pub use directory::{SampleDirectory, ValidationError};

pub mod header;
pub use header::{InputHeader, OutputHeader, OutputRoster, HeaderProjector};

pub mod site;
pub use site::{Site, SiteSkeleton, OutputSite, RecordProjector, DecodeFailure};

pub mod merge;
pub use merge::GenotypeMerger;

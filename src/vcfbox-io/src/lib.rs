pub mod read;
pub mod write;
pub mod parse;
pub mod progress;

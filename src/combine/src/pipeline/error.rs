use thiserror::Error;

use super::PipelineState;

#[derive(Error, Debug)]
pub enum CombineError {
    #[error("Pipeline cannot be started twice (current state: {0})")]
    AlreadyStarted(PipelineState),
}

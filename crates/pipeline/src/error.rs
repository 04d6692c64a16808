use thiserror::Error;

/// How a stage degraded. These never escape the orchestrator: stages
/// convert them into lower-quality results and log them on the way.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("language detection degraded: {0}")]
    Detection(String),
    #[error("primary translation tier degraded: {0}")]
    TranslationDegraded(String),
    #[error("translation tiers exhausted: {0}")]
    TranslationExhausted(String),
    #[error("preprocessing degraded: {0}")]
    Preprocess(String),
    #[error("reply generation degraded: {0}")]
    Generation(String),
    #[error("progress stream aborted")]
    StreamAborted,
    #[error("pipeline branch aborted: {0}")]
    Branch(String),
}

use std::future::Future;

use tokio::task::JoinError;

use crate::error::PipelineError;

/// Runs two independent pipeline branches to completion and reports each
/// outcome separately, never cancelling the healthy branch because the
/// other failed.
///
/// Branches run as spawned tasks, so even a panic settles as an `Err`
/// for that branch alone. Call sites substitute defaults for failed
/// branches; nothing here short-circuits.
pub async fn settle2<A, B>(
    a: impl Future<Output = Result<A, PipelineError>> + Send + 'static,
    b: impl Future<Output = Result<B, PipelineError>> + Send + 'static,
) -> (Result<A, PipelineError>, Result<B, PipelineError>)
where
    A: Send + 'static,
    B: Send + 'static,
{
    let handle_a = tokio::spawn(a);
    let handle_b = tokio::spawn(b);
    let (settled_a, settled_b) = tokio::join!(handle_a, handle_b);
    (flatten(settled_a), flatten(settled_b))
}

fn flatten<T>(joined: Result<Result<T, PipelineError>, JoinError>) -> Result<T, PipelineError> {
    match joined {
        Ok(inner) => inner,
        Err(e) => Err(PipelineError::Branch(e.to_string())),
    }
}

pub mod apply;
pub mod plan;
pub mod reconcile;

pub use apply::{PassSummary, apply};
pub use plan::{Op, plan};
pub use reconcile::{reconcile_cached, reconcile_singletons};


/// Failure taxonomy for a single resource operation. The controller never
/// retries within a pass; the next sweep is the retry mechanism.
#[derive(thiserror::Error, Debug)]
pub enum OpError {
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("transport: {0}")]
    Transport(kube::Error),
}

pub(crate) fn classify(err: kube::Error) -> OpError {
    match err {
        kube::Error::Api(resp) if resp.code == 404 => OpError::NotFound,
        kube::Error::Api(resp) if resp.reason == "AlreadyExists" => {
            OpError::AlreadyExists(resp.message)
        }
        kube::Error::Api(resp) if resp.code == 409 => {
            OpError::Conflict(resp.message)
        }
        other => OpError::Transport(other),
    }
}

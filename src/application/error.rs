// Error taxonomy for building graphs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphsError {
    #[error("unsupported object type: {0}")]
    UnsupportedEntityKind(String),
    #[error("invalid monitored object: {0}")]
    InvalidObject(String),
    #[error("template store unavailable: {0}")]
    TemplateStoreUnavailable(String),
    #[error("graph backend unavailable: {0}")]
    GraphBackendUnavailable(String),
}

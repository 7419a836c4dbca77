// Graphite backend port
use crate::application::error::GraphsError;
use async_trait::async_trait;

#[async_trait]
pub trait GraphiteClient: Send + Sync {
    /// Expand a metric glob pattern into the matching leaf metric paths
    async fn expand(&self, pattern: &str) -> Result<Vec<String>, GraphsError>;
}

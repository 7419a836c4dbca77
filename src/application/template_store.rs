// Template store port
use crate::application::error::GraphsError;
use crate::domain::graph_template::TemplateSet;
use async_trait::async_trait;

#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Load all template sets, in a stable order
    async fn load_template_sets(&self) -> Result<Vec<TemplateSet>, GraphsError>;
}

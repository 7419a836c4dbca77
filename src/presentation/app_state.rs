// Application state for HTTP handlers
use crate::application::graphite_query::GraphiteWeb;
use crate::application::template_store::TemplateStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub template_store: Arc<dyn TemplateStore>,
    pub graphite: GraphiteWeb,
}

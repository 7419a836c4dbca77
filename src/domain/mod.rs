// Domain layer - Monitored objects, graph templates and request parameters
pub mod graph_params;
pub mod graph_template;
pub mod monitored_object;

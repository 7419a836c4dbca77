// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod graphite_http_client;
pub mod http_response;
pub mod template_files;

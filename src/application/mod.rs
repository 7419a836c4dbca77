// Application layer - Use cases and the ports they depend on
pub mod error;
pub mod graphite_client;
pub mod graphite_query;
pub mod graphs;
pub mod template_store;

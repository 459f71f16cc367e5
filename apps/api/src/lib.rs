pub mod chat;
pub mod config;
pub mod errors;
pub mod json;
pub mod llm_client;
pub mod models;
pub mod panel;
pub mod prompt_cache;
pub mod rate_limit;
pub mod render;
pub mod routes;
pub mod state;
pub mod tools;
pub mod transport;

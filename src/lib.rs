pub mod aggregate;
pub mod apis;
pub mod classify;
pub mod config;
pub mod constants;
pub mod encode;
pub mod error;
pub mod logging;
pub mod merge;
pub mod normalize;
pub mod observability;
pub mod pipeline;
pub mod publish;
pub mod types;

// Ports and their adapters
pub mod app;
pub mod infra;

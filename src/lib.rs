pub mod config;
pub mod converter;
pub mod error;
pub mod pipeline;
pub mod types;

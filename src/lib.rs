pub mod analytics;
pub mod batch;
pub mod config;
pub mod error;
pub mod filter;
pub mod lenient;
pub mod matcher;
pub mod normalizer;
pub mod request;
pub mod types;

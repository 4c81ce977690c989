pub mod algorithms;
pub mod api;
pub mod config;
pub mod error;
pub mod landscape;
pub mod optimizer;

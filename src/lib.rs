pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod llm;
pub mod models;
pub mod reporting;

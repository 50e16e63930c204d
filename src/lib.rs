pub mod api;
pub mod completion;
pub mod config;
pub mod data_models;
pub mod decoder;
pub mod error;
pub mod fetcher;
pub mod prompts;

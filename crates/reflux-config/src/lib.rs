//! Configuration for reflux stores
//!
//! This crate provides:
//! - File path utilities for config and cache files
//! - Configuration file loading (TOML)
//! - Store configuration (StoreConfig) naming the parts a store is built from

pub mod config_file;
pub mod paths;
pub mod store_config;

pub use config_file::load_config_file;
pub use paths::{cache_dir, config_dir};
pub use store_config::StoreConfig;

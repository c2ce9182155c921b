pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpClassificationApi, storage::CsvProductStore};
pub use config::TomlConfig;
pub use crate::core::{engine::ClassificationSync, engine::SyncReport, poller::PollReport};
pub use utils::error::{Result, SyncError};

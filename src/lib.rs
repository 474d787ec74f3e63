pub mod api;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod domain;
pub mod storage;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use core::{etl::EtlEngine, refresh::RefreshService};
pub use domain::model::{LeaderboardBoards, LeaderboardKind, LeaderboardRow, LeaderboardSnapshot};
pub use utils::error::{EtlError, Result};

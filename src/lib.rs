pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{source_for, HttpSource, LocalSource, TerminalPrompt};
pub use config::{toml_config::TomlConfig, Settings};
pub use crate::core::{
    dashboard::{Dashboard, DashboardReport},
    gate::{BillingGate, SessionState},
};
pub use utils::error::{DashboardError, Result};

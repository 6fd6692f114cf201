pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::cli::LocalStateStore;
pub use crate::config::{CliConfig, Commands, Settings};

pub use crate::core::api::BackofficeClient;
pub use crate::core::expander::{expand_hybrid_sku, expand_selection};
pub use crate::core::table::{ColumnFilter, TableState};
pub use crate::utils::error::{DeskError, Result};

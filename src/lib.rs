pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{GeminiClient, LocalStorage};
pub use config::Settings;
pub use core::engine::{GenerationEngine, RunReport, RunStatus};
pub use domain::model::FormInput;
pub use utils::error::{AdGenError, Result};

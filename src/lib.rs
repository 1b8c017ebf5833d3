pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{
    cache::SetCache,
    catalog::MtgIoClient,
    engine::MtgaEngine,
    scoring::{KeywordTable, ScoringPipeline},
};
pub use utils::error::{MtgaError, Result};

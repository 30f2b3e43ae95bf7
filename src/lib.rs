pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{local::LocalStorage, toml_config::TomlConfig};

pub use core::{encoding::OutputStyle, etl::EtlEngine, pipeline::FunscriptPipeline};
pub use domain::model::{Axis, Funscript};
pub use utils::error::{EtlError, Result};

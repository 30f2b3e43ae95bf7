pub mod local;
pub mod toml_config;

use crate::core::encoding::OutputStyle;
use crate::core::ConfigProvider;
use crate::domain::model::Axis;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_BASE_DIR: &str = "./funscript_output/";
pub const DEFAULT_BASE_NAME: &str = "demo";

/// Checks shared by every configuration source.
pub(crate) fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_path("base_dir", config.base_dir())?;
    validation::validate_base_name("base_name", config.base_name())?;

    let keys: Vec<&str> = Axis::ALL.iter().map(|&axis| config.axis_key(axis)).collect();
    for (axis, key) in Axis::ALL.iter().zip(&keys) {
        validation::validate_non_empty_string(&format!("{}_key", axis), key)?;
    }
    validation::validate_distinct("keys", &keys)
}

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "funscript-split")]
    #[command(about = "Split an L0/R1/R2 action document into stroke, roll and pitch funscripts")]
    pub struct CliConfig {
        /// Directory holding one sub-directory per base name
        #[arg(long, default_value = DEFAULT_BASE_DIR)]
        pub base_dir: String,

        /// Name of the sub-directory and stem of every file inside it
        #[arg(long, default_value = DEFAULT_BASE_NAME)]
        pub base_name: String,

        #[arg(long, default_value = "L0")]
        pub stroke_key: String,

        #[arg(long, default_value = "R1")]
        pub roll_key: String,

        #[arg(long, default_value = "R2")]
        pub pitch_key: String,

        /// Fail when an axis key is missing instead of writing null actions
        #[arg(long)]
        pub strict_keys: bool,

        #[arg(long, value_enum, default_value_t = OutputStyle::Python)]
        pub style: OutputStyle,

        /// Show the resolved paths without reading or writing anything
        #[arg(long)]
        pub dry_run: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,
    }

    impl ConfigProvider for CliConfig {
        fn base_dir(&self) -> &str {
            &self.base_dir
        }

        fn base_name(&self) -> &str {
            &self.base_name
        }

        fn axis_key(&self, axis: Axis) -> &str {
            match axis {
                Axis::Stroke => &self.stroke_key,
                Axis::Roll => &self.roll_key,
                Axis::Pitch => &self.pitch_key,
            }
        }

        fn strict_keys(&self) -> bool {
            self.strict_keys
        }

        fn output_style(&self) -> OutputStyle {
            self.style
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_provider(self)
        }
    }

}

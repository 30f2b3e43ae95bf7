use anyhow::Context;
use clap::Parser;
use funscript_split::core::ConfigProvider;
use funscript_split::utils::{logger, validation::Validate};
use funscript_split::{EtlEngine, FunscriptPipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-split")]
#[command(about = "Split funscript axes using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "funscript-split.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the base name from the config file
    #[arg(long)]
    base_name: Option<String>,

    /// Override strict key handling from the config file
    #[arg(long)]
    strict_keys: Option<bool>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    // 應用命令列覆蓋設定
    if let Some(base_name) = args.base_name {
        tracing::info!("Base name overridden to: {}", base_name);
        config.input.base_name = base_name;
    }
    if let Some(strict_keys) = args.strict_keys {
        config.output.strict_keys = strict_keys;
    }

    config.validate().context("invalid configuration")?;

    let storage = LocalStorage::new(config.base_dir().to_string());
    let engine = EtlEngine::new(FunscriptPipeline::new(storage, config));

    match engine.run().await {
        Ok(written) => {
            for path in &written {
                println!("📁 {}", path);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Funscript split failed at {} stage: {}", e.stage(), e);
            eprintln!("❌ [{}] {}", e.stage(), e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

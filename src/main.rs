use clap::Parser;
use funscript_split::core::ConfigProvider;
use funscript_split::utils::{logger, validation::Validate};
use funscript_split::{CliConfig, EtlEngine, FunscriptPipeline, LocalStorage};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let dry_run = config.dry_run;
    let storage = LocalStorage::new(config.base_dir().to_string());
    let pipeline = FunscriptPipeline::new(storage, config);

    if dry_run {
        let plan = pipeline.plan();
        println!("input:  {}", plan.input);
        for (axis, path) in &plan.outputs {
            println!("{:<7} {}", format!("{}:", axis), path);
        }
        return Ok(());
    }

    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(written) => {
            for path in &written {
                println!("📁 {}", path);
            }
        }
        Err(e) => {
            tracing::error!("Funscript split failed at {} stage: {}", e.stage(), e);
            eprintln!("❌ [{}] {}", e.stage(), e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

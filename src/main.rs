use clap::Parser;
use portfolio_knapsack::utils::{logger, validation::Validate};
use portfolio_knapsack::{CliConfig, LocalStorage, OptimizerEngine, PortfolioPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting portfolio-knapsack CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let print_report = config.output.is_none();
    let storage = LocalStorage::new(".");
    let pipeline = PortfolioPipeline::new(storage, config);
    let engine = OptimizerEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            if print_report {
                println!("{}", report);
            } else if let Some(path) = engine.pipeline().config().output.as_deref() {
                tracing::info!("📁 Report saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Optimization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

use clap::Parser;
use portfolio_knapsack::core::Pipeline;
use portfolio_knapsack::domain::ports::ConfigProvider;
use portfolio_knapsack::utils::{logger, validation::Validate};
use portfolio_knapsack::{LocalStorage, OptimizerEngine, PortfolioPipeline, Strategy, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-optimizer")]
#[command(about = "Portfolio optimizer driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "optimizer.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Override the strategy from the config file
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Load and summarize the catalog without solving
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, args.log_json);

    tracing::info!("🚀 Starting TOML-based optimizer");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(strategy) = args.strategy {
        config.optimizer.strategy = strategy;
        tracing::info!("🔧 Strategy overridden to: {}", strategy);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let storage = LocalStorage::new(".");
    let pipeline = PortfolioPipeline::new(storage, config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - catalog is loaded but not solved");
        let catalog = pipeline.extract().await?;
        println!("🔍 Dry Run Analysis:");
        println!("  Items: {}", catalog.len());
        println!("  Catalog total cost: {}", catalog.total_cost()?);
        if catalog.len() > portfolio_knapsack::core::exhaustive::PRACTICAL_EXHAUSTIVE_ITEMS {
            println!("  ⚠️ Exhaustive search over this catalog will be slow");
        }
        return Ok(());
    }

    let print_report = pipeline.config().output_path().is_none();
    let engine = OptimizerEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            if print_report {
                println!("{}", report);
            }
            tracing::info!("✅ Optimization completed successfully!");
        }
        Err(e) => {
            tracing::error!(
                "❌ Optimization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Source: {}", config.input_path());
    println!("  Budget: {}", config.optimizer.budget);
    println!("  Strategy: {}", config.strategy());
    println!("  Format: {}", config.report_format());
    if let Some(output) = config.output_path() {
        println!("  Output: {}", output);
    }
    if config.strategy() == Strategy::Exhaustive {
        println!("  Workers: {}", config.workers());
    } else {
        println!("  Max table cells: {}", config.max_table_cells());
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

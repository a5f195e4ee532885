use clap::Parser;
use gdp_etl::adapters::registry;
use gdp_etl::utils::error::ErrorSeverity;
use gdp_etl::utils::{logger, validation::Validate};
use gdp_etl::{AppConfig, CliArgs, ResolvedFilters, TransformationEngine};

fn main() {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting gdp-etl");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    if let Err(e) = run(&args) {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(args: &CliArgs) -> gdp_etl::Result<()> {
    tracing::info!("📁 Loading configuration from: {}", args.config);
    let mut config = AppConfig::from_file(&args.config)?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if args.dry_run {
        let filters = ResolvedFilters::resolve(&config.filters)?;
        tracing::info!("🔍 Dry run: configuration is valid");
        println!("Input:   {} ({})", config.input.file_path, config.input.driver);
        println!("Output:  {} ({})", config.output.output_path, config.output.driver);
        println!("Filters: {:?}", filters);
        return Ok(());
    }

    // 先建立 sink，再注入引擎，最後由 source 把資料交給引擎
    let sink = registry::build_sink(&config.output)?;
    let mut engine = TransformationEngine::new(sink, config.filters.clone());
    let source = registry::build_source(&config.input)?;

    tracing::info!(
        "[Pipeline] Running: {} -> {}",
        config.input.driver,
        config.output.driver
    );
    source.submit(&mut engine)?;

    tracing::info!("✅ Analytics completed successfully");
    Ok(())
}

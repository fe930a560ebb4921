use clap::Parser;
use van_fleet::utils::error::ErrorSeverity;
use van_fleet::utils::logger;
use van_fleet::{CliConfig, FleetConfig, FleetRunner};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 先載入配置，才知道日誌格式
    let config = match FleetConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("❌ Failed to load config: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match config.log_format() {
        "json" => logger::init_json_logger(config.log_level(), cli.verbose),
        _ => logger::init_compact_logger(config.log_level(), cli.verbose),
    }

    tracing::info!("🚀 Starting van-fleet");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = FleetRunner::from_config(&config).and_then(|mut runner| runner.run(&cli.command));

    match result {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            tracing::error!(
                "❌ van-fleet failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

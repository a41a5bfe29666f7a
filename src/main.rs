use clap::Parser;
use record_converter::app::server;
use record_converter::utils::{logger, validation::Validate};
use record_converter::CliConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    logger::init_logger(cli.verbose, config.json_logs);
    tracing::info!("Starting record-converter");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    server::run(config).await?;
    Ok(())
}

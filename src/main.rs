use clap::Parser;
use photo_collector::core::ConfigProvider;
use photo_collector::utils::{logger, validation::Validate};
use photo_collector::{CliConfig, EtlEngine, LoadReport, LocalStorage, PhotoPipeline, TomlConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let dotenv_path = dotenvy::dotenv().ok();
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting photo-collector");
    if let Some(path) = &dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let outcome = match config.config.clone() {
        Some(path) => {
            tracing::info!("Reading settings from {}", path);
            match TomlConfig::from_file(&path) {
                Ok(toml_config) => run(toml_config, monitor_enabled).await,
                Err(e) => Err(e),
            }
        }
        None => run(config, monitor_enabled).await,
    };

    match outcome {
        Ok(report) => {
            tracing::info!("✅ Photo collection completed successfully!");
            println!(
                "✅ Copied {} photos into {}",
                report.files_copied,
                report.output_root.display()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Photo collection failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }
}

async fn run<C>(config: C, monitor_enabled: bool) -> photo_collector::Result<LoadReport>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::debug!(
        "API: {}, photos: {}, articles: {}, output: {}, duplicates: {:?}",
        config.api_url(),
        config.photo_directory(),
        config.articles_file(),
        config.output_root(),
        config.duplicate_policy()
    );

    let storage = LocalStorage::current_dir();
    let pipeline = PhotoPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);
    engine.run().await
}

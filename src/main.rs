use clap::Parser;
use gete_import::core::pipeline::load_schema;
use gete_import::core::ConfigProvider;
use gete_import::utils::{logger, validation::Validate};
use gete_import::{
    CliConfig, EtlEngine, EtlOutcome, ImportError, ImportPipeline, LocalStorage, LookupConfig,
    RowMapper,
};

async fn convert(config: CliConfig) -> Result<EtlOutcome, ImportError> {
    let lookup_config = match config.lookup_path() {
        Some(path) => {
            tracing::info!("📁 Loading lookup tables from: {}", path);
            LookupConfig::from_file(path)?
        }
        None => LookupConfig::default(),
    };

    let flight_format = config
        .flight_format()
        .unwrap_or_else(|| lookup_config.flight_format());
    let lookups = lookup_config.into_tables()?;

    let storage = LocalStorage::default();
    let schema = load_schema(&storage, config.template_path()).await?;
    let mapper = RowMapper::new(schema, lookups, flight_format);

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }
    let preview_rows = config.preview_rows();

    let pipeline = ImportPipeline::new(storage, config, mapper);
    EtlEngine::new_with_monitoring(pipeline, monitor_enabled)
        .with_preview(preview_rows)
        .run()
        .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting gete-import");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match convert(config).await {
        Ok(outcome) => {
            println!(
                "✅ Generated {} rows ({}-column template)",
                outcome.row_count, outcome.column_count
            );
            if let Some(preview) = &outcome.preview {
                println!("{}", preview);
            }
            println!("📁 Import file saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
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

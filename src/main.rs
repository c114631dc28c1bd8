use clap::Parser;
use producer_data::domain::model::{ProducerRecord, QueryParams};
use producer_data::utils::{logger, validation::Validate};
use producer_data::{CliConfig, ConfigProvider, FileCache, ProducerAggregator, TomlConfig};
use std::fs;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting producer-data CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let force_refresh = cli.force_refresh;
    let formats = cli.formats.clone();

    // A TOML file takes over the whole configuration when given.
    if let Some(config_path) = cli.config.clone() {
        let config = match TomlConfig::from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("❌ Failed to load config file {}: {}", config_path, e);
                eprintln!("❌ Failed to load config file: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = config.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        let params = config.query_params();
        let formats = config.output.formats.clone();
        run(config, params, force_refresh, &formats).await?;
    } else {
        if let Err(e) = cli.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        let params = cli.query_params();
        run(cli, params, force_refresh, &formats).await?;
    }

    Ok(())
}

async fn run<C: ConfigProvider>(
    config: C,
    params: QueryParams,
    force_refresh: bool,
    formats: &[String],
) -> anyhow::Result<()> {
    let output_path = config.output_path().to_string();
    let cache = FileCache::new(config.cache_path());
    let aggregator = ProducerAggregator::new(cache, config);

    let records = aggregator.get_producer_data(&params, force_refresh).await;
    let stale = aggregator.is_cache_stale().await;

    fs::create_dir_all(&output_path)?;

    for format in formats {
        match format.as_str() {
            "json" => {
                let path = Path::new(&output_path).join("producers.json");
                fs::write(&path, serde_json::to_vec_pretty(&records)?)?;
                tracing::info!("📁 Wrote {}", path.display());
            }
            "csv" => {
                let path = Path::new(&output_path).join("producers.csv");
                write_csv(&records, &path)?;
                tracing::info!("📁 Wrote {}", path.display());
            }
            other => tracing::warn!("Skipping unknown output format: {}", other),
        }
    }

    println!("✅ Aggregated {} producers", records.len());
    println!("📁 Output saved to: {}", output_path);
    if stale {
        println!("⚠️  Cached data is stale; consider re-running with --force-refresh");
    }

    Ok(())
}

fn write_csv(records: &[ProducerRecord], path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "id",
        "name",
        "lat",
        "lng",
        "neighborhood",
        "capabilities",
        "availability_percent",
        "sustainability_score",
        "verification_sources",
    ])?;

    for record in records {
        writer.write_record([
            record.id.as_str(),
            record.name.as_str(),
            &record.location.lat.to_string(),
            &record.location.lng.to_string(),
            record.location.neighborhood.as_str(),
            &record.capabilities.join("; "),
            &record.availability_percent.to_string(),
            &record.sustainability_score.to_string(),
            &record.verification_sources.join("; "),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

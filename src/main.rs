use anyhow::Context;
use clap::Parser;
use mtga::config::{CliConfig, Command, GetCommand};
use mtga::core::ConfigProvider;
use mtga::utils::{logger, validation::Validate};
use mtga::{LocalStorage, MtgIoClient, MtgaEngine, MtgaError, ScoringPipeline, SetCache, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Logs go to stderr; stdout is reserved for the report.
    if std::env::var("MTGA_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(err) = run(&cli).await {
        match err.downcast_ref::<MtgaError>() {
            Some(e) => {
                tracing::error!(
                    "❌ {:#} (Category: {:?}, Severity: {:?})",
                    err,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(e.exit_code());
            }
            None => {
                tracing::error!("❌ {:#}", err);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> anyhow::Result<()> {
    let config = cli.resolve().context("Failed to load configuration")?;
    config.validate().context("Configuration is invalid")?;
    tracing::debug!("Resolved config: {:?}", config);

    let engine = build_engine(&config).context("Failed to set up the catalog client")?;
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Command::Analyse { set_code, refresh } => {
            engine
                .analyse(set_code, *refresh, &mut out)
                .await
                .with_context(|| format!("Analysis of set {} failed", set_code))?;
        }
        Command::Get { target } => match target {
            GetCommand::Sets { refresh } => {
                engine
                    .list_sets(*refresh, &mut out)
                    .await
                    .context("Listing sets failed")?;
            }
            GetCommand::Set { set_code, refresh } => {
                engine
                    .show_set(set_code, *refresh, &mut out)
                    .await
                    .with_context(|| format!("Listing set {} failed", set_code))?;
            }
        },
    }

    Ok(())
}

fn build_engine(config: &TomlConfig) -> mtga::Result<MtgaEngine<MtgIoClient, LocalStorage>> {
    let client = MtgIoClient::new(config)?;
    let storage = LocalStorage::new(config.cache_dir());
    let scoring = ScoringPipeline::standard(config.keyword_table());

    Ok(MtgaEngine::new(
        SetCache::new(client, storage),
        scoring,
        config.report_threshold(),
    ))
}

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use clash_panel::{
    ClashConfig, Error, OutputFormat, PanelConfig, Snapshot, defaults::EntityKind,
    generate_clash_config, import_clash_config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(version, about = "Validate and export proxy routing configurations")]
struct Cli {
    /// Tool settings
    #[arg(long, default_value = "panel.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate every entry of a dashboard snapshot
    Check { snapshot: PathBuf },
    /// Print the routing-engine configuration built from a snapshot
    Export { snapshot: PathBuf },
    /// Convert a routing-engine configuration into a snapshot
    Import { clash: PathBuf },
    /// Print the default entry of a kind
    Defaults { kind: EntityKind },
}

fn init_tracing(cfg: &PanelConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                cfg.log_level
                    .clone()
                    .unwrap_or_else(|| format!("{}=debug", env!("CARGO_CRATE_NAME")))
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn render<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<String, Error> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
    })
}

fn run(cli: Cli, cfg: &PanelConfig) -> Result<bool, Error> {
    match cli.command {
        Command::Check { snapshot } => {
            let snapshot = Snapshot::from_path(&snapshot)?;
            let issues = snapshot.issues();
            for issue in &issues {
                println!("{issue}");
            }
            tracing::info!("{} issue(s) found", issues.len());
            Ok(issues.is_empty())
        }
        Command::Export { snapshot } => {
            let snapshot = Snapshot::from_path(&snapshot)?;
            let clash = generate_clash_config(&snapshot, cfg)?;
            print!("{}", render(&clash, cfg.output)?);
            Ok(true)
        }
        Command::Import { clash } => {
            let data = std::fs::read_to_string(&clash)?;
            let snapshot = import_clash_config(ClashConfig::from_yaml(&data)?)?;
            tracing::info!(
                "imported {} rule(s), {} proxy(ies), {} group(s)",
                snapshot.rules.len(),
                snapshot.proxies.len(),
                snapshot.proxy_groups.len()
            );
            print!("{}", render(&snapshot, cfg.output)?);
            Ok(true)
        }
        Command::Defaults { kind } => {
            print!("{}", kind.default_yaml()?);
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let cfg = match PanelConfig::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{}: {err}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&cfg);
    if !cli.config.exists() {
        tracing::debug!("{} not found, using default settings", cli.config.display());
    }

    match run(cli, &cfg) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use splynx_api::SplynxClient;
use splynx_core::time::{local_today, parse_date, yesterday};
use splynx_reports::{Pipeline, ReportConfig};
use std::path::PathBuf;
use tracing::info;

mod config;
mod state;

use config::{default_config_path, init_config, load_config, Config};

#[derive(Parser, Debug)]
#[command(
    name = "splynx-reports",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SPLYNX_BUILD_SHA"), ")"),
    about = "Daily technician reports from Splynx scheduling"
)]
struct Cli {
    /// Config file (default: ~/.splynx-reports/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Comments on closed tasks, one file per task (default: yesterday)
    Digest {
        /// Reference date, YYYY-MM-DD
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },

    /// Today's calendar per technician, pending vs closed (default: today)
    Summary {
        /// Reference date, YYYY-MM-DD
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the config file path
    Path,
}

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(p) => p,
        None => default_config_path()?,
    };

    match cli.command {
        Command::Digest { date } => {
            let (cfg, client) = setup(&config_path)?;
            digest(&cfg, &client, date).await?;
        }

        Command::Summary { date } => {
            let (cfg, client) = setup(&config_path)?;
            summary(&cfg, &client, date).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(&config_path)?,
            ConfigCommand::Path => println!("{}", config_path.display()),
        },
    }

    Ok(())
}

fn setup(config_path: &std::path::Path) -> Result<(ReportConfig, SplynxClient)> {
    info!("loading configuration from {}", config_path.display());
    let cfg: Config = load_config(config_path)?;
    let client = SplynxClient::new(cfg.api.base_url.clone(), cfg.credentials()?)?;
    Ok((cfg.report_config_for_user()?, client))
}

async fn digest(cfg: &ReportConfig, client: &SplynxClient, date: Option<NaiveDate>) -> Result<()> {
    let mode = if date.is_some() { "fecha manual" } else { "ayer" };
    let date = date.unwrap_or_else(|| yesterday(local_today()));
    println!("Obteniendo comentarios del día: {date} (modo: {mode})");

    let stats = Pipeline::new(client, cfg)
        .on_write(|path| println!("Guardado en: {}", path.display()))
        .run_digest(date)
        .await
        .context("digest run aborted")?;

    println!("Comentarios encontrados (por fecha de comentario): {}", stats.retained);
    if stats.retained == 0 {
        println!("No hay comentarios.");
        return Ok(());
    }
    println!("Tasks con comentarios en esa fecha: {}", stats.tasks);

    println!("\nResumen:");
    println!("  Tasks procesadas (cerradas): {}", stats.groups);
    println!(
        "  Tasks con comentarios en la fecha pero NO cerradas: {}",
        stats.skipped_not_closed
    );
    if stats.fetch_failures > 0 {
        println!("  Tasks que no se pudieron obtener: {}", stats.fetch_failures);
    }
    for (technician, n) in &stats.per_technician {
        println!("  {technician}: {n}");
    }
    Ok(())
}

async fn summary(cfg: &ReportConfig, client: &SplynxClient, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(local_today);
    println!("Generando resumen por técnico (CALENDAR) para el día: {date}");
    println!("Carpeta base: {}", cfg.summary_root.display());

    let stats = Pipeline::new(client, cfg)
        .on_write(|path| println!("Generado: {}", path.display()))
        .run_summary(date)
        .await
        .context("summary run aborted")?;

    println!("Tareas totales recibidas: {}", stats.fetched);
    println!("Tareas calendarizadas del día: {}", stats.retained);
    println!("Técnicos (incluyendo SIN_ASIGNAR si aplica): {}", stats.groups);

    println!("\nListo. Cada técnico tiene su archivo con PENDIENTES y CERRADAS del día según el CALENDAR.");
    Ok(())
}

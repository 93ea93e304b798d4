use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use csv_playlist_import as lib;
use lib::config::{ImportConfig, SOURCE_CSV_COLUMN};
use std::path::{Path, PathBuf};
use tracing::subscriber as tracing_subscriber_global;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "csv-playlist-import", version)]
struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write logs to a daily-rotated file in this folder
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import playlists from a CSV file or folder and print them as JSON
    Import(ImportArgs),
    /// Validate config file and exit
    ConfigValidate,
}

#[derive(Args)]
struct ImportArgs {
    /// CSV file or folder (overrides `path` in the config)
    #[arg(long)]
    path: Option<String>,

    /// Single-character delimiter, `\t` for tab
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Files have no header row; columns are read in the default order
    #[arg(long)]
    no_header: bool,

    /// Scan subfolders when the path is a folder
    #[arg(long)]
    include_subfolders: bool,

    /// Take playlist names from the playlist column instead of the file name
    #[arg(long)]
    from_column: bool,

    /// Regex on playlist names
    #[arg(long)]
    filter: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl ImportArgs {
    fn apply(&self, cfg: &mut ImportConfig) {
        if let Some(p) = &self.path {
            cfg.path = p.clone();
        }
        if let Some(d) = &self.delimiter {
            cfg.delimiter = d.clone();
        }
        if self.no_header {
            cfg.has_header = "No".into();
        }
        if self.include_subfolders {
            cfg.include_subfolders = "Yes".into();
        }
        if self.from_column {
            cfg.playlist_source = SOURCE_CSV_COLUMN.into();
        }
        if let Some(f) = &self.filter {
            cfg.filter = f.clone();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_dir.as_deref())?;

    // Explicit --config wins; otherwise use the system-wide file when present
    // and fall back to built-in defaults plus flags.
    let resolved_config_path: Option<PathBuf> = match &cli.config {
        Some(p) => Some(p.clone()),
        None => {
            let etc_path = Path::new("/etc/csv-playlist-import/config.toml");
            if etc_path.exists() { Some(etc_path.to_path_buf()) } else { None }
        }
    };

    let mut cfg = match &resolved_config_path {
        Some(p) => ImportConfig::from_path(p)
            .with_context(|| format!("loading config from {}", p.display()))?,
        None => ImportConfig::default(),
    };

    match cli.command {
        Commands::Import(args) => {
            args.apply(&mut cfg);
            let settings = cfg.resolve().context("resolving import settings")?;
            let outcome = lib::import(&settings)
                .with_context(|| format!("importing from {}", settings.path.display()))?;
            if !outcome.skipped.is_empty() {
                tracing::warn!("{} file(s) skipped", outcome.skipped.len());
            }

            let json = if args.pretty {
                serde_json::to_string_pretty(&outcome.playlists)?
            } else {
                serde_json::to_string(&outcome.playlists)?
            };
            match &args.output {
                Some(out) => std::fs::write(out, json)
                    .with_context(|| format!("writing {}", out.display()))?,
                None => println!("{}", json),
            }
        }
        Commands::ConfigValidate => match cfg.resolve() {
            Ok(_) => println!("OK"),
            Err(e) => {
                eprintln!("Config validation failed: {}", e);
                std::process::exit(2);
            }
        },
    }

    Ok(())
}

/// Logs go to stderr (stdout carries the JSON) and optionally to a
/// daily-rotated file. The returned guard must outlive all logging.
fn init_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let mut guard = None;
    let file_layer = log_dir.map(|dir| {
        let file_appender = tracing_appender::rolling::daily(dir, "csv-playlist-import.log");
        let (non_blocking, g) = tracing_appender::non_blocking(file_appender);
        guard = Some(g);
        fmt::layer().with_writer(non_blocking).with_ansi(false)
    });

    // Honor RUST_LOG if set, otherwise default to info.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer);

    tracing_subscriber_global::set_global_default(subscriber)
        .context("failed to set global tracing subscriber")?;
    Ok(guard)
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use areola_core::{
    encode_csv, export_filename, load_audit_data, render_summary, render_table, AuditController,
    FileStore, HttpSweepService, NoopNavigator, OutputFormat, ServiceSettings, WAITING_PLACEHOLDER,
};

#[derive(Parser, Debug)]
#[command(name = "areola", author, version, about = "Fraud sweep audit console")]
struct Cli {
    /// Directory backing the transient audit store
    #[arg(
        long = "store-dir",
        value_name = "DIR",
        default_value = "./.areola",
        global = true
    )]
    store_dir: PathBuf,

    /// Sweep service base URL (overrides AREOLA_ENDPOINT and the config file)
    #[arg(long, value_name = "URL", global = true)]
    endpoint: Option<String>,

    /// Optional TOML config file with a [service] table
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a sweep and show the summary panel
    Sweep {
        /// Upload this transaction dump instead of sweeping the server-held dataset
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
        /// Emit the summary as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// Render the auditor table from the persisted sweep result
    Audit {
        /// Case-insensitive substring filter over signature, amount, and artifact
        #[arg(long, default_value = "")]
        query: String,
        /// Emit the filtered rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write the persisted anomaly list as a CSV file
    Export {
        /// Output path (defaults to areola_audit_<date>.csv in the cwd)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Sweep { file, json } => sweep(&cli, file.as_deref(), *json).await?,
        Commands::Audit { query, json } => audit(&cli.store_dir, query, *json).await?,
        Commands::Export { out } => export(&cli.store_dir, out.as_deref()).await?,
    }
    Ok(())
}

async fn sweep(cli: &Cli, file: Option<&Path>, json: bool) -> Result<()> {
    let settings = resolve_settings(cli)?;
    let service = HttpSweepService::new(&settings)?;
    let store = FileStore::new(&cli.store_dir);
    let mut controller = AuditController::new(service, store, NoopNavigator);

    let payload = match file {
        Some(path) => {
            let bytes = fs::read(path)
                .with_context(|| format!("failed to read upload file {}", path.display()))?;
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("upload.csv")
                .to_string();
            Some((name, bytes))
        }
        None => None,
    };

    controller
        .run_sweep(payload)
        .await
        .context("audit failed")?;

    let format = output_format(json);
    print!(
        "{}",
        render_summary(&controller.current_result(), format)?
    );
    Ok(())
}

async fn audit(store_dir: &Path, query: &str, json: bool) -> Result<()> {
    let store = FileStore::new(store_dir);
    match load_audit_data(&store).await? {
        None => println!("{WAITING_PLACEHOLDER}"),
        Some(result) => {
            print!("{}", render_table(&result, query, output_format(json))?);
        }
    }
    Ok(())
}

async fn export(store_dir: &Path, out: Option<&Path>) -> Result<()> {
    let store = FileStore::new(store_dir);
    let Some(result) = load_audit_data(&store).await? else {
        println!("{WAITING_PLACEHOLDER}");
        return Ok(());
    };
    let path = match out {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(export_filename(Utc::now().date_naive())),
    };
    fs::write(&path, encode_csv(&result.anomalies))
        .with_context(|| format!("failed to write CSV export to {}", path.display()))?;
    println!(
        "exported {} anomalies to {}",
        result.anomalies.len(),
        path.display()
    );
    Ok(())
}

/// Flags override env vars; the config file fills whatever is still unset.
fn resolve_settings(cli: &Cli) -> Result<ServiceSettings> {
    let mut settings = ServiceSettings::from_env();
    if let Some(path) = &cli.config {
        let file = config::Config::builder()
            .add_source(config::File::from(path.as_path()))
            .build()
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        if settings.endpoint.is_none() {
            settings.endpoint = file.get_string("service.endpoint").ok();
        }
        if settings.timeout_secs.is_none() {
            settings.timeout_secs = file
                .get_int("service.timeout_secs")
                .ok()
                .and_then(|v| u64::try_from(v).ok());
        }
    }
    if let Some(endpoint) = &cli.endpoint {
        settings.endpoint = Some(endpoint.clone());
    }
    Ok(settings)
}

fn output_format(json: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    }
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tokio=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}

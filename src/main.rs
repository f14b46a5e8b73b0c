use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use docsync::{
    config::{self, EnvSource, SyncConfig},
    logging,
    sync::{self, AccountOutcome, SyncOptions},
    vector_store::VectorStoreClient,
};

#[derive(Parser)]
#[command(
    name = "docsync",
    about = "Sync converted document JSON artifacts into OpenAI vector stores"
)]
struct Cli {
    /// Subset of client slugs to sync (defaults to every configured account).
    #[arg(long = "clients", num_args = 1.., value_name = "slug")]
    clients: Option<Vec<String>>,

    /// Print intended uploads without calling the OpenAI API.
    #[arg(long)]
    dry_run: bool,

    /// Root directory holding per-account JSON artifacts.
    #[arg(long, default_value = "data")]
    data_root: PathBuf,
}

#[tokio::main]
async fn main() {
    logging::init_tracing();
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let env = EnvSource::load(Path::new(config::ENV_FILE));
    let config = SyncConfig::resolve(&env).context("failed to resolve sync configuration")?;
    let client = VectorStoreClient::new(config.api_key, config.base_url)?;

    let options = SyncOptions {
        clients: cli.clients,
        dry_run: cli.dry_run,
        data_root: cli.data_root,
    };
    let reports = sync::sync_accounts(&client, &env, &options).await;

    let synced = count(&reports, |outcome| {
        matches!(outcome, AccountOutcome::Synced { .. })
    });
    let skipped = count(&reports, |outcome| {
        matches!(outcome, AccountOutcome::Skipped(_))
    });
    let failed = count(&reports, |outcome| {
        matches!(outcome, AccountOutcome::Failed(_))
    });
    tracing::info!(synced, skipped, failed, "Sync finished");

    if failed > 0 {
        bail!("{failed} account(s) failed to sync");
    }
    Ok(())
}

fn count(reports: &[sync::AccountReport], pred: impl Fn(&AccountOutcome) -> bool) -> usize {
    reports
        .iter()
        .filter(|report| pred(&report.outcome))
        .count()
}

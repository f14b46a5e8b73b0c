//! Per-account sync orchestration.
//!
//! The sync loop resolves each selected account, discovers its JSON
//! artifacts, and uploads the rendered text blobs into the account's vector
//! store. Expected, non-exceptional conditions (unknown slug, unset store id,
//! missing or empty data directory) are explicit skip outcomes rather than
//! errors, and every account is isolated from its neighbours: a failure in
//! one account's uploads aborts that account's remaining documents but the
//! loop proceeds to the next account.

mod discover;
mod render;
mod upload;

pub use discover::{DiscoverError, discover_documents};
pub use render::{RenderedDocument, render_document_summary};
pub use upload::upload_documents;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::accounts::{self, AccountConfig};
use crate::config::EnvSource;
use crate::vector_store::{VectorStoreClient, VectorStoreError};

/// Caller-supplied options for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Subset of account slugs to process; `None` selects every account.
    pub clients: Option<Vec<String>>,
    /// Suppress network calls and log intended uploads instead.
    pub dry_run: bool,
    /// Root directory the per-account data directories are resolved against.
    pub data_root: PathBuf,
}

/// Reasons an account was skipped without attempting any upload.
#[derive(Debug)]
pub enum SkipReason {
    /// The slug does not appear in the compiled-in registry.
    UnknownSlug,
    /// The account's vector store id variable is unset.
    StoreIdUnset {
        /// Name of the unset environment variable.
        env_var: &'static str,
    },
    /// The account's data directory does not exist.
    MissingDirectory {
        /// Directory that was expected to hold artifacts.
        path: PathBuf,
    },
    /// The data directory exists but holds no JSON artifacts.
    NoDocuments {
        /// Directory that was searched.
        path: PathBuf,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSlug => write!(f, "unknown client slug"),
            Self::StoreIdUnset { env_var } => {
                write!(f, "environment variable {env_var} is not set")
            }
            Self::MissingDirectory { path } => {
                write!(f, "data directory not found: {}", path.display())
            }
            Self::NoDocuments { path } => {
                write!(f, "no JSON documents found in {}", path.display())
            }
        }
    }
}

/// Failures that abort one account's sync while the loop continues.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Artifact discovery failed (unreadable file or malformed JSON).
    #[error(transparent)]
    Discover(#[from] DiscoverError),
    /// An upload failed; remaining documents of the account were not attempted.
    #[error(transparent)]
    Upload(#[from] VectorStoreError),
}

/// Result of processing one account.
#[derive(Debug)]
pub enum AccountOutcome {
    /// All discovered documents were uploaded (or logged, in dry run mode).
    Synced {
        /// Number of documents processed.
        documents: usize,
    },
    /// The account was skipped before any upload was attempted.
    Skipped(SkipReason),
    /// The account's sync aborted partway through.
    Failed(SyncError),
}

/// Outcome of one account, tagged with its slug for the run summary.
#[derive(Debug)]
pub struct AccountReport {
    /// Slug the outcome belongs to.
    pub slug: String,
    /// What happened for that account.
    pub outcome: AccountOutcome,
}

/// Process every selected account in a fixed, stable order.
///
/// Returns one report per selected slug, in selection order.
pub async fn sync_accounts(
    client: &VectorStoreClient,
    env: &EnvSource,
    options: &SyncOptions,
) -> Vec<AccountReport> {
    let selected = options
        .clients
        .clone()
        .unwrap_or_else(accounts::all_slugs);

    let mut reports = Vec::with_capacity(selected.len());
    for slug in selected {
        let outcome = sync_account(client, env, options, &slug).await;
        match &outcome {
            AccountOutcome::Synced { documents } => {
                tracing::info!(slug = %slug, documents, "Account synced");
            }
            AccountOutcome::Skipped(reason) => {
                tracing::warn!(slug = %slug, reason = %reason, "Skipping account");
            }
            AccountOutcome::Failed(err) => {
                tracing::error!(slug = %slug, error = %err, "Account sync failed");
            }
        }
        reports.push(AccountReport { slug, outcome });
    }
    reports
}

async fn sync_account(
    client: &VectorStoreClient,
    env: &EnvSource,
    options: &SyncOptions,
    slug: &str,
) -> AccountOutcome {
    let Some(account) = accounts::find(slug) else {
        return AccountOutcome::Skipped(SkipReason::UnknownSlug);
    };

    let Some(store_id) = env.get(account.env_var) else {
        return AccountOutcome::Skipped(SkipReason::StoreIdUnset {
            env_var: account.env_var,
        });
    };

    let data_dir = account.data_directory(&options.data_root);
    let documents = match discover_documents(&data_dir) {
        Ok(documents) => documents,
        Err(DiscoverError::DirectoryNotFound(path)) => {
            return AccountOutcome::Skipped(SkipReason::MissingDirectory { path });
        }
        Err(err) => return AccountOutcome::Failed(err.into()),
    };

    if documents.is_empty() {
        return AccountOutcome::Skipped(SkipReason::NoDocuments { path: data_dir });
    }

    log_sync_start(account, documents.len(), &store_id, options.dry_run);
    match upload_documents(client, &store_id, &documents, options.dry_run).await {
        Ok(()) => AccountOutcome::Synced {
            documents: documents.len(),
        },
        Err(err) => AccountOutcome::Failed(err.into()),
    }
}

fn log_sync_start(account: &AccountConfig, documents: usize, store_id: &str, dry_run: bool) {
    tracing::info!(
        label = account.label,
        documents,
        store_id,
        dry_run,
        "Syncing documents into vector store"
    );
}

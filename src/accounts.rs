//! Compiled-in registry of accounts whose documents are synced.
//!
//! The registry is fixed at build time: each account names the environment
//! variable carrying its vector store id and the directory (relative to the
//! data root) holding its converted JSON artifacts.

use std::path::{Path, PathBuf};

/// Static description of one synced account.
#[derive(Debug, Clone, Copy)]
pub struct AccountConfig {
    /// Stable identifier used on the command line.
    pub slug: &'static str,
    /// Environment variable holding the account's vector store id.
    pub env_var: &'static str,
    /// Human-readable account name used in log output.
    pub label: &'static str,
    /// Location of the account's JSON artifacts, relative to the data root.
    pub data_subdir: &'static str,
}

impl AccountConfig {
    /// Resolve the account's artifact directory against a data root.
    pub fn data_directory(&self, data_root: &Path) -> PathBuf {
        data_root.join(self.data_subdir)
    }
}

/// All configured accounts, in the fixed order used when no subset is given.
pub const ACCOUNTS: [AccountConfig; 3] = [
    AccountConfig {
        slug: "ag-barr",
        env_var: "AGB_VS",
        label: "AG Barr",
        data_subdir: "AG Barr/json",
    },
    AccountConfig {
        slug: "msd",
        env_var: "TMC_VS",
        label: "MSD",
        data_subdir: "TMC/json",
    },
    AccountConfig {
        slug: "saint-gobain",
        env_var: "SG_VS",
        label: "Saint-Gobain",
        data_subdir: "St Gobain/json",
    },
];

/// Look up an account by slug.
pub fn find(slug: &str) -> Option<&'static AccountConfig> {
    ACCOUNTS.iter().find(|account| account.slug == slug)
}

/// Slugs of every configured account, in registry order.
pub fn all_slugs() -> Vec<String> {
    ACCOUNTS
        .iter()
        .map(|account| account.slug.to_string())
        .collect()
}

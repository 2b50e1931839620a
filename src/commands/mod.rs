//! CLI command definitions and dispatch.

pub mod file;
pub mod folder;

use clap::{Parser, Subcommand};
use tracing::info;

use mediadesk_blob::BlobStoreManager;
use mediadesk_core::config::AppConfig;
use mediadesk_core::result::AppResult;
use mediadesk_kv::KvManager;
use mediadesk_service::ServiceContext;

use crate::output::OutputFormat;

/// MediaDesk: browse a flat Blob Store through virtual folders
#[derive(Debug, Parser)]
#[command(name = "mediadesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (overrides the environment layering)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Configuration environment, layered over `config/default`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Folder management
    Folder(folder::FolderArgs),
    /// File placement and Blob Store operations
    File(file::FileArgs),
}

impl Cli {
    /// Load configuration from `--config` or the environment layering.
    pub fn load_config(&self) -> AppResult<AppConfig> {
        match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(&self.env),
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        let ctx = build_context(&config).await?;
        match &self.command {
            Commands::Folder(args) => folder::execute(args, &ctx, self.format).await,
            Commands::File(args) => file::execute(args, &ctx, self.format).await,
        }
    }
}

/// Helper: wire the configured stores into the service layer
pub async fn build_context(config: &AppConfig) -> AppResult<ServiceContext> {
    let kv = KvManager::new(&config.kv).await?;
    let blobs = BlobStoreManager::new(&config.blob_store)?;
    info!(
        kv = %config.kv.provider,
        blob_store = %config.blob_store.provider,
        "Services initialized"
    );

    Ok(ServiceContext::new(
        kv.store(),
        kv.keys(),
        blobs.store(),
        &config.listing,
        &config.tree,
    ))
}

//! File CLI commands: listing, placement, rename, upload, delete.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use clap::{Args, Subcommand};
use tabled::Tabled;

use mediadesk_core::error::{AppError, ErrorKind};
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::blob::BlobUpload;
use mediadesk_core::types::{FileId, FolderId};
use mediadesk_entity::listing::{DirectoryEntry, DirectoryListing};
use mediadesk_service::{MoveFilesRequest, ServiceContext};

use crate::output::{self, OutputFormat};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List a folder: child folders first, then files
    Ls {
        /// Folder ID (omit for root)
        folder: Option<FolderId>,
    },
    /// Move files into a folder
    Move {
        /// File IDs
        #[arg(required = true)]
        ids: Vec<FileId>,
        /// Destination folder ID (omit for root)
        #[arg(short, long)]
        to: Option<FolderId>,
    },
    /// Set the display name of a file
    Rename {
        /// File ID
        id: FileId,
        /// New display name
        name: String,
    },
    /// Upload local files to the Blob Store
    Upload {
        /// Paths of the files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Destination folder ID (omit for root)
        #[arg(short, long)]
        to: Option<FolderId>,
    },
    /// Delete a file from the Blob Store
    Delete {
        /// File ID
        id: FileId,
    },
}

/// Listing display row
#[derive(Debug, Tabled)]
struct EntryRow {
    /// Entry kind
    kind: &'static str,
    /// Folder or file ID
    id: String,
    /// Display name
    name: String,
    /// Item count for folders, byte size for files
    size: String,
}

impl From<&DirectoryEntry> for EntryRow {
    fn from(entry: &DirectoryEntry) -> Self {
        match entry {
            DirectoryEntry::Folder(f) => Self {
                kind: "folder",
                id: f.id.to_string(),
                name: f.name.clone(),
                size: format!("{} item(s)", f.item_count),
            },
            DirectoryEntry::File(f) => Self {
                kind: "file",
                id: f.record.id.to_string(),
                name: f.display_name.clone(),
                size: format!("{} B", f.record.size),
            },
        }
    }
}

/// Execute file commands
pub async fn execute(args: &FileArgs, ctx: &ServiceContext, format: OutputFormat) -> AppResult<()> {
    match &args.command {
        FileCommand::Ls { folder } => {
            let listing = ctx.listings.list(*folder).await;
            print_listing(&listing, format);
        }
        FileCommand::Move { ids, to } => {
            ctx.files
                .move_files(MoveFilesRequest {
                    file_ids: ids.clone(),
                    target_folder_id: *to,
                })
                .await?;
            let target = to.map_or_else(|| "root".to_string(), |t| t.to_string());
            output::print_success(&format!("Moved {} file(s) to {target}", ids.len()), ids, format);
        }
        FileCommand::Rename { id, name } => {
            ctx.files.rename_file(id, name).await?;
            output::print_success(&format!("File {id} renamed to '{}'", name.trim()), id, format);
        }
        FileCommand::Upload { paths, to } => {
            let mut uploads = Vec::with_capacity(paths.len());
            for path in paths {
                uploads.push(read_upload(path).await?);
            }
            let created = ctx.files.upload(uploads, *to).await?;
            output::print_success(&format!("Uploaded {} file(s)", created.len()), &created, format);
        }
        FileCommand::Delete { id } => {
            ctx.files.delete_file(id).await?;
            output::print_success(&format!("File {id} deleted"), id, format);
        }
    }
    Ok(())
}

fn print_listing(listing: &DirectoryListing, format: OutputFormat) {
    if let Some(err) = &listing.blob_error {
        output::print_warning(&format!("Files unavailable: {err}"));
    }
    let rows: Vec<EntryRow> = listing.entries.iter().map(EntryRow::from).collect();
    output::print_rows(&rows, listing, format);
}

async fn read_upload(path: &Path) -> AppResult<BlobUpload> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::validation(format!("Invalid file path: {}", path.display())))?
        .to_string();

    let data = tokio::fs::read(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::NotFound,
            format!("Failed to read {}", path.display()),
            e,
        )
    })?;

    let mime_type = mime_guess::from_path(path).first().map(|m| m.to_string());
    Ok(BlobUpload {
        name,
        mime_type,
        data: Bytes::from(data),
    })
}

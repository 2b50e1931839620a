//! Folder management CLI commands.

use clap::{Args, Subcommand};
use tabled::Tabled;

use mediadesk_core::result::AppResult;
use mediadesk_core::types::FolderId;
use mediadesk_entity::folder::{Folder, FolderTree};
use mediadesk_entity::navigation::Breadcrumb;
use mediadesk_service::{CreateFolderRequest, MoveFolderRequest, ServiceContext};

use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List the folders inside a folder
    List {
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent: Option<FolderId>,
    },
    /// Create a new folder
    Create {
        /// Folder name
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent: Option<FolderId>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        id: FolderId,
        /// New name
        name: String,
    },
    /// Move a folder under another folder
    Move {
        /// Folder ID
        id: FolderId,
        /// Destination folder ID (omit for root)
        #[arg(short, long)]
        to: Option<FolderId>,
    },
    /// Delete a folder and everything below it
    Delete {
        /// Folder ID
        id: FolderId,
    },
    /// Show the folder tree
    Tree {
        /// Leave out this folder and its descendants (move-target view)
        #[arg(short, long)]
        exclude: Option<FolderId>,
        /// Only show folders whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show the breadcrumb path of a folder
    Path {
        /// Folder ID
        id: FolderId,
    },
}

/// Folder display row
#[derive(Debug, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Item count
    items: u64,
    /// Last update
    updated_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            items: f.item_count,
            updated_at: f.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Tree display row
#[derive(Debug, Tabled)]
struct TreeRow {
    /// Folder ID
    id: String,
    /// Indented name
    name: String,
    /// Full path
    path: String,
}

/// Breadcrumb display row
#[derive(Debug, Tabled)]
struct CrumbRow {
    /// Position
    index: usize,
    /// Folder ID
    id: String,
    /// Name
    name: String,
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    ctx: &ServiceContext,
    format: OutputFormat,
) -> AppResult<()> {
    match &args.command {
        FolderCommand::List { parent } => {
            let listing = ctx.listings.list(*parent).await;
            let folders: Vec<&Folder> = listing.folders().collect();
            let rows: Vec<FolderRow> = folders.iter().map(|f| FolderRow::from(*f)).collect();
            output::print_rows(&rows, &folders, format);
        }
        FolderCommand::Create { name, parent } => {
            let folder = ctx
                .folders
                .create_folder(CreateFolderRequest {
                    parent_id: *parent,
                    name: name.clone(),
                })
                .await?;
            output::print_success(
                &format!("Folder '{}' created (id: {})", folder.name, folder.id),
                &folder,
                format,
            );
        }
        FolderCommand::Rename { id, name } => {
            let folder = ctx.folders.rename_folder(*id, name).await?;
            output::print_success(&format!("Folder renamed to '{}'", folder.name), &folder, format);
        }
        FolderCommand::Move { id, to } => {
            let folder = ctx
                .folders
                .move_folder(*id, MoveFolderRequest { new_parent_id: *to })
                .await?;
            let target = to.map_or_else(|| "root".to_string(), |t| t.to_string());
            output::print_success(
                &format!("Folder '{}' moved to {target}", folder.name),
                &folder,
                format,
            );
        }
        FolderCommand::Delete { id } => {
            let outcome = ctx.folders.delete_folder(*id).await?;
            output::print_success(
                &format!(
                    "Deleted {} folder(s); {} file(s) returned to root",
                    outcome.folders_removed.len(),
                    outcome.files_unmapped
                ),
                &outcome,
                format,
            );
        }
        FolderCommand::Tree { exclude, filter } => {
            let tree = ctx.trees.build(*exclude, filter.as_deref()).await;
            output::print_rows(&tree_rows(&tree), &tree, format);
        }
        FolderCommand::Path { id } => {
            let mut crumbs = vec![Breadcrumb::root()];
            crumbs.extend(ctx.folders.path(*id).await.iter().map(Breadcrumb::from));
            if crumbs.len() == 1 {
                output::print_warning(&format!("Folder {id} not found"));
            }
            let rows: Vec<CrumbRow> = crumbs
                .iter()
                .enumerate()
                .map(|(index, c)| CrumbRow {
                    index,
                    id: c.id.map(|id| id.to_string()).unwrap_or_default(),
                    name: c.name.clone(),
                })
                .collect();
            output::print_rows(&rows, &crumbs, format);
        }
    }
    Ok(())
}

fn tree_rows(tree: &FolderTree) -> Vec<TreeRow> {
    tree.iter()
        .map(|node| TreeRow {
            id: node.id.to_string(),
            name: format!("{}{}", "  ".repeat(node.depth), node.name),
            path: node.display_path(),
        })
        .collect()
}

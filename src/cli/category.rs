//! Category CLI commands
//!
//! Implements CLI commands for the income and expense category lists.

use clap::Subcommand;

use super::{clearable, parse_with};
use crate::display::format_category_list;
use crate::error::HoaResult;
use crate::models::{CategoryKind, CategoryPatch, NewCategory};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List the categories of one kind
    List {
        /// income or expense
        #[arg(short, long)]
        kind: String,
    },

    /// Add a custom category
    Add {
        name: String,
        #[arg(short, long)]
        kind: String,
        #[arg(long)]
        description: Option<String>,
        /// Hex color, e.g. "#22c55e"
        #[arg(long)]
        color: Option<String>,
    },

    /// Edit a category
    Edit {
        id: String,
        #[arg(short, long)]
        kind: String,
        #[arg(long)]
        name: Option<String>,
        /// New description; an empty value clears it
        #[arg(long)]
        description: Option<String>,
        /// New color; an empty value clears it
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a custom category
    Delete {
        id: String,
        #[arg(short, long)]
        kind: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> HoaResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let kind: CategoryKind = parse_with(&kind)?;
            println!("{}", format_category_list(&service.list(kind)?));
        }

        CategoryCommands::Add {
            name,
            kind,
            description,
            color,
        } => {
            let kind: CategoryKind = parse_with(&kind)?;
            let mut draft = NewCategory::named(name);
            draft.description = description;
            draft.color = color;

            let category = service.add(kind, draft)?;
            println!(
                "Added {} category '{}' with id {}",
                kind, category.name, category.id
            );
        }

        CategoryCommands::Edit {
            id,
            kind,
            name,
            description,
            color,
            active,
        } => {
            let kind: CategoryKind = parse_with(&kind)?;
            let patch = CategoryPatch {
                name,
                description: clearable(description),
                color: clearable(color),
                active,
            };
            match service.update(kind, &id, &patch)? {
                Some(category) => println!("Updated category '{}'", category.name),
                None => println!("No {} category with id {}; nothing changed", kind, id),
            }
        }

        CategoryCommands::Delete { id, kind } => {
            let kind: CategoryKind = parse_with(&kind)?;
            if service.delete(kind, &id)? {
                println!("Deleted {} category {}", kind, id);
                println!("Existing entries keep their category text.");
            } else {
                println!("No {} category with id {}; nothing deleted", kind, id);
            }
        }
    }

    Ok(())
}

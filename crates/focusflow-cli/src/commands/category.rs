//! Category management commands.

use clap::Subcommand;
use focusflow_core::models::{CategoryDraft, DEFAULT_CATEGORY_COLOR};

use super::{guarded_client, print_json, CmdResult};

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories
    List,
    /// Get category details
    Get {
        /// Category ID
        id: i64,
    },
    /// Create a category
    Create {
        /// Category name
        name: String,
        /// Color as #RRGGBB
        #[arg(long, default_value = DEFAULT_CATEGORY_COLOR)]
        color: String,
    },
    /// Rename or recolor a category
    Update {
        /// Category ID
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a category
    Delete {
        /// Category ID
        id: i64,
    },
}

pub async fn run(action: CategoryAction) -> CmdResult {
    let (_, client) = guarded_client()?;

    match action {
        CategoryAction::List => print_json(&client.list_categories().await?)?,
        CategoryAction::Get { id } => print_json(&client.get_category(id).await?)?,
        CategoryAction::Create { name, color } => {
            let draft = CategoryDraft {
                name: Some(name),
                color_hex: Some(color),
            };
            draft.validate()?;
            print_json(&client.create_category(&draft).await?)?;
        }
        CategoryAction::Update { id, name, color } => {
            let draft = CategoryDraft { name, color_hex: color };
            draft.validate()?;
            print_json(&client.update_category(id, &draft).await?)?;
        }
        CategoryAction::Delete { id } => {
            client.delete_category(id).await?;
            println!("Category deleted: {id}");
        }
    }
    Ok(())
}

//! Categories group events and give them a color.

use serde::{Deserialize, Serialize};

use super::HasId;
use crate::error::ValidationError;

/// Default emerald green used by the backend for new categories.
pub const DEFAULT_CATEGORY_COLOR: &str = "#50C878";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_color")]
    pub color_hex: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

impl HasId for Category {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Body of `POST /categories/` and `PUT /categories/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategoryDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_hex: Option<String>,
}

impl CategoryDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(color) = &self.color_hex {
            if !is_hex_color(color) {
                return Err(ValidationError::InvalidValue {
                    field: "color_hex".into(),
                    message: format!("'{color}' is not a #RRGGBB color"),
                });
            }
        }
        Ok(())
    }
}

/// Accepts `#RGB` and `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

//! The closed set of query intents.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssistantError;

/// What a query is asking the assistant to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Search,
    Quantity,
    Location,
    ListCategory,
    LowStock,
    Price,
    Unknown,
}

impl Intent {
    pub const COUNT: usize = 7;

    /// Tie-break order used by the classifier: when two intents score exactly
    /// the same, the one listed first wins.
    pub const PRECEDENCE: [Intent; Intent::COUNT] = [
        Intent::Search,
        Intent::Quantity,
        Intent::Location,
        Intent::ListCategory,
        Intent::LowStock,
        Intent::Price,
        Intent::Unknown,
    ];

    /// Position in [`Intent::PRECEDENCE`].
    pub fn index(self) -> usize {
        match self {
            Intent::Search => 0,
            Intent::Quantity => 1,
            Intent::Location => 2,
            Intent::ListCategory => 3,
            Intent::LowStock => 4,
            Intent::Price => 5,
            Intent::Unknown => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Intent::Search => "search",
            Intent::Quantity => "quantity",
            Intent::Location => "location",
            Intent::ListCategory => "list_category",
            Intent::LowStock => "low_stock",
            Intent::Price => "price",
            Intent::Unknown => "unknown",
        }
    }
}

impl core::fmt::Display for Intent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Intent {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(Intent::Search),
            "quantity" => Ok(Intent::Quantity),
            "location" => Ok(Intent::Location),
            "list_category" | "category_list" => Ok(Intent::ListCategory),
            "low_stock" => Ok(Intent::LowStock),
            "price" => Ok(Intent::Price),
            "unknown" => Ok(Intent::Unknown),
            other => Err(AssistantError::UnsupportedIntent(other.to_string())),
        }
    }
}

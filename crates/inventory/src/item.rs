use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mustock_core::{DomainError, DomainResult, ItemId};

/// Reorder level applied when a record does not carry its own.
pub const DEFAULT_MINIMUM_STOCK_LEVEL: u32 = 5;

/// Product category.
///
/// The warehouse works with a fixed category set. Records carrying any other
/// label are tolerated as [`Category::Other`] but are never matched by
/// category queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    ElectricGuitars,
    AcousticGuitars,
    BassGuitars,
    Keyboards,
    DrumsAndPercussion,
    StudioEquipment,
    Amplifiers,
    EffectsPedals,
    Accessories,
    VintageEquipment,
    Other(String),
}

impl Category {
    /// Every known category, in catalog order.
    pub const KNOWN: [Category; 10] = [
        Category::ElectricGuitars,
        Category::AcousticGuitars,
        Category::BassGuitars,
        Category::Keyboards,
        Category::DrumsAndPercussion,
        Category::StudioEquipment,
        Category::Amplifiers,
        Category::EffectsPedals,
        Category::Accessories,
        Category::VintageEquipment,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::ElectricGuitars => "Electric Guitars",
            Category::AcousticGuitars => "Acoustic Guitars",
            Category::BassGuitars => "Bass Guitars",
            Category::Keyboards => "Keyboards",
            Category::DrumsAndPercussion => "Drums & Percussion",
            Category::StudioEquipment => "Studio Equipment",
            Category::Amplifiers => "Amplifiers",
            Category::EffectsPedals => "Effects Pedals",
            Category::Accessories => "Accessories",
            Category::VintageEquipment => "Vintage Equipment",
            Category::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }

    /// Case-insensitive lookup; unrecognized labels become [`Category::Other`].
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        Self::KNOWN
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Category::Other(trimmed.to_string()))
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::parse(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

/// Physical condition of a stocked item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Condition {
    #[default]
    New,
    Used,
    Refurbished,
    Damaged,
}

/// One inventory record as supplied by the inventory store.
///
/// This is a read model: the assistant reads it, never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: Category,
    pub quantity: u32,
    #[serde(default = "default_minimum_stock_level", alias = "minimumStockLevel")]
    pub minimum_stock_level: u32,
    pub price: Decimal,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_minimum_stock_level() -> u32 {
    DEFAULT_MINIMUM_STOCK_LEVEL
}

impl CatalogItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<Category>,
        quantity: u32,
        price: Decimal,
    ) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            description: None,
            category: category.into(),
            quantity,
            minimum_stock_level: DEFAULT_MINIMUM_STOCK_LEVEL,
            price,
            location: String::new(),
            sku: None,
            barcode: None,
            condition: Condition::New,
            tags: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_minimum_stock_level(mut self, level: u32) -> Self {
        self.minimum_stock_level = level;
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Per-item reorder check (`quantity <= minimum_stock_level`).
    ///
    /// This is the store's own threshold and is independent of the query-time
    /// low-stock threshold used by the assistant.
    pub fn is_below_minimum(&self) -> bool {
        self.quantity <= self.minimum_stock_level
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(DomainError::validation(format!(
                "price cannot be negative (item: {})",
                self.name
            )));
        }
        Ok(())
    }
}

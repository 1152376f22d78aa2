use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mustock_core::{DomainError, DomainResult, ItemId};

use crate::item::{CatalogItem, Category};

/// Position of an item inside one [`CatalogSnapshot`].
///
/// Only meaningful for the snapshot it was obtained from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemRef(usize);

impl ItemRef {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Immutable, point-in-time view of the inventory.
///
/// Hosts build one per query (or share one across queries); the assistant
/// only ever reads from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct CatalogSnapshot {
    items: Vec<CatalogItem>,
    version: u64,
    taken_at: DateTime<Utc>,
}

/// Wire form; validated by [`CatalogSnapshot::new`] on the way in.
#[derive(Deserialize)]
struct RawSnapshot {
    items: Vec<CatalogItem>,
    #[serde(default)]
    version: u64,
    #[serde(default = "Utc::now")]
    taken_at: DateTime<Utc>,
}

impl TryFrom<RawSnapshot> for CatalogSnapshot {
    type Error = DomainError;

    fn try_from(raw: RawSnapshot) -> DomainResult<Self> {
        let mut snapshot = Self::new(raw.items)?.with_version(raw.version);
        snapshot.taken_at = raw.taken_at;
        Ok(snapshot)
    }
}

impl CatalogSnapshot {
    /// Build a snapshot, validating every record.
    ///
    /// Item ids must be unique within a snapshot.
    pub fn new(items: Vec<CatalogItem>) -> DomainResult<Self> {
        let mut ids = HashSet::with_capacity(items.len());
        for item in &items {
            item.validate()?;
            if !ids.insert(item.id) {
                return Err(DomainError::invariant(format!("duplicate item id {}", item.id)));
            }
        }
        Ok(Self {
            items,
            version: 0,
            taken_at: Utc::now(),
        })
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            version: 0,
            taken_at: Utc::now(),
        }
    }

    /// Tag the snapshot with the store's catalog version.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item: ItemRef) -> Option<&CatalogItem> {
        self.items.get(item.0)
    }

    /// Items paired with their references, in catalog order.
    pub fn iter_refs(&self) -> impl Iterator<Item = (ItemRef, &CatalogItem)> + '_ {
        self.items.iter().enumerate().map(|(i, item)| (ItemRef(i), item))
    }

    /// Distinct known categories, in order of first appearance.
    pub fn categories(&self) -> Vec<&Category> {
        let mut seen: Vec<&Category> = Vec::new();
        for item in &self.items {
            if item.category.is_known() && !seen.contains(&&item.category) {
                seen.push(&item.category);
            }
        }
        seen
    }

    pub fn find_by_id(&self, id: ItemId) -> DomainResult<(ItemRef, &CatalogItem)> {
        self.iter_refs()
            .find(|(_, item)| item.id == id)
            .ok_or_else(DomainError::not_found)
    }

    pub fn find_by_barcode(&self, barcode: &str) -> Option<(ItemRef, &CatalogItem)> {
        let barcode = barcode.trim();
        self.iter_refs()
            .find(|(_, item)| item.barcode.as_deref().map(str::trim) == Some(barcode))
    }

    pub fn find_by_sku(&self, sku: &str) -> Option<(ItemRef, &CatalogItem)> {
        let sku = sku.trim();
        self.iter_refs()
            .find(|(_, item)| item.sku.as_deref().is_some_and(|s| s.trim().eq_ignore_ascii_case(sku)))
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

//! Inventory medicine records.

use serde::{Deserialize, Serialize};

use super::pack::PackInfo;
use crate::packaging::parse_pack_info;

/// Medicine identifier as assigned by the inventory backend.
pub type MedicineId = i64;

/// A medicine record as served by the inventory API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Inventory identifier
    pub id: MedicineId,
    /// Display name, possibly carrying a "(1 pack = N unit)" suffix
    pub name: String,
    /// Category (e.g., "Analgesic")
    #[serde(default)]
    pub category: String,
    /// Current stock in storage units; may be fractional
    #[serde(default)]
    pub quantity: f64,
    /// Storage unit label (e.g., "packs", "jars", "bottles")
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Stock level at or below which the item needs reordering
    #[serde(default = "default_reorder_level")]
    pub reorder_level: f64,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Structured pack size; bypasses name parsing when set with `pack_unit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_size: Option<u32>,
    /// Structured dispensing unit; bypasses name parsing when set with `pack_size`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_unit: Option<String>,
}

fn default_unit() -> String {
    "units".into()
}

fn default_reorder_level() -> f64 {
    10.0
}

impl Medicine {
    /// Create a new medicine record with required fields.
    pub fn new(id: MedicineId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: String::new(),
            quantity: 0.0,
            unit: default_unit(),
            reorder_level: default_reorder_level(),
            description: None,
            pack_size: None,
            pack_unit: None,
        }
    }

    /// Set stock quantity and storage unit.
    pub fn with_stock(mut self, quantity: f64, unit: impl Into<String>) -> Self {
        self.quantity = quantity;
        self.unit = unit.into();
        self
    }

    /// Packaging metadata for this medicine.
    ///
    /// Structured fields win; legacy records fall back to parsing the name.
    /// A leftover suffix in the name never leaks into the base name.
    pub fn pack_info(&self) -> PackInfo {
        match (self.pack_size, &self.pack_unit) {
            (Some(size), Some(unit)) => {
                let base_name = parse_pack_info(&self.name).base_name;
                PackInfo::packaged(base_name.trim(), size, unit.clone())
            }
            _ => parse_pack_info(&self.name),
        }
    }

    /// Move packaging metadata out of a legacy name into the structured fields.
    ///
    /// Records that already carry structured fields keep them; only the
    /// suffix is stripped from the name. Returns true if the record changed.
    pub fn migrate_pack_fields(&mut self) -> bool {
        let info = parse_pack_info(&self.name);
        let Some(pack) = info.pack else {
            return false;
        };

        if self.pack_size.is_some() && self.pack_unit.is_some() {
            tracing::debug!(id = self.id, medicine = %self.name, "stripping stale pack suffix");
        } else {
            tracing::debug!(id = self.id, medicine = %self.name, "migrating pack suffix to fields");
            self.pack_size = Some(pack.pack_size);
            self.pack_unit = Some(pack.pack_unit);
        }
        self.name = info.base_name;
        true
    }

    /// No stock left.
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0.0
    }

    /// Stock at or below the reorder level.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

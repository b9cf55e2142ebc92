//! In-memory medicine catalog as served by the inventory API.
//!
//! Provides lookup, search, and the display labels used by the inventory
//! table and the prescribing form.

mod search;

pub use search::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RxConfig;
use crate::models::{Medicine, MedicineId};

/// Catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid medicine list JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// One row of the inventory table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRow {
    pub id: MedicineId,
    /// Name with packaging suffix stripped
    pub base_name: String,
    pub category: String,
    /// e.g. "200 tablets/pack"
    pub pack_summary: Option<String>,
    /// e.g. "5 packs"
    pub stock_label: String,
    /// e.g. "1000 tablets total"
    pub total_units_label: Option<String>,
    pub low_stock: bool,
    pub out_of_stock: bool,
}

/// The medicine list currently loaded in the UI.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    medicines: Vec<Medicine>,
    config: RxConfig,
}

impl Catalog {
    /// Create a catalog with the default configuration.
    pub fn new(medicines: Vec<Medicine>) -> Self {
        Self::with_config(medicines, RxConfig::default())
    }

    /// Create a catalog with an explicit configuration.
    pub fn with_config(medicines: Vec<Medicine>, config: RxConfig) -> Self {
        Self { medicines, config }
    }

    /// Parse the medicine list returned by the inventory API.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let medicines: Vec<Medicine> = serde_json::from_str(json)?;
        tracing::debug!(count = medicines.len(), "loaded medicine catalog");
        Ok(Self::new(medicines))
    }

    /// Replace the medicine list, keeping the configuration.
    pub fn replace(&mut self, medicines: Vec<Medicine>) {
        self.medicines = medicines;
    }

    pub fn config(&self) -> &RxConfig {
        &self.config
    }

    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn into_medicines(self) -> Vec<Medicine> {
        self.medicines
    }

    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    /// Get a medicine by ID.
    pub fn get(&self, id: MedicineId) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    /// Label for the prescribing form's medicine picker.
    ///
    /// e.g. "Tab Panadol - Stock: 5 packs (200 tablets/pack)"
    pub fn option_label(&self, medicine: &Medicine) -> String {
        let info = medicine.pack_info();
        let mut label = format!(
            "{} - Stock: {} {}",
            info.base_name,
            self.config.display.format_packs(medicine.quantity),
            medicine.unit
        );
        if let Some(summary) = info.summary() {
            label.push_str(&format!(" ({})", summary));
        }
        if medicine.is_out_of_stock() {
            label.push_str(" (OUT OF STOCK)");
        }
        label
    }

    /// Build the inventory table row for a medicine.
    pub fn inventory_row(&self, medicine: &Medicine) -> InventoryRow {
        let info = medicine.pack_info();
        let precision = &self.config.display;
        let total_units_label = info.pack.as_ref().map(|pack| {
            format!(
                "{} {} total",
                precision.format_units(pack.to_dispensing_units(medicine.quantity)),
                pack.pack_unit
            )
        });

        InventoryRow {
            id: medicine.id,
            pack_summary: info.summary(),
            base_name: info.base_name,
            category: medicine.category.clone(),
            stock_label: format!(
                "{} {}",
                precision.format_packs(medicine.quantity),
                medicine.unit
            ),
            total_units_label,
            low_stock: medicine.is_low_stock(),
            out_of_stock: medicine.is_out_of_stock(),
        }
    }

    /// Rows for the whole inventory table.
    pub fn inventory_rows(&self) -> Vec<InventoryRow> {
        self.medicines
            .iter()
            .map(|m| self.inventory_row(m))
            .collect()
    }

    /// Medicines at or below their reorder level.
    pub fn low_stock(&self) -> Vec<&Medicine> {
        self.medicines.iter().filter(|m| m.is_low_stock()).collect()
    }

    /// Medicines with no stock left.
    pub fn out_of_stock(&self) -> Vec<&Medicine> {
        self.medicines
            .iter()
            .filter(|m| m.is_out_of_stock())
            .collect()
    }
}

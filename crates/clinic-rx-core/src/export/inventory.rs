//! Inventory snapshot export.

use serde::{Deserialize, Serialize};

use super::escape_csv;
use crate::catalog::Catalog;
use crate::models::MedicineId;

/// Inventory snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryExport {
    /// Export timestamp
    pub exported_at: String,
    /// One item per catalog medicine
    pub items: Vec<InventoryExportItem>,
}

/// Single medicine in an inventory snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryExportItem {
    pub id: MedicineId,
    pub name: String,
    pub base_name: String,
    pub category: String,
    /// Stock in storage units
    pub quantity: f64,
    /// Storage unit label
    pub unit: String,
    pub pack_size: Option<u32>,
    pub pack_unit: Option<String>,
    /// Stock in dispensing units, when a pack size is declared
    pub total_units: Option<f64>,
    pub reorder_level: f64,
    pub low_stock: bool,
}

impl InventoryExport {
    /// Snapshot every medicine in the catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let items = catalog
            .medicines()
            .iter()
            .map(|medicine| {
                let info = medicine.pack_info();
                InventoryExportItem {
                    id: medicine.id,
                    name: medicine.name.clone(),
                    pack_size: info.pack_size(),
                    pack_unit: info.pack_unit().map(str::to_string),
                    total_units: info
                        .pack
                        .as_ref()
                        .map(|pack| pack.to_dispensing_units(medicine.quantity)),
                    base_name: info.base_name,
                    category: medicine.category.clone(),
                    quantity: medicine.quantity,
                    unit: medicine.unit.clone(),
                    reorder_level: medicine.reorder_level,
                    low_stock: medicine.is_low_stock(),
                }
            })
            .collect();

        Self {
            exported_at: chrono::Utc::now().to_rfc3339(),
            items,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str(
            "id,name,base_name,category,quantity,unit,pack_size,pack_unit,total_units,reorder_level,low_stock\n",
        );

        for item in &self.items {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{}\n",
                item.id,
                escape_csv(&item.name),
                escape_csv(&item.base_name),
                escape_csv(&item.category),
                item.quantity,
                escape_csv(&item.unit),
                item.pack_size.map(|s| s.to_string()).unwrap_or_default(),
                escape_csv(item.pack_unit.as_deref().unwrap_or("")),
                item.total_units.map(|t| t.to_string()).unwrap_or_default(),
                item.reorder_level,
                item.low_stock,
            ));
        }

        csv
    }
}

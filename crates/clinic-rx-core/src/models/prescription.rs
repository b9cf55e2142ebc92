//! Prescription models for a single patient visit.

use serde::{Deserialize, Serialize};

use super::medicine::MedicineId;
use crate::packaging::DisplayPrecision;

/// Denomination a doctor enters quantities in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionMode {
    /// Dispensing units (tablets, sachets, ...)
    #[default]
    Units,
    /// Storage units (packs, jars, ...)
    Packs,
}

/// One accepted line of a prescription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionLine {
    /// Medicine being prescribed
    pub medicine_id: MedicineId,
    /// Full medicine name as stored in inventory
    pub name: String,
    /// Name with packaging suffix stripped
    pub base_name: String,
    /// Denomination the quantity was entered in
    pub mode: PrescriptionMode,
    /// Exact amount to deduct from stock, in storage units
    pub quantity_in_packs: f64,
    /// Storage unit label (e.g., "packs")
    pub storage_unit: String,
    /// Quantity in dispensing units, when the medicine declares a pack size
    pub quantity_in_units: Option<f64>,
    /// Dispensing unit label, when the medicine declares a pack size
    pub dispensing_unit: Option<String>,
    /// Human-readable dosage for the prescription sheet
    pub dosage: String,
    /// Human-readable stock deduction (e.g., "0.10 packs")
    pub deduction_label: String,
}

/// Stock available for a medicine, in both denominations where possible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailableStock {
    pub storage_quantity: f64,
    pub storage_unit: String,
    pub dispensing_quantity: Option<f64>,
    pub dispensing_unit: Option<String>,
}

impl AvailableStock {
    /// Describe the stock in the denomination the doctor is working in.
    pub fn describe(&self, mode: PrescriptionMode, precision: &DisplayPrecision) -> String {
        let packs = format!(
            "{} {}",
            precision.format_packs(self.storage_quantity),
            self.storage_unit
        );
        let units = match (self.dispensing_quantity, &self.dispensing_unit) {
            (Some(q), Some(unit)) => Some(format!("{} {}", precision.format_units(q), unit)),
            _ => None,
        };

        match (mode, units) {
            (PrescriptionMode::Units, Some(units)) => format!("{} ({})", units, packs),
            (PrescriptionMode::Packs, Some(units)) => format!("{} ({})", packs, units),
            (_, None) => packs,
        }
    }
}

/// The prescription list being assembled for one visit.
///
/// Owned by the prescribing form; lines are added and removed in response
/// to discrete user actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionDraft {
    /// Unique draft ID
    pub draft_id: String,
    /// Accepted lines, in the order they were added
    pub lines: Vec<PrescriptionLine>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Default for PrescriptionDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl PrescriptionDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            draft_id: uuid::Uuid::new_v4().to_string(),
            lines: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether a medicine is already on the list.
    pub fn contains(&self, medicine_id: MedicineId) -> bool {
        self.lines.iter().any(|line| line.medicine_id == medicine_id)
    }

    /// Accepted lines.
    pub fn lines(&self) -> &[PrescriptionLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove the line at `index`.
    pub fn remove_line(&mut self, index: usize) -> Option<PrescriptionLine> {
        if index >= self.lines.len() {
            return None;
        }
        let removed = self.lines.remove(index);
        tracing::info!(
            draft_id = %self.draft_id,
            medicine_id = removed.medicine_id,
            "{} removed from prescription",
            removed.name
        );
        self.touch();
        Some(removed)
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

//! Prescription line validation.
//!
//! Pipeline: Quantity check → Denomination conversion → Stock check → Duplicate guard
//!
//! Every rejection is recoverable: the draft is left untouched and the doctor
//! can adjust the quantity or medicine and try again.

mod draft;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::config::RxConfig;
use crate::models::{
    AvailableStock, Medicine, MedicineId, PrescriptionDraft, PrescriptionLine, PrescriptionMode,
};
use crate::packaging::ConversionError;

/// Prescribing errors. Messages are shown to the doctor as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrescribeError {
    #[error("Quantity must be greater than zero, got {0}")]
    InvalidQuantity(f64),

    #[error("Medicine not found: {0}")]
    MedicineNotFound(MedicineId),

    #[error("{name} has no pack size; prescribe it in {storage_unit}")]
    DispensingUnitUnavailable { name: String, storage_unit: String },

    #[error("Insufficient stock! Only {available} available.")]
    InsufficientStock {
        name: String,
        available: String,
        stock: AvailableStock,
    },

    #[error("This medicine is already added. Remove it first to change quantity.")]
    AlreadyPrescribed { name: String },

    #[error("Please prescribe at least one medicine")]
    EmptyPrescription,

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

pub type PrescribeResult<T> = Result<T, PrescribeError>;

/// Validates prescription requests against stock and the current draft.
pub struct Prescriber<'a> {
    config: &'a RxConfig,
}

impl<'a> Prescriber<'a> {
    /// Create a new prescriber.
    pub fn new(config: &'a RxConfig) -> Self {
        Self { config }
    }

    /// Validate a request and build the line it would add, without touching the draft.
    pub fn build_line(
        &self,
        draft: &PrescriptionDraft,
        medicine: &Medicine,
        quantity: f64,
        mode: PrescriptionMode,
    ) -> PrescribeResult<PrescriptionLine> {
        let result = self.check_line(draft, medicine, quantity, mode);
        if let Err(e) = &result {
            tracing::warn!(
                draft_id = %draft.draft_id,
                medicine_id = medicine.id,
                quantity,
                ?mode,
                "prescription line rejected: {}",
                e
            );
        }
        result
    }

    /// Validate a request and append the resulting line to the draft.
    pub fn add_line<'d>(
        &self,
        draft: &'d mut PrescriptionDraft,
        medicine: &Medicine,
        quantity: f64,
        mode: PrescriptionMode,
    ) -> PrescribeResult<&'d PrescriptionLine> {
        let line = self.build_line(draft, medicine, quantity, mode)?;
        tracing::info!(
            draft_id = %draft.draft_id,
            medicine_id = line.medicine_id,
            deduction = line.quantity_in_packs,
            "{} added to prescription",
            line.name
        );
        draft.lines.push(line);
        draft.touch();
        Ok(&draft.lines[draft.lines.len() - 1])
    }

    /// Look a medicine up in the catalog and add it to the draft.
    pub fn add_from_catalog<'d>(
        &self,
        draft: &'d mut PrescriptionDraft,
        catalog: &Catalog,
        medicine_id: MedicineId,
        quantity: f64,
        mode: PrescriptionMode,
    ) -> PrescribeResult<&'d PrescriptionLine> {
        let medicine = catalog.get(medicine_id).ok_or_else(|| {
            tracing::warn!(draft_id = %draft.draft_id, medicine_id, "medicine not in catalog");
            PrescribeError::MedicineNotFound(medicine_id)
        })?;
        self.add_line(draft, medicine, quantity, mode)
    }

    fn check_line(
        &self,
        draft: &PrescriptionDraft,
        medicine: &Medicine,
        quantity: f64,
        mode: PrescriptionMode,
    ) -> PrescribeResult<PrescriptionLine> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(PrescribeError::InvalidQuantity(quantity));
        }

        let pack_info = medicine.pack_info();
        let precision = &self.config.display;

        let (quantity_in_packs, quantity_in_units) = match (mode, &pack_info.pack) {
            (PrescriptionMode::Units, Some(pack)) => {
                (pack.to_storage_units(quantity)?, Some(quantity))
            }
            // Plain items are only tracked in their storage unit
            (PrescriptionMode::Units, None) => {
                return Err(PrescribeError::DispensingUnitUnavailable {
                    name: pack_info.base_name,
                    storage_unit: medicine.unit.clone(),
                });
            }
            (PrescriptionMode::Packs, Some(pack)) => {
                if pack.pack_size == 0 {
                    tracing::warn!(
                        medicine_id = medicine.id,
                        medicine = %medicine.name,
                        "pack size is zero, dispensing quantity will be 0"
                    );
                }
                (quantity, Some(pack.to_dispensing_units(quantity)))
            }
            (PrescriptionMode::Packs, None) => (quantity, None),
        };

        if quantity_in_packs - medicine.quantity > self.config.stock_tolerance {
            let stock = AvailableStock {
                storage_quantity: medicine.quantity,
                storage_unit: medicine.unit.clone(),
                dispensing_quantity: pack_info
                    .pack
                    .as_ref()
                    .map(|p| p.to_dispensing_units(medicine.quantity)),
                dispensing_unit: pack_info.pack_unit().map(str::to_string),
            };
            return Err(PrescribeError::InsufficientStock {
                name: pack_info.base_name,
                available: stock.describe(mode, precision),
                stock,
            });
        }

        if draft.contains(medicine.id) {
            return Err(PrescribeError::AlreadyPrescribed {
                name: pack_info.base_name,
            });
        }

        let deduction_label = format!(
            "{} {}",
            precision.format_packs(quantity_in_packs),
            medicine.unit
        );
        let dosage = match (&pack_info.pack, quantity_in_units) {
            (Some(pack), Some(units)) => {
                format!("{} {}", precision.format_units(units), pack.pack_unit)
            }
            _ => deduction_label.clone(),
        };
        let dispensing_unit = pack_info.pack_unit().map(str::to_string);

        Ok(PrescriptionLine {
            medicine_id: medicine.id,
            name: medicine.name.clone(),
            base_name: pack_info.base_name,
            mode,
            quantity_in_packs,
            storage_unit: medicine.unit.clone(),
            quantity_in_units,
            dispensing_unit,
            dosage,
            deduction_label,
        })
    }
}

//! Quantity conversion between storage packs and dispensing units.

use thiserror::Error;

use crate::models::{PackInfo, PackSize};

/// Conversion errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Cannot convert to packs: pack size is zero")]
    DivisionByZero,

    #[error("No pack size declared for: {0}")]
    MissingPackInfo(String),
}

pub type ConversionResult<T> = Result<T, ConversionError>;

impl PackSize {
    /// Packs → dispensing units. Fractional packs are allowed.
    pub fn to_dispensing_units(&self, quantity_in_packs: f64) -> f64 {
        quantity_in_packs * f64::from(self.pack_size)
    }

    /// Dispensing units → packs, unrounded.
    pub fn to_storage_units(&self, quantity_in_units: f64) -> ConversionResult<f64> {
        if self.pack_size == 0 {
            return Err(ConversionError::DivisionByZero);
        }
        Ok(quantity_in_units / f64::from(self.pack_size))
    }
}

impl PackInfo {
    /// Packs → dispensing units for a packaged medicine.
    pub fn to_dispensing_units(&self, quantity_in_packs: f64) -> ConversionResult<f64> {
        Ok(self.declared_pack()?.to_dispensing_units(quantity_in_packs))
    }

    /// Dispensing units → packs for a packaged medicine.
    pub fn to_storage_units(&self, quantity_in_units: f64) -> ConversionResult<f64> {
        self.declared_pack()?.to_storage_units(quantity_in_units)
    }

    fn declared_pack(&self) -> ConversionResult<&PackSize> {
        self.pack
            .as_ref()
            .ok_or_else(|| ConversionError::MissingPackInfo(self.base_name.clone()))
    }
}

/// Packs → dispensing units.
pub fn to_dispensing_units(pack_info: &PackInfo, quantity_in_packs: f64) -> ConversionResult<f64> {
    pack_info.to_dispensing_units(quantity_in_packs)
}

/// Dispensing units → packs.
pub fn to_storage_units(pack_info: &PackInfo, quantity_in_units: f64) -> ConversionResult<f64> {
    pack_info.to_storage_units(quantity_in_units)
}

//! Clinic Rx Core Library
//!
//! Pack/unit handling for a clinic's medicine inventory and prescribing form.
//!
//! # Architecture
//!
//! ```text
//! REST medicine list → Catalog ──────────────► Inventory table / Export
//!                         │
//!                  parse_pack_info
//!                "(1 pack = 200 tablets)"
//!                         │
//! Doctor input ──► Prescriber: quantity → conversion → stock → duplicate
//!  (units|packs)          │
//!                 [PrescriptionDraft]
//!                         │
//!                 PrescriptionSubmission ──► backend deducts packs
//! ```
//!
//! # Core Principle
//!
//! **Stock is always kept in storage units.** Doctors may prescribe in
//! dispensing units; the draft records the exact fractional pack deduction.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Medicine, PackInfo, PrescriptionDraft, etc.)
//! - [`packaging`]: Name parsing, unit conversion, and display precision
//! - [`catalog`]: In-memory medicine list, search, and display labels
//! - [`prescribing`]: Prescription line validation
//! - [`export`]: Inventory and prescription export
//! - [`config`]: Runtime configuration

pub mod catalog;
pub mod config;
pub mod export;
pub mod models;
pub mod packaging;
pub mod prescribing;

// Re-export commonly used types
pub use catalog::{Catalog, InventoryRow, SearchHit};
pub use config::RxConfig;
pub use export::{InventoryExport, PrescriptionSubmission};
pub use models::{
    AvailableStock, Medicine, MedicineId, PackInfo, PackSize, PrescriptionDraft,
    PrescriptionLine, PrescriptionMode,
};
pub use packaging::{ConversionError, DisplayPrecision};
pub use prescribing::{PrescribeError, Prescriber};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicRxError {
    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error("{0}")]
    PrescriptionError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ConversionError> for ClinicRxError {
    fn from(e: ConversionError) -> Self {
        ClinicRxError::ConversionError(e.to_string())
    }
}

impl From<PrescribeError> for ClinicRxError {
    fn from(e: PrescribeError) -> Self {
        match e {
            PrescribeError::MedicineNotFound(_) => ClinicRxError::NotFound(e.to_string()),
            PrescribeError::InvalidQuantity(_) => ClinicRxError::InvalidInput(e.to_string()),
            PrescribeError::Conversion(inner) => inner.into(),
            _ => ClinicRxError::PrescriptionError(e.to_string()),
        }
    }
}

impl From<catalog::CatalogError> for ClinicRxError {
    fn from(e: catalog::CatalogError) -> Self {
        ClinicRxError::SerializationError(e.to_string())
    }
}

impl From<config::ConfigError> for ClinicRxError {
    fn from(e: config::ConfigError) -> Self {
        ClinicRxError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for ClinicRxError {
    fn from(e: serde_json::Error) -> Self {
        ClinicRxError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicRxError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicRxError::InternalError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Free Functions (exported to FFI)
// =========================================================================

/// Install a stderr log subscriber, e.g. `init_logging("clinic_rx_core=debug")`.
///
/// Later calls are no-ops.
#[uniffi::export]
pub fn init_logging(filter: String) {
    let filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Split a medicine name into its base name and pack size.
#[uniffi::export]
pub fn parse_pack_info(name: String) -> FfiPackInfo {
    packaging::parse_pack_info(&name).into()
}

/// Packs → dispensing units.
#[uniffi::export]
pub fn convert_to_dispensing_units(
    pack_info: FfiPackInfo,
    quantity_in_packs: f64,
) -> Result<f64, ClinicRxError> {
    let pack_info: PackInfo = pack_info.into();
    Ok(pack_info.to_dispensing_units(quantity_in_packs)?)
}

/// Dispensing units → packs.
#[uniffi::export]
pub fn convert_to_storage_units(
    pack_info: FfiPackInfo,
    quantity_in_units: f64,
) -> Result<f64, ClinicRxError> {
    let pack_info: PackInfo = pack_info.into();
    Ok(pack_info.to_storage_units(quantity_in_units)?)
}

/// Format a dispensing-unit quantity with the default precision.
#[uniffi::export]
pub fn format_unit_quantity(quantity: f64) -> String {
    packaging::format_units(quantity)
}

/// Format a storage-unit quantity with the default precision.
#[uniffi::export]
pub fn format_pack_quantity(quantity: f64) -> String {
    packaging::format_packs(quantity)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe prescribing form state for FFI.
#[derive(uniffi::Object)]
pub struct PrescriptionSession {
    catalog: Arc<Mutex<Catalog>>,
    draft: Mutex<PrescriptionDraft>,
    config: RxConfig,
}

#[uniffi::export]
impl PrescriptionSession {
    /// Create a session with the default configuration.
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::with_config(RxConfig::default()))
    }

    /// Create a session from a JSON configuration.
    #[uniffi::constructor]
    pub fn with_config_json(json: String) -> Result<Arc<Self>, ClinicRxError> {
        let config = RxConfig::from_json_str(&json)?;
        Ok(Arc::new(Self::with_config(config)))
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Replace the catalog with the medicine list from the inventory API.
    ///
    /// Returns the number of medicines loaded.
    pub fn load_catalog_json(&self, json: String) -> Result<u32, ClinicRxError> {
        let medicines = Catalog::from_json(&json)?.into_medicines();
        let count = medicines.len() as u32;
        self.catalog.lock()?.replace(medicines);
        Ok(count)
    }

    /// Rows for the inventory table.
    pub fn inventory_rows(&self) -> Result<Vec<FfiInventoryRow>, ClinicRxError> {
        let catalog = self.catalog.lock()?;
        Ok(catalog
            .inventory_rows()
            .into_iter()
            .map(|r| r.into())
            .collect())
    }

    /// Search medicines by name or category.
    pub fn search_medicines(&self, term: String) -> Result<Vec<FfiMedicineOption>, ClinicRxError> {
        let catalog = self.catalog.lock()?;
        Ok(catalog
            .search(&term)
            .into_iter()
            .map(|hit| FfiMedicineOption::new(&catalog, hit.medicine, hit.score))
            .collect())
    }

    /// Options for the medicine picker, in catalog order.
    pub fn option_labels(&self) -> Result<Vec<FfiMedicineOption>, ClinicRxError> {
        let catalog = self.catalog.lock()?;
        Ok(catalog
            .medicines()
            .iter()
            .map(|m| FfiMedicineOption::new(&catalog, m, 1.0))
            .collect())
    }

    /// Export the catalog as CSV.
    pub fn inventory_csv(&self) -> Result<String, ClinicRxError> {
        let catalog = self.catalog.lock()?;
        Ok(InventoryExport::from_catalog(&catalog).to_csv())
    }

    // =========================================================================
    // Prescription Operations
    // =========================================================================

    /// Add a medicine to the prescription.
    pub fn add_medicine(
        &self,
        medicine_id: i64,
        quantity: f64,
        mode: FfiPrescriptionMode,
    ) -> Result<FfiPrescriptionLine, ClinicRxError> {
        let catalog = self.catalog.lock()?;
        let mut draft = self.draft.lock()?;
        let line = Prescriber::new(&self.config).add_from_catalog(
            &mut draft,
            &catalog,
            medicine_id,
            quantity,
            mode.into(),
        )?;
        Ok(line.clone().into())
    }

    /// Remove the line at `index`, if present.
    pub fn remove_line(&self, index: u32) -> Result<Option<FfiPrescriptionLine>, ClinicRxError> {
        let mut draft = self.draft.lock()?;
        Ok(draft.remove_line(index as usize).map(|l| l.into()))
    }

    /// Current prescription lines.
    pub fn lines(&self) -> Result<Vec<FfiPrescriptionLine>, ClinicRxError> {
        let draft = self.draft.lock()?;
        Ok(draft.lines().iter().cloned().map(|l| l.into()).collect())
    }

    /// Submission payload as JSON.
    pub fn submission_json(&self) -> Result<String, ClinicRxError> {
        let draft = self.draft.lock()?;
        Ok(draft.submission()?.to_json()?)
    }

    /// Submission payload as CSV.
    pub fn submission_csv(&self) -> Result<String, ClinicRxError> {
        let draft = self.draft.lock()?;
        Ok(draft.submission()?.to_csv())
    }
}

impl PrescriptionSession {
    fn with_config(config: RxConfig) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(Catalog::with_config(Vec::new(), config.clone()))),
            draft: Mutex::new(PrescriptionDraft::new()),
            config,
        }
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe pack info.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPackInfo {
    pub base_name: String,
    pub has_pack_info: bool,
    pub pack_size: Option<u32>,
    pub pack_unit: Option<String>,
}

impl From<PackInfo> for FfiPackInfo {
    fn from(info: PackInfo) -> Self {
        Self {
            has_pack_info: info.has_pack_info(),
            pack_size: info.pack_size(),
            pack_unit: info.pack_unit().map(str::to_string),
            base_name: info.base_name,
        }
    }
}

impl From<FfiPackInfo> for PackInfo {
    fn from(info: FfiPackInfo) -> Self {
        match (info.has_pack_info, info.pack_size, info.pack_unit) {
            (true, Some(size), Some(unit)) => PackInfo::packaged(info.base_name, size, unit),
            _ => PackInfo::plain(info.base_name),
        }
    }
}

/// FFI-safe prescription mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiPrescriptionMode {
    Units,
    Packs,
}

impl From<FfiPrescriptionMode> for PrescriptionMode {
    fn from(mode: FfiPrescriptionMode) -> Self {
        match mode {
            FfiPrescriptionMode::Units => PrescriptionMode::Units,
            FfiPrescriptionMode::Packs => PrescriptionMode::Packs,
        }
    }
}

impl From<PrescriptionMode> for FfiPrescriptionMode {
    fn from(mode: PrescriptionMode) -> Self {
        match mode {
            PrescriptionMode::Units => FfiPrescriptionMode::Units,
            PrescriptionMode::Packs => FfiPrescriptionMode::Packs,
        }
    }
}

/// FFI-safe prescription line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrescriptionLine {
    pub medicine_id: i64,
    pub name: String,
    pub base_name: String,
    pub mode: FfiPrescriptionMode,
    pub quantity_in_packs: f64,
    pub storage_unit: String,
    pub quantity_in_units: Option<f64>,
    pub dispensing_unit: Option<String>,
    pub dosage: String,
    pub deduction_label: String,
}

impl From<PrescriptionLine> for FfiPrescriptionLine {
    fn from(line: PrescriptionLine) -> Self {
        Self {
            medicine_id: line.medicine_id,
            name: line.name,
            base_name: line.base_name,
            mode: line.mode.into(),
            quantity_in_packs: line.quantity_in_packs,
            storage_unit: line.storage_unit,
            quantity_in_units: line.quantity_in_units,
            dispensing_unit: line.dispensing_unit,
            dosage: line.dosage,
            deduction_label: line.deduction_label,
        }
    }
}

/// FFI-safe inventory table row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryRow {
    pub id: i64,
    pub base_name: String,
    pub category: String,
    pub pack_summary: Option<String>,
    pub stock_label: String,
    pub total_units_label: Option<String>,
    pub low_stock: bool,
    pub out_of_stock: bool,
}

impl From<InventoryRow> for FfiInventoryRow {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: row.id,
            base_name: row.base_name,
            category: row.category,
            pack_summary: row.pack_summary,
            stock_label: row.stock_label,
            total_units_label: row.total_units_label,
            low_stock: row.low_stock,
            out_of_stock: row.out_of_stock,
        }
    }
}

/// FFI-safe medicine picker option.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicineOption {
    pub id: i64,
    pub label: String,
    pub pack_info: FfiPackInfo,
    pub out_of_stock: bool,
    pub score: f64,
}

impl FfiMedicineOption {
    fn new(catalog: &Catalog, medicine: &Medicine, score: f64) -> Self {
        Self {
            id: medicine.id,
            label: catalog.option_label(medicine),
            pack_info: medicine.pack_info().into(),
            out_of_stock: medicine.is_out_of_stock(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {"id": 1, "name": "Tab Panadol (1 pack = 200 tablets)", "category": "Analgesic",
         "quantity": 5, "unit": "packs", "reorderLevel": 2},
        {"id": 2, "name": "Cough Syrup 100ml", "category": "Syrup",
         "quantity": 0, "unit": "bottles", "reorderLevel": 1}
    ]"#;

    fn loaded_session() -> Arc<PrescriptionSession> {
        let session = PrescriptionSession::new();
        assert_eq!(session.load_catalog_json(CATALOG_JSON.into()).unwrap(), 2);
        session
    }

    #[test]
    fn test_parse_and_convert() {
        let info = parse_pack_info("ORS (1 jar = 20 sachets)".into());
        assert_eq!(info.base_name, "ORS");
        assert!(info.has_pack_info);

        assert_eq!(convert_to_dispensing_units(info.clone(), 1.5).unwrap(), 30.0);
        assert_eq!(convert_to_storage_units(info, 10.0).unwrap(), 0.5);

        let plain = parse_pack_info("Gauze".into());
        assert!(matches!(
            convert_to_storage_units(plain, 1.0),
            Err(ClinicRxError::ConversionError(_))
        ));
    }

    #[test]
    fn test_format_quantities() {
        assert_eq!(format_unit_quantity(20.0), "20");
        assert_eq!(format_unit_quantity(2.5), "2.5");
        assert_eq!(format_pack_quantity(0.1), "0.10");
    }

    #[test]
    fn test_session_prescribe_and_submit() {
        let session = loaded_session();

        let line = session
            .add_medicine(1, 20.0, FfiPrescriptionMode::Units)
            .unwrap();
        assert_eq!(line.quantity_in_packs, 0.1);
        assert_eq!(line.dosage, "20 tablets");

        let err = session
            .add_medicine(1, 1.0, FfiPrescriptionMode::Packs)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "This medicine is already added. Remove it first to change quantity."
        );

        let csv = session.submission_csv().unwrap();
        assert_eq!(csv.lines().count(), 2);

        assert!(session.remove_line(0).unwrap().is_some());
        assert!(session.lines().unwrap().is_empty());
        assert!(matches!(
            session.submission_json(),
            Err(ClinicRxError::PrescriptionError(_))
        ));
    }

    #[test]
    fn test_session_errors() {
        let session = loaded_session();

        assert!(matches!(
            session.add_medicine(42, 1.0, FfiPrescriptionMode::Packs),
            Err(ClinicRxError::NotFound(_))
        ));
        assert!(matches!(
            session.add_medicine(1, 0.0, FfiPrescriptionMode::Packs),
            Err(ClinicRxError::InvalidInput(_))
        ));
        assert!(matches!(
            session.add_medicine(2, 1.0, FfiPrescriptionMode::Packs),
            Err(ClinicRxError::PrescriptionError(_))
        ));
        assert!(matches!(
            session.load_catalog_json("oops".into()),
            Err(ClinicRxError::SerializationError(_))
        ));
    }

    #[test]
    fn test_session_catalog_views() {
        let session = loaded_session();

        let options = session.option_labels().unwrap();
        assert_eq!(options[0].label, "Tab Panadol - Stock: 5 packs (200 tablets/pack)");
        assert!(options[1].out_of_stock);

        let hits = session.search_medicines("syrup".into()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);

        let rows = session.inventory_rows().unwrap();
        assert_eq!(rows[0].total_units_label.as_deref(), Some("1000 tablets total"));

        assert_eq!(session.inventory_csv().unwrap().lines().count(), 3);
    }

    #[test]
    fn test_session_with_config() {
        let session =
            PrescriptionSession::with_config_json(r#"{"display": {"pack_decimals": 3}}"#.into())
                .unwrap();
        session.load_catalog_json(CATALOG_JSON.into()).unwrap();

        let line = session
            .add_medicine(1, 25.0, FfiPrescriptionMode::Units)
            .unwrap();
        assert_eq!(line.deduction_label, "0.125 packs");

        assert!(matches!(
            PrescriptionSession::with_config_json(r#"{"stock_tolerance": -1}"#.into()),
            Err(ClinicRxError::InvalidInput(_))
        ));
    }
}

//! Draft-level prescribing operations.

use super::{PrescribeError, PrescribeResult, Prescriber};
use crate::config::RxConfig;
use crate::export::PrescriptionSubmission;
use crate::models::{Medicine, PrescriptionDraft, PrescriptionLine, PrescriptionMode};

impl PrescriptionDraft {
    /// Add a line using the default configuration.
    pub fn add_line(
        &mut self,
        medicine: &Medicine,
        quantity: f64,
        mode: PrescriptionMode,
    ) -> PrescribeResult<&PrescriptionLine> {
        let config = RxConfig::default();
        Prescriber::new(&config).add_line(self, medicine, quantity, mode)
    }

    /// Build the submission payload for the backend.
    pub fn submission(&self) -> PrescribeResult<PrescriptionSubmission> {
        if self.is_empty() {
            return Err(PrescribeError::EmptyPrescription);
        }
        Ok(PrescriptionSubmission::from_draft(self))
    }
}

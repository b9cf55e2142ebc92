//! Prescription submission payload.

use serde::{Deserialize, Serialize};

use super::escape_csv;
use crate::models::{MedicineId, PrescriptionDraft, PrescriptionLine};

/// A completed prescription, ready to send to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionSubmission {
    /// Draft ID for traceability
    pub draft_id: String,
    /// Submission timestamp
    pub submitted_at: String,
    /// Prescribed lines, in the order they were added
    pub lines: Vec<PrescriptionLine>,
    /// Line count
    pub total_lines: usize,
}

impl PrescriptionSubmission {
    /// Snapshot a draft.
    pub fn from_draft(draft: &PrescriptionDraft) -> Self {
        Self {
            draft_id: draft.draft_id.clone(),
            submitted_at: chrono::Utc::now().to_rfc3339(),
            lines: draft.lines.clone(),
            total_lines: draft.lines.len(),
        }
    }

    /// Stock to deduct per medicine, in storage units.
    pub fn deductions(&self) -> Vec<(MedicineId, f64)> {
        self.lines
            .iter()
            .map(|line| (line.medicine_id, line.quantity_in_packs))
            .collect()
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str(
            "draft_id,medicine_id,name,quantity_in_packs,storage_unit,quantity_in_units,dispensing_unit,dosage\n",
        );

        for line in &self.lines {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                escape_csv(&self.draft_id),
                line.medicine_id,
                escape_csv(&line.name),
                line.quantity_in_packs,
                escape_csv(&line.storage_unit),
                line.quantity_in_units
                    .map(|q| q.to_string())
                    .unwrap_or_default(),
                escape_csv(line.dispensing_unit.as_deref().unwrap_or("")),
                escape_csv(&line.dosage),
            ));
        }

        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Medicine, PrescriptionMode};

    fn make_draft() -> PrescriptionDraft {
        let mut draft = PrescriptionDraft::new();
        let panadol =
            Medicine::new(1, "Tab Panadol (1 pack = 200 tablets)").with_stock(5.0, "packs");
        let syrup = Medicine::new(2, "Cough Syrup 100ml").with_stock(3.0, "bottles");

        draft.add_line(&panadol, 20.0, PrescriptionMode::Units).unwrap();
        draft.add_line(&syrup, 2.0, PrescriptionMode::Packs).unwrap();
        draft
    }

    #[test]
    fn test_submission_from_draft() {
        let draft = make_draft();
        let submission = PrescriptionSubmission::from_draft(&draft);

        assert_eq!(submission.draft_id, draft.draft_id);
        assert_eq!(submission.total_lines, 2);
        assert_eq!(submission.deductions(), vec![(1, 0.1), (2, 2.0)]);
    }

    #[test]
    fn test_submission_csv() {
        let draft = make_draft();
        let csv = PrescriptionSubmission::from_draft(&draft).to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3); // Header + 2 lines
        assert!(lines[0].starts_with("draft_id,medicine_id"));
        assert_eq!(
            lines[1],
            format!(
                "{},1,Tab Panadol (1 pack = 200 tablets),0.1,packs,20,tablets,20 tablets",
                draft.draft_id
            )
        );
        assert_eq!(
            lines[2],
            format!("{},2,Cough Syrup 100ml,2,bottles,,,2 bottles", draft.draft_id)
        );
    }

    #[test]
    fn test_submission_json() {
        let json = PrescriptionSubmission::from_draft(&make_draft())
            .to_json()
            .unwrap();

        assert!(json.contains("\"quantity_in_packs\": 0.1"));
        assert!(json.contains("\"mode\": \"units\""));
        assert!(json.contains("\"dispensing_unit\": null"));
    }
}

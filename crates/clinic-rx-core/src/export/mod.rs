//! Export of inventory snapshots and submitted prescriptions.

mod inventory;
mod prescription;

pub use inventory::*;
pub use prescription::*;

/// Quote a CSV field when it contains a delimiter, quote, or newline.
pub(crate) fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

//! Pack/unit handling for medicine quantities.
//!
//! Handles:
//! - Parsing "(1 pack = N unit)" suffixes out of medicine names
//! - Converting quantities between storage packs and dispensing units
//! - Display precision for both denominations

mod converter;
mod format;
mod parser;

pub use converter::*;
pub use format::*;
pub use parser::*;

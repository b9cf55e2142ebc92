//! Domain models for the clinic-rx system.

mod medicine;
mod pack;
mod prescription;

pub use medicine::*;
pub use pack::*;
pub use prescription::*;

//! Input/output helpers.
//!
//! - aligned comparison export (CSV) (`export`)

pub mod export;

pub use export::*;

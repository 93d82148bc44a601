//! Plate normalization, classification and result assembly.
//!
//! - [`normalizer`] — cleans raw (often OCR-derived) input into the compact
//!   and hyphenated forms.
//! - [`classifier`] — priority-ordered grammar matcher producing a
//!   [`PlateClassification`](crate::models::PlateClassification).
//! - [`tables`] — institution codes, military suffix mapping and
//!   vehicle-type ranges, built once and shared read-only.
//! - [`enricher`] — assembles the final result, calling the region lookup
//!   for standard plates only.

pub mod classifier;
pub mod enricher;
pub mod normalizer;
pub mod tables;

//! Parameter sweep expansion and simulator deck generation.
//!
//! The pipeline reads the shared terrain rasters and run-control metadata,
//! zips the rheology parameter sequences into one record per run, and writes
//! a case file per record plus a sequential driver script.

#![deny(missing_docs)]

mod case;
mod driver;
mod generate;
mod label;
mod manifest;
mod metadata;
mod plan;
mod sweep;

pub use case::{render_case_file, render_line, write_case, write_case_file, FLOAT_SIGNIFICANT_DIGITS};
pub use driver::{render_driver_script, write_driver_script};
pub use generate::{base_parameters, generate, preview, GenerationReport};
pub use label::{derive_label, format_segment};
pub use manifest::{GenerationManifest, ManifestRun, MANIFEST_FILE};
pub use metadata::{merge_parameters, parse_run_control, read_run_control};
pub use plan::SweepPlan;
pub use sweep::{cross_product, expand, run_count, GridParameter, SweepRecord};

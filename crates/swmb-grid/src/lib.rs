//! Raster terrain input for swmb: ASCII grid parsing and flat field dumps.

#![deny(missing_docs)]

mod dump;
mod header;
mod raster;

pub use dump::{write_column_major, DUMP_DECIMALS};
pub use header::{Origin, RasterHeader};
pub use raster::{read_ascii, RasterGrid, RasterSummary};

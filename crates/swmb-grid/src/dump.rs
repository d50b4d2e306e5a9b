use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use swmb_core::numfmt::format_scientific;
use swmb_core::SwmbError;
use tracing::debug;

use crate::raster::RasterGrid;

/// Fractional digits of every dumped value.
pub const DUMP_DECIMALS: usize = 18;

/// Writes the grid as one value per line, x varying fastest.
pub fn write_column_major(path: &Path, grid: &RasterGrid) -> Result<(), SwmbError> {
    let io_err = |err| SwmbError::io("swmb_grid.dump_write", path, err);
    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    let mut count = 0usize;
    for value in grid.column_major() {
        writeln!(out, "{}", format_scientific(value, DUMP_DECIMALS)).map_err(io_err)?;
        count += 1;
    }
    out.flush().map_err(io_err)?;
    debug!(path = %path.display(), values = count, "field dumped");
    Ok(())
}

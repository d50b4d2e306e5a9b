use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use swmb_core::{ErrorInfo, SwmbError};
use tracing::debug;

use crate::header::{parse_header_line, RasterHeader, MAX_HEADER_LINES};

/// Uniform raster field indexed by `(ix, iy)`.
///
/// Index 0 on either axis is the minimum coordinate; the grid is immutable
/// once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    x: Vec<f64>,
    y: Vec<f64>,
    // values[ix * ny + iy]
    values: Vec<f64>,
    cell_size: f64,
    header: RasterHeader,
}

/// Compact description of a raster used by inspection tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterSummary {
    /// Column count.
    pub nx: usize,
    /// Row count.
    pub ny: usize,
    /// First and last x coordinate.
    pub x_range: [f64; 2],
    /// First and last y coordinate.
    pub y_range: [f64; 2],
    /// Grid spacing.
    pub cell_size: f64,
    /// Header pair the origin came from.
    pub origin: crate::header::Origin,
    /// Smallest stored value, `nodata` included.
    pub min_value: f64,
    /// Largest stored value.
    pub max_value: f64,
}

/// Reads an ASCII raster file.
pub fn read_ascii(path: &Path) -> Result<RasterGrid, SwmbError> {
    let text = fs::read_to_string(path)
        .map_err(|err| SwmbError::io("swmb_grid.raster_read", path, err))?;
    let grid =
        RasterGrid::parse(&text).map_err(|err| err.with_context("path", path.display().to_string()))?;
    debug!(
        path = %path.display(),
        nx = grid.x.len(),
        ny = grid.y.len(),
        cell_size = grid.cell_size,
        "raster loaded"
    );
    Ok(grid)
}

impl RasterGrid {
    /// Parses raster text: a `key value` header followed by `nrows` rows of
    /// `ncols` values, top row first.
    pub fn parse(text: &str) -> Result<Self, SwmbError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
            .filter(|(_, line)| !line.trim().is_empty())
            .peekable();

        let mut entries = BTreeMap::new();
        while entries.len() < MAX_HEADER_LINES {
            let Some((line_no, line)) = lines.peek().copied() else {
                break;
            };
            if starts_with_number(line) {
                break;
            }
            let (key, value) = parse_header_line(line, line_no)?;
            entries.insert(key, value);
            lines.next();
        }
        let header = RasterHeader::from_entries(&entries)?;

        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(header.nrows);
        for (line_no, line) in lines {
            let row = parse_row(line, line_no)?;
            if row.len() != header.ncols {
                return Err(SwmbError::ShapeMismatch(
                    ErrorInfo::new("swmb_grid.row_width", "row width differs from ncols")
                        .with_context("line", line_no.to_string())
                        .with_context("expected", header.ncols.to_string())
                        .with_context("found", row.len().to_string()),
                ));
            }
            rows.push(row);
        }
        if rows.len() != header.nrows {
            return Err(SwmbError::ShapeMismatch(
                ErrorInfo::new("swmb_grid.row_count", "row count differs from nrows")
                    .with_context("expected", header.nrows.to_string())
                    .with_context("found", rows.len().to_string()),
            ));
        }

        Ok(Self::from_rows(header, &rows))
    }

    // Rows arrive top-first; flipping puts the first stored row at max y.
    fn from_rows(header: RasterHeader, rows: &[Vec<f64>]) -> Self {
        let (nx, ny) = (header.ncols, header.nrows);
        let mut values = vec![0.0; nx * ny];
        for (row_idx, row) in rows.iter().enumerate() {
            let iy = ny - 1 - row_idx;
            for (ix, value) in row.iter().enumerate() {
                values[ix * ny + iy] = *value;
            }
        }
        let x = (0..nx)
            .map(|i| header.x0 + i as f64 * header.cell_size)
            .collect();
        let y = (0..ny)
            .map(|j| header.y0 + j as f64 * header.cell_size)
            .collect();
        Self {
            x,
            y,
            values,
            cell_size: header.cell_size,
            header,
        }
    }

    /// Ascending x coordinates, one per column.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Ascending y coordinates, one per row.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Uniform grid spacing.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Header the grid was built from.
    pub fn header(&self) -> &RasterHeader {
        &self.header
    }

    /// `(len(x), len(y))`.
    pub fn shape(&self) -> (usize, usize) {
        (self.x.len(), self.y.len())
    }

    /// Value at `(ix, iy)`, or `None` outside the grid.
    pub fn value(&self, ix: usize, iy: usize) -> Option<f64> {
        let (nx, ny) = self.shape();
        (ix < nx && iy < ny).then(|| self.values[ix * ny + iy])
    }

    /// Values with x varying fastest, row by row from minimum y.
    pub fn column_major(&self) -> impl Iterator<Item = f64> + '_ {
        let (nx, ny) = self.shape();
        (0..ny).flat_map(move |iy| (0..nx).map(move |ix| self.values[ix * ny + iy]))
    }

    /// Extent and value range for inspection output.
    pub fn summary(&self) -> RasterSummary {
        let (min_value, max_value) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        let (nx, ny) = self.shape();
        RasterSummary {
            nx,
            ny,
            x_range: [self.x[0], self.x[nx - 1]],
            y_range: [self.y[0], self.y[ny - 1]],
            cell_size: self.cell_size,
            origin: self.header.origin,
            min_value,
            max_value,
        }
    }
}

fn starts_with_number(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|token| token.parse::<f64>().is_ok())
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<f64>, SwmbError> {
    line.split_whitespace()
        .enumerate()
        .map(|(col, token)| {
            token.parse::<f64>().map_err(|err| {
                SwmbError::Parse(
                    ErrorInfo::new("swmb_grid.value", err.to_string())
                        .with_context("line", line_no.to_string())
                        .with_context("column", (col + 1).to_string())
                        .with_context("token", token),
                )
            })
        })
        .collect()
}

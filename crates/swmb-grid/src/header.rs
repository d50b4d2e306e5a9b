use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use swmb_core::{ErrorInfo, SwmbError};

/// Maximum number of `key value` lines preceding the raster body.
pub(crate) const MAX_HEADER_LINES: usize = 6;

/// Which header pair defined the grid origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// `xllcenter` / `yllcenter`.
    Center,
    /// `xllcorner` / `yllcorner`.
    Corner,
}

/// Resolved raster header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterHeader {
    /// Number of columns, the length of the x axis.
    pub ncols: usize,
    /// Number of rows, the length of the y axis.
    pub nrows: usize,
    /// x coordinate of the first column.
    pub x0: f64,
    /// y coordinate of the bottom row.
    pub y0: f64,
    /// Grid spacing shared by both axes.
    pub cell_size: f64,
    /// Header pair the origin was taken from.
    pub origin: Origin,
    /// Parsed but not applied to the values.
    pub nodata: Option<f64>,
}

impl RasterHeader {
    /// Resolves a header from lower-cased `key -> value` entries.
    ///
    /// The `center` origin pair takes precedence over the `corner` pair.
    pub fn from_entries(entries: &BTreeMap<String, f64>) -> Result<Self, SwmbError> {
        let (x0, y0, origin) = match (
            entries.get("xllcenter"),
            entries.get("yllcenter"),
            entries.get("xllcorner"),
            entries.get("yllcorner"),
        ) {
            (Some(x), Some(y), _, _) => (*x, *y, Origin::Center),
            (_, _, Some(x), Some(y)) => (*x, *y, Origin::Corner),
            _ => {
                return Err(missing_key(
                    "xllcenter/yllcenter",
                    "expected xllcenter/yllcenter or xllcorner/yllcorner",
                ))
            }
        };
        let ncols = dimension(entries, "ncols")?;
        let nrows = dimension(entries, "nrows")?;
        let cell_size = *entries
            .get("cellsize")
            .ok_or_else(|| missing_key("cellsize", "the grid spacing is required"))?;
        Ok(Self {
            ncols,
            nrows,
            x0,
            y0,
            cell_size,
            origin,
            nodata: entries.get("nodata_value").copied(),
        })
    }
}

/// Parses one header line into a lower-cased key and its value.
pub(crate) fn parse_header_line(line: &str, line_no: usize) -> Result<(String, f64), SwmbError> {
    let mut tokens = line.split_whitespace();
    let (Some(key), Some(raw)) = (tokens.next(), tokens.next()) else {
        return Err(SwmbError::Parse(
            ErrorInfo::new("swmb_grid.header_line", "header line is not a key value pair")
                .with_context("line", line_no.to_string()),
        ));
    };
    let value = raw.parse::<f64>().map_err(|err| {
        SwmbError::Parse(
            ErrorInfo::new("swmb_grid.header_value", err.to_string())
                .with_context("line", line_no.to_string())
                .with_context("key", key)
                .with_context("token", raw),
        )
    })?;
    Ok((key.to_ascii_lowercase(), value))
}

fn dimension(entries: &BTreeMap<String, f64>, key: &str) -> Result<usize, SwmbError> {
    let value = *entries
        .get(key)
        .ok_or_else(|| missing_key(key, "grid dimensions are required"))?;
    if value < 1.0 || value.fract() != 0.0 || !value.is_finite() {
        return Err(SwmbError::Parse(
            ErrorInfo::new("swmb_grid.dimension", "grid dimension must be a positive integer")
                .with_context("key", key)
                .with_context("value", value.to_string()),
        ));
    }
    Ok(value as usize)
}

fn missing_key(key: &str, hint: &str) -> SwmbError {
    SwmbError::MissingHeaderKey(
        ErrorInfo::new("swmb_grid.missing_header_key", format!("raster header lacks '{key}'"))
            .with_context("key", key)
            .with_hint(hint),
    )
}

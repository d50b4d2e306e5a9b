use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use swmb_core::numfmt::format_general;
use swmb_core::{ParamValue, SwmbError};
use tracing::{debug, warn};

use crate::sweep::SweepRecord;

/// Significant digits of floating point case values.
pub const FLOAT_SIGNIFICANT_DIGITS: usize = 8;

/// Renders one `name value` case line.
///
/// Returns `None` for unsupported values, which the simulator cannot read.
pub fn render_line(name: &str, value: &ParamValue) -> Option<String> {
    match value {
        ParamValue::Int(value) => Some(format!("{name} {value}")),
        ParamValue::Float(value) => Some(format!(
            "{name} {}",
            format_general(*value, FLOAT_SIGNIFICANT_DIGITS)
        )),
        ParamValue::Text(value) => Some(format!("{name} {value}")),
        ParamValue::Unsupported(_) => None,
    }
}

/// Renders a full case file, one line per parameter in map order.
///
/// Unsupported values are skipped with a warning.
pub fn render_case_file(params: &IndexMap<String, ParamValue>) -> String {
    let mut text = String::new();
    for (name, value) in params {
        match render_line(name, value) {
            Some(line) => {
                text.push_str(&line);
                text.push('\n');
            }
            None => warn!(
                parameter = %name,
                kind = value.kind(),
                "unsupported parameter value skipped"
            ),
        }
    }
    text
}

/// Writes a case file to `path`.
pub fn write_case_file(path: &Path, params: &IndexMap<String, ParamValue>) -> Result<(), SwmbError> {
    fs::write(path, render_case_file(params))
        .map_err(|err| SwmbError::io("swmb_exp.case_write", path, err))
}

/// Creates the run directory `<law_dir>/<label>/` and writes
/// `<law_dir>/<label>.txt`; returns the case file path.
pub fn write_case(law_dir: &Path, record: &SweepRecord) -> Result<PathBuf, SwmbError> {
    let run_dir = law_dir.join(&record.label);
    fs::create_dir_all(&run_dir)
        .map_err(|err| SwmbError::io("swmb_exp.run_dir", &run_dir, err))?;
    let case_path = law_dir.join(record.case_file_name());
    write_case_file(&case_path, &record.case_parameters())?;
    debug!(path = %case_path.display(), "case file written");
    Ok(case_path)
}

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;
use swmb_core::{ErrorInfo, MetadataKeys, ParamEntry, ParamValue, ParameterSet, SwmbError};
use tracing::debug;

/// Reads run-control parameters from the metadata sidecar.
///
/// Only keys present in `keys` are kept, renamed to their simulator names,
/// with values carried verbatim as text.
pub fn read_run_control(
    path: &Path,
    keys: &MetadataKeys,
) -> Result<IndexMap<String, ParamValue>, SwmbError> {
    let text = fs::read_to_string(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            SwmbError::MissingMetadataFile(
                ErrorInfo::new("swmb_exp.missing_metadata", "metadata sidecar not found")
                    .with_path(path),
            )
        } else {
            SwmbError::io("swmb_exp.metadata_read", path, err)
        }
    })?;
    parse_run_control(&text, keys).map_err(|err| err.with_context("path", path.display().to_string()))
}

/// Parses sidecar text; see [`read_run_control`].
pub fn parse_run_control(
    text: &str,
    keys: &MetadataKeys,
) -> Result<IndexMap<String, ParamValue>, SwmbError> {
    let mut params = IndexMap::new();
    for (idx, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(key) = tokens.first() else {
            continue;
        };
        let Some(name) = keys.translate(key) else {
            debug!(key = %key, "metadata key ignored");
            continue;
        };
        let [_, value] = tokens.as_slice() else {
            return Err(SwmbError::MalformedMetadataLine(
                ErrorInfo::new(
                    "swmb_exp.malformed_metadata",
                    "metadata line must hold exactly one key and one value",
                )
                .with_context("line", (idx + 1).to_string())
                .with_context("key", *key)
                .with_context("tokens", tokens.len().to_string()),
            ));
        };
        params.insert(name.to_string(), ParamValue::Text(value.to_string()));
    }
    Ok(params)
}

/// Builds the full parameter set: `base` scalars first, then the rheology
/// entries in declaration order.
///
/// A rheology entry sharing a name with a base scalar replaces it in place.
pub fn merge_parameters(
    base: impl IntoIterator<Item = (String, ParamValue)>,
    rheology: &ParameterSet,
) -> ParameterSet {
    let mut merged = ParameterSet::new();
    for (name, value) in base {
        merged.insert(name, ParamEntry::Scalar(value));
    }
    for (name, entry) in rheology.iter() {
        merged.insert(name, entry.clone());
    }
    merged
}

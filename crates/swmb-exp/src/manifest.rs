use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use swmb_core::{from_json_slice, to_canonical_json_bytes, ParamValue, ResolvedLaw, SwmbError};

use crate::sweep::SweepRecord;

/// File name of the manifest inside the law directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Record of what a generation run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationManifest {
    /// Fingerprint of the plan as written.
    pub plan_hash: String,
    /// RFC 3339 generation time.
    pub created_at: String,
    /// Resolved law name and code.
    pub law: ResolvedLaw,
    /// Simulator binary named in the driver script.
    pub simulator: String,
    /// Driver script file name inside the law directory.
    pub script: String,
    /// One entry per run, in driver order.
    pub runs: Vec<ManifestRun>,
}

/// Manifest entry for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRun {
    /// Expansion index.
    pub index: usize,
    /// Run label.
    pub label: String,
    /// `<law>/<label>`, relative to the output root.
    pub output_path: String,
    /// Case file name inside the law directory.
    pub case_file: String,
    /// Case file parameters, `folder_output` included.
    pub params: IndexMap<String, ParamValue>,
}

impl ManifestRun {
    /// Captures what was written for `record`.
    pub fn from_record(record: &SweepRecord) -> Self {
        Self {
            index: record.index,
            label: record.label.clone(),
            output_path: record.output_path.to_string_lossy().into_owned(),
            case_file: record.case_file_name(),
            params: record.case_parameters(),
        }
    }
}

impl GenerationManifest {
    /// Writes canonical JSON to `path`.
    pub fn write(&self, path: &Path) -> Result<(), SwmbError> {
        let bytes = to_canonical_json_bytes(self)?;
        fs::write(path, bytes).map_err(|err| SwmbError::io("swmb_exp.manifest_write", path, err))
    }

    /// Reads a manifest written by [`GenerationManifest::write`].
    pub fn load(path: &Path) -> Result<Self, SwmbError> {
        let bytes =
            fs::read(path).map_err(|err| SwmbError::io("swmb_exp.manifest_read", path, err))?;
        from_json_slice(&bytes)
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use swmb_core::{stable_hash_string, ErrorInfo, GeneratorConfig, ParameterSet, SwmbError};

use crate::sweep::{cross_product, GridParameter};

/// YAML description of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Rheology law name, resolved through `config.laws`.
    pub law: String,
    /// Directory holding the rasters and the metadata sidecar.
    #[serde(default = "SweepPlan::default_dir")]
    pub data_dir: PathBuf,
    /// Root of the generated layout.
    #[serde(default = "SweepPlan::default_dir")]
    pub output_dir: PathBuf,
    /// Zipped rheology parameters.
    #[serde(default)]
    pub rheology: ParameterSet,
    /// Cross-product axes pre-expanded before zipping.
    #[serde(default)]
    pub grid: Vec<GridParameter>,
    /// Generator tables overriding the stock configuration.
    #[serde(default)]
    pub config: GeneratorConfig,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl SweepPlan {
    fn default_dir() -> PathBuf {
        PathBuf::from(".")
    }

    /// Parses a plan from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, SwmbError> {
        serde_yaml::from_str(text)
            .map_err(|err| SwmbError::Serde(ErrorInfo::new("swmb_exp.plan_yaml", err.to_string())))
    }

    /// Loads a plan file; relative directories resolve against the plan's
    /// own directory.
    pub fn load(path: &Path) -> Result<Self, SwmbError> {
        let text = fs::read_to_string(path)
            .map_err(|err| SwmbError::io("swmb_exp.plan_read", path, err))?;
        let mut plan =
            Self::from_yaml_str(&text).map_err(|err| err.with_context("path", path.display().to_string()))?;
        if let Some(base) = path.parent() {
            plan.data_dir = base.join(&plan.data_dir);
            plan.output_dir = base.join(&plan.output_dir);
            plan.base_dir = Some(base.to_path_buf());
        }
        Ok(plan)
    }

    /// Stable hash of the plan as written in its file.
    ///
    /// Directories resolved by [`SweepPlan::load`] are hashed relative to the
    /// plan file, so moving a project does not change its fingerprint.
    pub fn fingerprint(&self) -> Result<String, SwmbError> {
        let mut written = self.clone();
        if let Some(base) = &self.base_dir {
            for dir in [&mut written.data_dir, &mut written.output_dir] {
                if let Ok(relative) = dir.strip_prefix(base) {
                    *dir = relative.to_path_buf();
                }
            }
        }
        stable_hash_string(&written)
    }

    /// Rheology parameters with grid axes folded in.
    pub fn parameter_set(&self) -> Result<ParameterSet, SwmbError> {
        cross_product(&self.rheology, &self.grid)
    }
}

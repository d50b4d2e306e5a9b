//! Generator configuration tables.
//!
//! Each table has a `Default` matching the stock simulator setup; plans
//! override individual tables through YAML.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::law::LawTable;

/// Complete configuration handed to the generation pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Sidecar metadata key translation.
    #[serde(default)]
    pub metadata_keys: MetadataKeys,
    /// Law name to simulator code table.
    #[serde(default)]
    pub laws: LawTable,
    /// Rules deriving run labels from sequence-valued parameters.
    #[serde(default)]
    pub label: LabelScheme,
    /// Simulator binary and file naming.
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// Maps sidecar metadata keys to simulator parameter names.
///
/// Keys absent from the table are ignored when reading the sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataKeys {
    keys: IndexMap<String, String>,
}

impl Default for MetadataKeys {
    fn default() -> Self {
        let keys = [
            ("tmax", "tmax"),
            ("CFL", "cflhyp"),
            ("h_min", "eps0"),
            ("dt_im_output", "dt_im"),
        ]
        .into_iter()
        .map(|(key, name)| (key.to_string(), name.to_string()))
        .collect();
        Self { keys }
    }
}

impl MetadataKeys {
    /// Builds a table from explicit `(metadata key, simulator name)` pairs.
    pub fn from_pairs<K: Into<String>, N: Into<String>>(
        pairs: impl IntoIterator<Item = (K, N)>,
    ) -> Self {
        Self {
            keys: pairs
                .into_iter()
                .map(|(key, name)| (key.into(), name.into()))
                .collect(),
        }
    }

    /// Simulator parameter name for a metadata key, if the key is retained.
    pub fn translate(&self, key: &str) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }
}

/// How a parameter name is matched by a [`LabelRule`].
///
/// Written in configuration as a single-key map, `{ prefix: delta }` or
/// `{ exact: ksi }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NameMatchSpec", into = "NameMatchSpec")]
pub enum NameMatch {
    /// Matches every name starting with the prefix.
    Prefix(String),
    /// Matches the name exactly.
    Exact(String),
}

impl NameMatch {
    /// Returns whether `name` falls in this category.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatch::Prefix(prefix) => name.starts_with(prefix.as_str()),
            NameMatch::Exact(exact) => name == exact,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NameMatchSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exact: Option<String>,
}

impl TryFrom<NameMatchSpec> for NameMatch {
    type Error = String;

    fn try_from(spec: NameMatchSpec) -> Result<Self, Self::Error> {
        match (spec.prefix, spec.exact) {
            (Some(prefix), None) => Ok(NameMatch::Prefix(prefix)),
            (None, Some(exact)) => Ok(NameMatch::Exact(exact)),
            (Some(_), Some(_)) => Err("label match takes either `prefix` or `exact`, not both".into()),
            (None, None) => Err("label match needs a `prefix` or `exact` key".into()),
        }
    }
}

impl From<NameMatch> for NameMatchSpec {
    fn from(matcher: NameMatch) -> Self {
        match matcher {
            NameMatch::Prefix(prefix) => Self {
                prefix: Some(prefix),
                exact: None,
            },
            NameMatch::Exact(exact) => Self {
                prefix: None,
                exact: Some(exact),
            },
        }
    }
}

/// Fixed-width numeric rendering for one category of parameter names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRule {
    /// Names this rule applies to.
    #[serde(rename = "match")]
    pub matcher: NameMatch,
    /// Minimum field width, zero padded.
    pub width: usize,
    /// Digits after the decimal point.
    pub decimals: usize,
}

impl LabelRule {
    /// Creates a rule rendering matching values as `width`-wide, `decimals`-digit numbers.
    pub fn new(matcher: NameMatch, width: usize, decimals: usize) -> Self {
        Self {
            matcher,
            width,
            decimals,
        }
    }
}

/// Ordered label rules; the first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelScheme {
    /// Rules in priority order.
    #[serde(default = "LabelScheme::default_rules")]
    pub rules: Vec<LabelRule>,
    /// Replacement for the decimal point so labels are path safe.
    #[serde(default = "LabelScheme::default_decimal_mark")]
    pub decimal_mark: char,
    /// Separator between segments and between name and value.
    #[serde(default = "LabelScheme::default_separator")]
    pub separator: char,
}

impl LabelScheme {
    fn default_rules() -> Vec<LabelRule> {
        vec![
            LabelRule::new(NameMatch::Prefix("delta".to_string()), 5, 2),
            LabelRule::new(NameMatch::Exact("ksi".to_string()), 6, 1),
        ]
    }

    const fn default_decimal_mark() -> char {
        'p'
    }

    const fn default_separator() -> char {
        '_'
    }

    /// First rule matching `name`.
    pub fn rule_for(&self, name: &str) -> Option<&LabelRule> {
        self.rules.iter().find(|rule| rule.matcher.matches(name))
    }
}

impl Default for LabelScheme {
    fn default() -> Self {
        Self {
            rules: Self::default_rules(),
            decimal_mark: Self::default_decimal_mark(),
            separator: Self::default_separator(),
        }
    }
}

/// Simulator binary and the file names read or written around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Executable invoked by the driver script.
    pub binary: String,
    /// Arguments placed before the case file on every invocation.
    pub leading_args: Vec<String>,
    /// Topography raster inside the data directory.
    pub topography_file: String,
    /// Initial mass raster inside the data directory.
    pub mass_file: String,
    /// Metadata sidecar inside the data directory.
    pub metadata_file: String,
    /// Flattened topography written at the output root.
    pub topography_dump: String,
    /// Flattened initial mass written at the output root.
    pub mass_dump: String,
    /// Log appended to by the driver script at run time.
    pub duration_log: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            binary: "shaltop".to_string(),
            leading_args: vec![String::new()],
            topography_file: "topo.asc".to_string(),
            mass_file: "mass.asc".to_string(),
            metadata_file: "README.txt".to_string(),
            topography_dump: "z.d".to_string(),
            mass_dump: "m.d".to_string(),
            duration_log: "simulation_duration.txt".to_string(),
        }
    }
}

impl SimulatorConfig {
    /// Name of the driver script, `run_<binary>.sh`.
    pub fn script_name(&self) -> String {
        format!("run_{}.sh", self.binary)
    }
}

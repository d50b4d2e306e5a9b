use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use swmb_core::{ErrorInfo, LabelScheme, ParamEntry, ParamValue, ParameterSet, SwmbError};
use tracing::{debug, info, warn};

use crate::label::derive_label;

/// Name of the case parameter carrying the run label.
pub(crate) const FOLDER_OUTPUT: &str = "folder_output";

/// One resolved run of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    /// Position in expansion order, also the driver script order.
    pub index: usize,
    /// Every parameter resolved to a single value, in declaration order.
    pub values: IndexMap<String, ParamValue>,
    /// Filesystem-safe run identifier.
    pub label: String,
    /// `<law>/<label>`, relative to the output root.
    pub output_path: PathBuf,
}

impl SweepRecord {
    /// Parameters written to the case file: the record values followed by
    /// the output folder name.
    pub fn case_parameters(&self) -> IndexMap<String, ParamValue> {
        let mut params = self.values.clone();
        params.insert(FOLDER_OUTPUT.to_string(), ParamValue::Text(self.label.clone()));
        params
    }

    /// Case file name, `<label>.txt`.
    pub fn case_file_name(&self) -> String {
        format!("{}.txt", self.label)
    }
}

/// Cross-product axis declared in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridParameter {
    /// Parameter name; must not repeat a rheology entry.
    pub name: String,
    /// Axis values, in order.
    pub values: Vec<ParamValue>,
}

/// Number of runs in a sweep: the shared length of all sequence entries.
pub fn run_count(params: &ParameterSet) -> Result<usize, SwmbError> {
    let mut lengths = params
        .iter()
        .filter_map(|(name, entry)| entry.sequence_len().map(|len| (name, len)));
    let Some((first_name, runs)) = lengths.next() else {
        return Err(SwmbError::EmptySweep(
            ErrorInfo::new("swmb_exp.no_sequences", "sweep has no sequence-valued parameter")
                .with_hint("give at least one rheology parameter a list of values"),
        ));
    };
    for (name, len) in lengths {
        if len != runs {
            return Err(SwmbError::MismatchedSweepLengths(
                ErrorInfo::new(
                    "swmb_exp.mismatched_sweep_lengths",
                    "sequence-valued parameters must have equal lengths",
                )
                .with_context("reference", format!("{first_name}={runs}"))
                .with_context("parameter", format!("{name}={len}"))
                .with_hint("sequences are zipped by index; use `grid` for a cross product"),
            ));
        }
    }
    if runs == 0 {
        return Err(SwmbError::EmptySweep(
            ErrorInfo::new("swmb_exp.empty_sequences", "sequence-valued parameters are empty")
                .with_context("parameter", first_name),
        ));
    }
    Ok(runs)
}

/// Zips sequence-valued parameters into one record per index.
///
/// Scalars are repeated in every record. Labels are not checked for
/// uniqueness beyond a warning: values differing only past the displayed
/// precision share a label.
pub fn expand(
    params: &ParameterSet,
    scheme: &LabelScheme,
    law_dir: &str,
) -> Result<Vec<SweepRecord>, SwmbError> {
    let runs = run_count(params)?;
    let sequence_names: Vec<&str> = params.sequence_names().collect();
    for name in &sequence_names {
        if scheme.rule_for(name).is_none() {
            warn!(parameter = %name, "sequence parameter has no label rule");
        }
    }

    let mut records = Vec::with_capacity(runs);
    let mut seen = BTreeSet::new();
    for index in 0..runs {
        let values: IndexMap<String, ParamValue> = params
            .iter()
            .map(|(name, entry)| {
                let value = match entry {
                    ParamEntry::Scalar(value) => value.clone(),
                    ParamEntry::Sequence(values) => values[index].clone(),
                };
                (name.to_string(), value)
            })
            .collect();
        let label = derive_label(&sequence_names, &values, scheme)?;
        if !seen.insert(label.clone()) {
            warn!(label = %label, index, "duplicate run label");
        }
        debug!(index, label = %label, "run expanded");
        records.push(SweepRecord {
            index,
            output_path: Path::new(law_dir).join(&label),
            label,
            values,
        });
    }
    info!(runs, law = law_dir, "sweep expanded");
    Ok(records)
}

/// Pre-expands `grid` axes into a zipped parameter set.
///
/// The existing sequences of `zipped` form one axis varying slowest, then
/// each grid parameter in order, the last varying fastest.
pub fn cross_product(
    zipped: &ParameterSet,
    grid: &[GridParameter],
) -> Result<ParameterSet, SwmbError> {
    if grid.is_empty() {
        return Ok(zipped.clone());
    }
    for param in grid {
        if zipped.contains(&param.name) {
            return Err(SwmbError::InvalidPlan(
                ErrorInfo::new("swmb_exp.grid_duplicate", "grid parameter also declared in rheology")
                    .with_context("parameter", &param.name),
            ));
        }
        if param.values.is_empty() {
            return Err(SwmbError::EmptySweep(
                ErrorInfo::new("swmb_exp.grid_empty", "grid parameter has no values")
                    .with_context("parameter", &param.name),
            ));
        }
    }

    let zipped_runs = if zipped.sequence_names().next().is_some() {
        run_count(zipped)?
    } else {
        1
    };
    let mut axes = vec![zipped_runs];
    axes.extend(grid.iter().map(|param| param.values.len()));
    let mut combos = Vec::new();
    expand_indices(&axes, 0, Vec::with_capacity(axes.len()), &mut combos);

    let mut expanded = ParameterSet::new();
    for (name, entry) in zipped.iter() {
        let entry = match entry {
            ParamEntry::Scalar(value) => ParamEntry::Scalar(value.clone()),
            ParamEntry::Sequence(values) => {
                ParamEntry::Sequence(combos.iter().map(|combo| values[combo[0]].clone()).collect())
            }
        };
        expanded.insert(name, entry);
    }
    for (axis, param) in grid.iter().enumerate() {
        let values = combos
            .iter()
            .map(|combo| param.values[combo[axis + 1]].clone())
            .collect();
        expanded.insert(param.name.clone(), ParamEntry::Sequence(values));
    }
    Ok(expanded)
}

fn expand_indices(axes: &[usize], idx: usize, current: Vec<usize>, outputs: &mut Vec<Vec<usize>>) {
    if idx == axes.len() {
        outputs.push(current);
        return;
    }
    for value in 0..axes[idx] {
        let mut next = current.clone();
        next.push(value);
        expand_indices(axes, idx + 1, next, outputs);
    }
}

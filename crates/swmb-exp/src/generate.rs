use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use swmb_core::{ErrorInfo, ParamValue, ResolvedLaw, SimulatorConfig, SwmbError};
use swmb_grid::{read_ascii, write_column_major, RasterGrid};
use tracing::info;

use crate::case::write_case;
use crate::driver::write_driver_script;
use crate::manifest::{GenerationManifest, ManifestRun, MANIFEST_FILE};
use crate::metadata::{merge_parameters, read_run_control};
use crate::plan::SweepPlan;
use crate::sweep::{expand, SweepRecord};

/// Paths and records produced by [`generate`].
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Law the decks were generated for.
    pub law: ResolvedLaw,
    /// `<output_dir>/<law>`.
    pub law_dir: PathBuf,
    /// Expanded runs in driver order.
    pub records: Vec<SweepRecord>,
    /// Driver script path.
    pub script: PathBuf,
    /// Manifest path.
    pub manifest: PathBuf,
}

/// Grid-derived parameters shared by every case file.
pub fn base_parameters(
    grid: &RasterGrid,
    simulator: &SimulatorConfig,
    law: &ResolvedLaw,
) -> Vec<(String, ParamValue)> {
    let (nx, ny) = grid.shape();
    vec![
        ("nx".to_string(), ParamValue::Int(nx as i64)),
        ("ny".to_string(), ParamValue::Int(ny as i64)),
        ("per".to_string(), ParamValue::Float(grid.cell_size() * nx as f64)),
        ("pery".to_string(), ParamValue::Float(grid.cell_size() * ny as f64)),
        (
            "file_m_init".to_string(),
            ParamValue::Text(format!("../{}", simulator.mass_dump)),
        ),
        (
            "file_z_init".to_string(),
            ParamValue::Text(format!("../{}", simulator.topography_dump)),
        ),
        ("icomp".to_string(), ParamValue::Int(law.code)),
    ]
}

/// Expands the plan's sweep without reading inputs or writing files.
pub fn preview(plan: &SweepPlan) -> Result<Vec<SweepRecord>, SwmbError> {
    let law = plan.config.laws.resolve(&plan.law)?;
    expand(&plan.parameter_set()?, &plan.config.label, &law.name)
}

/// Runs the whole generation step.
///
/// All inputs are read and the sweep is expanded before anything is written;
/// a failure while writing leaves earlier files on disk.
pub fn generate(plan: &SweepPlan) -> Result<GenerationReport, SwmbError> {
    let config = &plan.config;
    let simulator = &config.simulator;
    let law = config.laws.resolve(&plan.law)?;
    let rheology = plan.parameter_set()?;

    let topography = read_ascii(&plan.data_dir.join(&simulator.topography_file))?;
    let mass = read_ascii(&plan.data_dir.join(&simulator.mass_file))?;
    if mass.shape() != topography.shape() {
        let (tx, ty) = topography.shape();
        let (mx, my) = mass.shape();
        return Err(SwmbError::ShapeMismatch(
            ErrorInfo::new("swmb_exp.mass_shape", "mass raster shape differs from topography")
                .with_context("topography", format!("{tx}x{ty}"))
                .with_context("mass", format!("{mx}x{my}")),
        ));
    }
    let run_control = read_run_control(
        &plan.data_dir.join(&simulator.metadata_file),
        &config.metadata_keys,
    )?;

    let base = run_control
        .into_iter()
        .chain(base_parameters(&topography, simulator, &law));
    let params = merge_parameters(base, &rheology);
    let records = expand(&params, &config.label, &law.name)?;

    fs::create_dir_all(&plan.output_dir)
        .map_err(|err| SwmbError::io("swmb_exp.output_dir", &plan.output_dir, err))?;
    write_column_major(&plan.output_dir.join(&simulator.topography_dump), &topography)?;
    write_column_major(&plan.output_dir.join(&simulator.mass_dump), &mass)?;

    let law_dir = plan.output_dir.join(&law.name);
    for record in &records {
        write_case(&law_dir, record)?;
    }
    let script = law_dir.join(simulator.script_name());
    write_driver_script(&script, &records, simulator)?;

    let manifest_path = law_dir.join(MANIFEST_FILE);
    let manifest = GenerationManifest {
        plan_hash: plan.fingerprint()?,
        created_at: Utc::now().to_rfc3339(),
        law: law.clone(),
        simulator: simulator.binary.clone(),
        script: simulator.script_name(),
        runs: records.iter().map(ManifestRun::from_record).collect(),
    };
    manifest.write(&manifest_path)?;

    info!(
        law = %law.name,
        runs = records.len(),
        out = %plan.output_dir.display(),
        "generation complete"
    );
    Ok(GenerationReport {
        law,
        law_dir,
        records,
        script,
        manifest: manifest_path,
    })
}

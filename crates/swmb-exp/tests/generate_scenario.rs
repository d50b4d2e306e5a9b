use std::fs;
use std::path::Path;

use swmb_core::SwmbError;
use swmb_exp::{generate, preview, GenerationManifest, SweepPlan};
use tempfile::tempdir;

const TOPO: &str = "\
ncols 3
nrows 3
xllcorner 0
yllcorner 0
cellsize 10
nodata_value -9999
3 3 3
2 2 2
1 1 1
";

const MASS: &str = "\
ncols 3
nrows 3
xllcorner 0
yllcorner 0
cellsize 10
nodata_value -9999
0 0 0
0 5 0
0 0 0
";

const PLAN: &str = "\
law: coulomb
data_dir: data
output_dir: out
rheology:
  delta1: [10.0, 20.0]
";

fn write_inputs(root: &Path, readme: &str) {
    let data = root.join("data");
    fs::create_dir_all(&data).expect("data dir");
    fs::write(data.join("topo.asc"), TOPO).expect("topo");
    fs::write(data.join("mass.asc"), MASS).expect("mass");
    fs::write(data.join("README.txt"), readme).expect("readme");
}

#[test]
fn two_delta_sweep_end_to_end() {
    let root = tempdir().expect("tempdir");
    write_inputs(root.path(), "tmax 300\nauthor me\n");
    let plan_path = root.path().join("plan.yaml");
    fs::write(&plan_path, PLAN).expect("plan");

    let plan = SweepPlan::load(&plan_path).expect("load plan");
    let report = generate(&plan).expect("generate");
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.law.code, 1);

    let out = root.path().join("out");
    let law_dir = out.join("coulomb");
    assert!(law_dir.join("delta1_10p00").is_dir());
    assert!(law_dir.join("delta1_20p00").is_dir());
    let case_files: Vec<_> = fs::read_dir(&law_dir)
        .expect("law dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "txt"))
        .collect();
    assert_eq!(case_files.len(), 2);

    let case = fs::read_to_string(law_dir.join("delta1_10p00.txt")).expect("case");
    assert_eq!(
        case,
        "tmax 300\nnx 3\nny 3\nper 30\npery 30\nfile_m_init ../m.d\nfile_z_init ../z.d\n\
         icomp 1\ndelta1 10\nfolder_output delta1_10p00\n"
    );

    let z = fs::read_to_string(out.join("z.d")).expect("z dump");
    let z_lines: Vec<&str> = z.lines().collect();
    assert_eq!(z_lines.len(), 9);
    assert_eq!(z_lines[0], "1.000000000000000000e+00");
    assert_eq!(z_lines[8], "3.000000000000000000e+00");
    let m = fs::read_to_string(out.join("m.d")).expect("m dump");
    assert_eq!(m.lines().nth(4), Some("5.000000000000000000e+00"));

    let script = fs::read_to_string(law_dir.join("run_shaltop.sh")).expect("script");
    let invocations: Vec<&str> = script
        .lines()
        .filter(|line| line.starts_with("shaltop "))
        .collect();
    assert_eq!(
        invocations,
        ["shaltop \"\" delta1_10p00.txt", "shaltop \"\" delta1_20p00.txt"]
    );
    assert_eq!(script.matches(">> simulation_duration.txt").count(), 2);
    assert!(!law_dir.join("simulation_duration.txt").exists());

    let manifest = GenerationManifest::load(&report.manifest).expect("manifest");
    assert_eq!(manifest.runs.len(), 2);
    assert_eq!(manifest.runs[1].label, "delta1_20p00");
    assert_eq!(manifest.script, "run_shaltop.sh");
    assert_eq!(manifest.plan_hash.len(), 64);
}

#[test]
fn generation_is_idempotent_on_existing_dirs() {
    let root = tempdir().expect("tempdir");
    write_inputs(root.path(), "tmax 300\n");
    let plan_path = root.path().join("plan.yaml");
    fs::write(&plan_path, PLAN).expect("plan");
    let plan = SweepPlan::load(&plan_path).expect("load plan");
    let first = generate(&plan).expect("first run");
    let second = generate(&plan).expect("second run");
    assert_eq!(first.records, second.records);
}

#[test]
fn unknown_law_stops_before_writing() {
    let root = tempdir().expect("tempdir");
    write_inputs(root.path(), "tmax 300\n");
    let plan_path = root.path().join("plan.yaml");
    fs::write(&plan_path, PLAN.replace("coulomb", "plastic")).expect("plan");
    let plan = SweepPlan::load(&plan_path).expect("load plan");
    let err = generate(&plan).unwrap_err();
    assert!(matches!(err, SwmbError::UnknownRheologyLaw(_)));
    assert!(!root.path().join("out").exists());
}

#[test]
fn missing_metadata_aborts() {
    let root = tempdir().expect("tempdir");
    write_inputs(root.path(), "tmax 300\n");
    fs::remove_file(root.path().join("data/README.txt")).expect("remove");
    let plan_path = root.path().join("plan.yaml");
    fs::write(&plan_path, PLAN).expect("plan");
    let plan = SweepPlan::load(&plan_path).expect("load plan");
    let err = generate(&plan).unwrap_err();
    assert!(matches!(err, SwmbError::MissingMetadataFile(_)));
}

#[test]
fn mass_shape_must_match() {
    let root = tempdir().expect("tempdir");
    write_inputs(root.path(), "tmax 300\n");
    fs::write(
        root.path().join("data/mass.asc"),
        "ncols 1\nnrows 1\nxllcorner 0\nyllcorner 0\ncellsize 10\n0\n",
    )
    .expect("mass");
    let plan_path = root.path().join("plan.yaml");
    fs::write(&plan_path, PLAN).expect("plan");
    let plan = SweepPlan::load(&plan_path).expect("load plan");
    let err = generate(&plan).unwrap_err();
    assert!(matches!(err, SwmbError::ShapeMismatch(_)));
    assert_eq!(err.info().context["mass"], "1x1");
}

#[test]
fn preview_needs_no_inputs() {
    let plan = SweepPlan::from_yaml_str(
        "law: voellmy\nrheology:\n  delta1: [10.0, 20.0]\n  ksi: [100, 2000]\n",
    )
    .expect("plan");
    let records = preview(&plan).expect("preview");
    let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["delta1_10p00_ksi_0100p0", "delta1_20p00_ksi_2000p0"]);
}

#[test]
fn plan_config_overrides_labels_and_simulator() {
    let root = tempdir().expect("tempdir");
    write_inputs(root.path(), "tmax 300\n");
    let plan_path = root.path().join("plan.yaml");
    let plan_text = "\
law: voellmy
data_dir: data
output_dir: out
rheology:
  mu_s: [0.2, 0.3]
  rho: 2700
  flag: true
config:
  label:
    rules:
      - match: { prefix: mu }
        width: 4
        decimals: 2
  simulator:
    binary: shaltop_dev
";
    fs::write(&plan_path, plan_text).expect("plan");
    let plan = SweepPlan::load(&plan_path).expect("load plan");
    let report = generate(&plan).expect("generate");
    let labels: Vec<&str> = report.records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["mu_s_0p20", "mu_s_0p30"]);
    let case = fs::read_to_string(report.law_dir.join("mu_s_0p20.txt")).expect("case");
    assert!(case.contains("icomp 8\n"));
    assert!(case.contains("rho 2700\n"));
    assert!(case.contains("mu_s 0.2\n"));
    assert!(!case.contains("flag"));
    assert!(report.law_dir.join("run_shaltop_dev.sh").exists());
}

#[test]
fn plan_hash_ignores_project_location() {
    let first = tempdir().expect("tempdir");
    let second = tempdir().expect("tempdir");
    let mut hashes = Vec::new();
    for root in [first.path(), second.path()] {
        write_inputs(root, "tmax 300\n");
        let plan_path = root.join("plan.yaml");
        fs::write(&plan_path, PLAN).expect("plan");
        let plan = SweepPlan::load(&plan_path).expect("load plan");
        let report = generate(&plan).expect("generate");
        hashes.push(GenerationManifest::load(&report.manifest).expect("manifest").plan_hash);
    }
    assert_eq!(hashes[0], hashes[1]);
    let unresolved = SweepPlan::from_yaml_str(PLAN).expect("plan");
    assert_eq!(unresolved.fingerprint().expect("hash"), hashes[0]);
}

#[test]
fn plan_tables_drive_metadata_and_law_codes() {
    let root = tempdir().expect("tempdir");
    write_inputs(root.path(), "duration 120\nCFL 0.4\nepsilon 1e-3\n");
    let plan_path = root.path().join("plan.yaml");
    let plan_text = "\
law: herschel
data_dir: data
output_dir: out
rheology:
  delta1: [15.0]
config:
  metadata_keys:
    duration: tmax
    epsilon: eps0
  laws:
    coulomb: 1
    herschel: 9
";
    fs::write(&plan_path, plan_text).expect("plan");
    let plan = SweepPlan::load(&plan_path).expect("load plan");
    let report = generate(&plan).expect("generate");
    assert_eq!(report.law.code, 9);
    assert!(report.law_dir.ends_with("herschel"));
    let case = fs::read_to_string(report.law_dir.join("delta1_15p00.txt")).expect("case");
    assert_eq!(
        case,
        "tmax 120\neps0 1e-3\nnx 3\nny 3\nper 30\npery 30\nfile_m_init ../m.d\n\
         file_z_init ../z.d\nicomp 9\ndelta1 15\nfolder_output delta1_15p00\n"
    );
}

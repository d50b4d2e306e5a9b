use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

const RASTER: &str = "ncols 2\nnrows 2\nxllcenter 0\nyllcenter 0\ncellsize 5\nnodata_value -9999\n4 3\n2 1\n";

fn swmb() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_swmb"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn write_inputs(root: &Path) {
    let data = root.join("data");
    fs::create_dir_all(&data).expect("data dir");
    fs::write(data.join("topo.asc"), RASTER).expect("topo");
    fs::write(data.join("mass.asc"), RASTER).expect("mass");
    fs::write(data.join("README.txt"), "tmax 50\nCFL 0.4\n").expect("readme");
    fs::write(
        root.join("plan.yaml"),
        "law: coulomb\ndata_dir: data\noutput_dir: out\nrheology:\n  delta1: [10.0, 12.5]\n",
    )
    .expect("plan");
}

#[test]
fn raster_prints_summary_json() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("topo.asc");
    fs::write(&path, RASTER).expect("raster");
    let output = swmb().arg("raster").arg("--input").arg(&path).output().expect("run");
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(summary["nx"], 2);
    assert_eq!(summary["ny"], 2);
    assert_eq!(summary["min_value"], 1.0);
    assert_eq!(summary["max_value"], 4.0);
}

#[test]
fn labels_lists_runs_without_writing() {
    let dir = tempdir().expect("tempdir");
    write_inputs(dir.path());
    let output = swmb()
        .arg("labels")
        .arg("--plan")
        .arg(dir.path().join("plan.yaml"))
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let labels: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split('\t').next())
        .collect();
    assert_eq!(labels, ["delta1_10p00", "delta1_12p50"]);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn generate_writes_layout_and_honours_law_override() {
    let dir = tempdir().expect("tempdir");
    write_inputs(dir.path());
    let status = swmb()
        .arg("generate")
        .arg("--plan")
        .arg(dir.path().join("plan.yaml"))
        .arg("--law")
        .arg("bingham")
        .status()
        .expect("run");
    assert!(status.success());
    let law_dir = dir.path().join("out").join("bingham");
    let case = fs::read_to_string(law_dir.join("delta1_12p50.txt")).expect("case");
    assert!(case.contains("icomp 6\n"));
    assert!(case.contains("cflhyp 0.4\n"));
    assert!(law_dir.join("run_shaltop.sh").exists());
    assert!(dir.path().join("out").join("z.d").exists());
}

#[test]
fn unknown_law_fails_with_message() {
    let dir = tempdir().expect("tempdir");
    write_inputs(dir.path());
    let output = swmb()
        .arg("generate")
        .arg("--plan")
        .arg(dir.path().join("plan.yaml"))
        .arg("--law")
        .arg("plastic")
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("plastic"));
    assert!(!dir.path().join("out").exists());
}

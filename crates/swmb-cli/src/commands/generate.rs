use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use swmb_exp::generate;

use super::PlanArgs;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Directory holding topo.asc, mass.asc and README.txt.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Root of the generated layout.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let mut plan = args.plan.load()?;
    if let Some(dir) = &args.data_dir {
        plan.data_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        plan.output_dir = dir.clone();
    }
    let report = generate(&plan)?;
    println!(
        "{} runs for {} (icomp {}) in {}",
        report.records.len(),
        report.law.name,
        report.law.code,
        report.law_dir.display()
    );
    println!("script: {}", report.script.display());
    println!("manifest: {}", report.manifest.display());
    Ok(())
}

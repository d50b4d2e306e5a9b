use std::error::Error;

use clap::Args;
use swmb_exp::preview;

use super::PlanArgs;

#[derive(Args, Debug)]
pub struct LabelsArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
}

pub fn run(args: &LabelsArgs) -> Result<(), Box<dyn Error>> {
    let plan = args.plan.load()?;
    for record in preview(&plan)? {
        println!("{}\t{}", record.label, record.output_path.display());
    }
    Ok(())
}

pub mod generate;
pub mod labels;
pub mod raster;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use swmb_exp::SweepPlan;

/// Plan selection shared by the plan-driven subcommands.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// YAML sweep plan.
    #[arg(long)]
    pub plan: PathBuf,
    /// Override the plan's rheology law.
    #[arg(long)]
    pub law: Option<String>,
}

impl PlanArgs {
    pub fn load(&self) -> Result<SweepPlan, Box<dyn Error>> {
        let mut plan = SweepPlan::load(&self.plan)?;
        if let Some(law) = &self.law {
            plan.law = law.clone();
        }
        Ok(plan)
    }
}

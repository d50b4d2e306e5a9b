use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use swmb_core::to_canonical_json_bytes;
use swmb_grid::read_ascii;

#[derive(Args, Debug)]
pub struct RasterArgs {
    /// ESRI ASCII raster to inspect.
    #[arg(long)]
    pub input: PathBuf,
}

pub fn run(args: &RasterArgs) -> Result<(), Box<dyn Error>> {
    let grid = read_ascii(&args.input)?;
    let json = to_canonical_json_bytes(&grid.summary())?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}

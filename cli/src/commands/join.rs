use std::io::Write;

use anyhow::Result;
use choropleth::load_regions;

use crate::cli::{Cli, JoinArgs};

use super::open_inputs;

pub async fn run(_cli: &Cli, args: &JoinArgs) -> Result<()> {
    let (_, geometry, metrics) = open_inputs(&args.inputs)?;
    let regions = load_regions(&geometry, &metrics).await?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "name\tvalue\tmatched")?;
    for region in &regions {
        writeln!(out, "{}\t{}\t{}", region.name, region.value(), region.is_matched())?;
    }
    out.flush()?;

    Ok(())
}

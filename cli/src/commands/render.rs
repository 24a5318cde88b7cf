use anyhow::{bail, Context, Result};
use choropleth::{Choropleth, Repaint, Surface};

use crate::cli::{Cli, OutputFormat, RenderArgs};

use super::open_inputs;

pub async fn run(_cli: &Cli, args: &RenderArgs) -> Result<()> {
    let out_path = &args.output;
    if out_path.exists() && !args.force {
        bail!("[render] {} already exists (use --force to overwrite)", out_path.display());
    }

    let (config, geometry, metrics) = open_inputs(&args.inputs)?;
    let mut map = Choropleth::new(Surface::new("choropleth", args.width, args.height), &config)?;

    println!("[render] loading {} and {}", geometry.feed(), metrics.feed());
    let report = map.load_and_render(&geometry, &metrics).await?;
    println!("[render] drew {} regions, skipped {}", report.drawn, report.skipped.len());

    let renderer = map.renderer_mut();
    if let Some(name) = &args.hover {
        // tooltip anchored at the container center
        let repaint = renderer.pointer_enter(name, args.width / 2.0, args.height / 2.0);
        if repaint == Repaint::None {
            bail!("[render] no region named {name:?} was drawn");
        }
    }
    if let Some((x, y)) = args.pointer {
        if renderer.pointer_at(x, y) == Repaint::None {
            log::warn!("[render] pointer at ({x}, {y}) is not over any region");
        }
    }

    println!("[render] writing {:?} to {}", args.format, out_path.display());
    match args.format {
        OutputFormat::Svg => renderer.write_svg(out_path)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&renderer.to_json()?)?;
            std::fs::write(out_path, json)
                .with_context(|| format!("[render] Failed to write {}", out_path.display()))?;
        }
    }

    Ok(())
}

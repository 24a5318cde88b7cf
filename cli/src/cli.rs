use std::path::PathBuf;

/// Choropleth map CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "choropleth", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Join geometry with metrics and draw the map as SVG or JSON
    Render(RenderArgs),

    /// Print the joined table (name, value, matched) to stdout
    Join(JoinArgs),
}

#[derive(clap::Args, Debug)]
pub struct Inputs {
    /// GeoJSON FeatureCollection: file path or http(s) URL
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub geometry: String,

    /// Delimited metric table with a header row: file path or http(s) URL
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub metrics: String,

    /// JSON map configuration (title, margins, projection, color scale, ...)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Svg,
    /// Scene and interaction state
    Json,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Output file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Container width in pixels
    #[arg(long, default_value_t = 960.0)]
    pub width: f64,

    /// Container height in pixels
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,

    /// Hover this region before writing (tooltip and highlight)
    #[arg(long, conflicts_with = "pointer")]
    pub hover: Option<String>,

    /// Move the pointer to X,Y (container pixels) before writing
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub pointer: Option<(f64, f64)>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct JoinArgs {
    #[command(flatten)]
    pub inputs: Inputs,
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("invalid coordinate {v:?}: {e}"));
    Ok((coord(x)?, coord(y)?))
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn schema_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_with_pointer() {
        let cli = Cli::parse_from([
            "choropleth", "-vv", "render", "vn.geojson", "https://example.org/cases.tsv",
            "-o", "map.svg", "--pointer", "120, 80.5",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Render(args) = cli.command else { panic!("expected render") };
        assert_eq!(args.inputs.metrics, "https://example.org/cases.tsv");
        assert_eq!(args.pointer, Some((120.0, 80.5)));
        assert_eq!(args.format, OutputFormat::Svg);
        assert_eq!((args.width, args.height), (960.0, 600.0));
    }

    #[test]
    fn hover_and_pointer_conflict() {
        let result = Cli::try_parse_from([
            "choropleth", "render", "a", "b", "-o", "x", "--hover", "A", "--pointer", "1,2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_point_is_rejected() {
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
    }
}

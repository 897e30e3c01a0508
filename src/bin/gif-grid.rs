use std::path::Path;

use anyhow::Context as _;
use clap::Parser;

/// Convert a GIF into a grid PNG image.
#[derive(Parser, Debug)]
#[command(name = "gif-grid", version)]
struct Cli {
    /// Path or URL to the input GIF.
    #[arg(long = "gif_path", visible_alias = "gif-path")]
    gif_path: String,

    /// Number of rows in the grid.
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,

    /// Number of columns in the grid.
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..))]
    cols: u32,

    /// Output PNG path. Pass an empty string to skip writing.
    #[arg(long = "output_path", visible_alias = "output-path", default_value = "output.png")]
    output_path: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let shape = gif_grid::GridShape::new(cli.rows, cli.cols)?;
    let output = Some(cli.output_path.as_str())
        .filter(|p| !p.is_empty())
        .map(Path::new);

    let grid = gif_grid::gif_to_grid(&cli.gif_path, output, shape)
        .with_context(|| format!("build grid from '{}'", cli.gif_path))?;

    eprintln!(
        "grid {}x{} ({} rows, {} cols)",
        grid.width(),
        grid.height(),
        cli.rows,
        cli.cols
    );
    Ok(())
}

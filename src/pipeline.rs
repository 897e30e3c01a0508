use std::path::Path;

use image::RgbImage;

use crate::{
    error::GridResult,
    grid::{GridShape, compose_grid, extract_frames},
    load::Loader,
    save::save_png,
    source::SourceRef,
};

/// Load `source`, tile its frames into `shape` and, if `output` is given, save the
/// result there as PNG. The composed canvas is returned either way.
pub fn gif_to_grid(source: &str, output: Option<&Path>, shape: GridShape) -> GridResult<RgbImage> {
    let source = SourceRef::parse(source)?;
    gif_to_grid_with(&Loader::default(), &source, output, shape)
}

#[tracing::instrument(skip(loader))]
pub fn gif_to_grid_with(
    loader: &Loader,
    source: &SourceRef,
    output: Option<&Path>,
    shape: GridShape,
) -> GridResult<RgbImage> {
    let decoded = loader.load(source)?;
    let frames = extract_frames(decoded)?;
    let canvas = compose_grid(&frames, shape)?;

    if let Some(path) = output {
        save_png(&canvas, path)?;
    }

    Ok(canvas)
}

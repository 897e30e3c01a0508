use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use image::{ImageError, RgbImage, codecs::png::PngEncoder};

use crate::error::{GridError, GridResult};

/// Create the directory that will hold `path`. A bare file name resolves to the
/// current directory, which always exists.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Write `canvas` as an RGB PNG at exactly `path`, replacing any existing file.
pub fn save_png(canvas: &RgbImage, path: &Path) -> GridResult<()> {
    ensure_parent_dir(path)?;

    let mut out = BufWriter::new(File::create(path)?);
    canvas
        .write_with_encoder(PngEncoder::new(&mut out))
        .map_err(|err| match err {
            ImageError::IoError(io) => GridError::Io(io),
            other => GridError::Encode(other),
        })?;
    out.flush()?;

    tracing::info!(path = %path.display(), "saved grid image");
    Ok(())
}

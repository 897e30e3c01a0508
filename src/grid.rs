use image::{DynamicImage, RgbImage, imageops};

use crate::{
    error::{GridError, GridResult, LoadError},
    load::DecodedImage,
};

/// Row/column layout of the output grid. Both sides are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    rows: u32,
    cols: u32,
}

impl GridShape {
    pub fn new(rows: u32, cols: u32) -> GridResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(GridError::validation(format!(
                "grid shape must have at least one row and column (got {rows}x{cols})"
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(self) -> u32 {
        self.rows
    }

    pub fn cols(self) -> u32 {
        self.cols
    }

    pub fn cell_count(self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    /// Pixel offset of cell `idx` in row-major order for `w`x`h` cells, or `None` if
    /// it does not fit in `u32`.
    pub fn cell_origin(self, idx: u32, w: u32, h: u32) -> Option<(u32, u32)> {
        let row = idx / self.cols;
        let col = idx % self.cols;
        Some((col.checked_mul(w)?, row.checked_mul(h)?))
    }

    /// Canvas size for `w`x`h` cells, or `None` if it does not fit in `u32`.
    pub fn canvas_size(self, w: u32, h: u32) -> Option<(u32, u32)> {
        Some((w.checked_mul(self.cols)?, h.checked_mul(self.rows)?))
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self { rows: 4, cols: 6 }
    }
}

/// Drain every frame of `image`, dropping alpha.
pub fn extract_frames(image: DecodedImage) -> GridResult<Vec<RgbImage>> {
    let origin = image.origin().to_owned();
    let frames = image
        .frames()
        .map(|frame| {
            frame
                .map(|f| DynamicImage::ImageRgba8(f.into_buffer()).into_rgb8())
                .map_err(|source| {
                    GridError::Load(LoadError::Decode {
                        origin: origin.clone(),
                        source,
                    })
                })
        })
        .collect::<GridResult<Vec<_>>>()?;

    tracing::debug!(count = frames.len(), %origin, "extracted frames");
    Ok(frames)
}

/// Paste `frames` into a fresh canvas, left-to-right then top-to-bottom.
#[tracing::instrument(skip(frames), fields(frames = frames.len()))]
pub fn compose_grid(frames: &[RgbImage], shape: GridShape) -> GridResult<RgbImage> {
    let expected = shape.cell_count();
    let actual = frames.len() as u64;
    if actual != expected {
        return Err(GridError::FrameCountMismatch { expected, actual });
    }

    // cell_count() >= 1, so frames[0] exists.
    let (w, h) = frames[0].dimensions();
    for (index, frame) in frames.iter().enumerate().skip(1) {
        let (width, height) = frame.dimensions();
        if (width, height) != (w, h) {
            return Err(GridError::FrameSizeMismatch {
                index,
                width,
                height,
                expected_width: w,
                expected_height: h,
            });
        }
    }

    let too_large = || {
        GridError::validation(format!(
            "{}x{} grid of {w}x{h} frames is too large",
            shape.rows(),
            shape.cols()
        ))
    };
    let (canvas_w, canvas_h) = shape.canvas_size(w, h).ok_or_else(too_large)?;

    let mut canvas = RgbImage::new(canvas_w, canvas_h);
    for (idx, frame) in (0u32..).zip(frames) {
        let (x, y) = shape.cell_origin(idx, w, h).ok_or_else(too_large)?;
        imageops::replace(&mut canvas, frame, i64::from(x), i64::from(y));
    }

    tracing::debug!(width = canvas_w, height = canvas_h, "composed grid");
    Ok(canvas)
}

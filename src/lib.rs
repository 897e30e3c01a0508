#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod load;
pub mod pipeline;
pub mod save;
pub mod source;

pub use error::{GridError, GridResult, LoadError};
pub use grid::{GridShape, compose_grid, extract_frames};
pub use load::{DEFAULT_FETCH_TIMEOUT, DecodedImage, LoadOptions, Loader, load_image};
pub use pipeline::{gif_to_grid, gif_to_grid_with};
pub use save::{ensure_parent_dir, save_png};
pub use source::SourceRef;

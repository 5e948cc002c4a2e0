#![forbid(unsafe_code)]

//! Headless glyph measurement and ink-weight sorting.
//!
//! A [`Session`] sizes a raster from the sample alphabet once, then renders one character at a
//! time into it and sums the pixel bytes. Characters are sorted by that sum.

pub mod fonts;
pub mod geometry;
pub mod output;
pub mod raster;
pub mod session;
pub mod sort;
pub mod weight;

pub use fonts::{FontMetricsSurface, FontStack};
pub use geometry::{CanvasGeometry, GlyphBox, MeasureSurface, bootstrap_geometry};
pub use output::{render_html_page, render_plain};
pub use raster::{RasterSurface, SkiaSurface};
pub use session::{Session, SessionOptions};
pub use sort::{decorate, sort_by_weight, weigh_characters};
pub use weight::{GlyphWeightEstimator, WeightCache, ink_sum};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] inksort_core::Error),
    #[error("failed to load font file {}: {source}", path.display())]
    FontFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no loaded font matches `{family}`")]
    FontUnavailable { family: String },
    #[error("failed to parse font face: {message}")]
    FontFace { message: String },
    #[error("glyph measurement probe is not attached")]
    ProbeDetached,
    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to parse glyph SVG: {message}")]
    SvgParse { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#![forbid(unsafe_code)]

//! `inksort` sorts text by how much ink each character's glyph leaves on a raster.
//!
//! Two pipelines share one measuring [`render::Session`]:
//! - interactive: read a text file, sort its characters by glyph weight
//! - precomputed: read a character frequency map written by [`count_characters`], expand it
//!   back into text, sort that
//!
//! # Features
//!
//! - `render`: enable glyph measurement, sorting and output rendering (`inksort::render`)

pub use inksort_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use inksort_render::{
        CanvasGeometry, FontMetricsSurface, FontStack, GlyphBox, GlyphWeightEstimator,
        MeasureSurface, RasterSurface, Session, SessionOptions, SkiaSurface, WeightCache,
        bootstrap_geometry, decorate, ink_sum, render_html_page, render_plain, sort_by_weight,
        weigh_characters,
    };
    pub use inksort_render::{Error as RenderError, Result as RenderResult};

    use crate::{FontSpec, expand_frequency_map};

    pub mod load;

    pub use load::{TextSource, load_frequency_map, read_text_input};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] inksort_core::Error),
        #[error(transparent)]
        Render(#[from] inksort_render::Error),
        #[error("{what} finished without reporting a result")]
        Abandoned { what: &'static str },
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Output flavour for [`render_output`].
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub enum OutputFormat {
        #[default]
        Text,
        Html,
    }

    impl std::str::FromStr for OutputFormat {
        type Err = ();

        fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
            match s.trim().to_ascii_lowercase().as_str() {
                "text" | "txt" => Ok(Self::Text),
                "html" => Ok(Self::Html),
                _ => Err(()),
            }
        }
    }

    pub fn render_output(sorted: &str, font: &FontSpec, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => render_plain(sorted),
            OutputFormat::Html => render_html_page(sorted, font),
        }
    }

    /// Interactive pipeline: read `source`, drop newlines, sort by glyph weight.
    pub async fn sort_text_input<S: RasterSurface>(
        session: &mut Session<S>,
        source: TextSource,
    ) -> Result<String> {
        let text = read_text_input(source).await?;
        Ok(session.sort(&text)?)
    }

    /// Precomputed pipeline: load a frequency map, expand it back into text, sort that.
    pub async fn sort_precomputed<S: RasterSurface>(
        session: &mut Session<S>,
        path: std::path::PathBuf,
    ) -> Result<String> {
        let map = load_frequency_map(path).await?;
        Ok(session.sort(&expand_frequency_map(&map))?)
    }

    /// Synchronous form of [`sort_text_input`] (executor-free for callers).
    pub fn sort_text_input_sync<S: RasterSurface>(
        session: &mut Session<S>,
        source: TextSource,
    ) -> Result<String> {
        futures::executor::block_on(sort_text_input(session, source))
    }

    /// Synchronous form of [`sort_precomputed`].
    pub fn sort_precomputed_sync<S: RasterSurface>(
        session: &mut Session<S>,
        path: std::path::PathBuf,
    ) -> Result<String> {
        futures::executor::block_on(sort_precomputed(session, path))
    }
}

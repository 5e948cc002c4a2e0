use crate::Result;
use crate::fonts::{FontMetricsSurface, FontStack};
use crate::geometry::{CanvasGeometry, MeasureSurface, bootstrap_geometry};
use crate::raster::{RasterSurface, SkiaSurface};
use crate::sort::{sort_by_weight, weigh_characters};
use crate::weight::{GlyphWeightEstimator, WeightCache};
use inksort_core::{FontSpec, sample_alphabet};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub font: FontSpec,
    /// Extra font files loaded on top of (or instead of) the system fonts.
    pub font_files: Vec<PathBuf>,
    pub skip_system_fonts: bool,
}

/// One measuring session: a raster sized once, and the weights of every character seen so far.
///
/// Geometry is computed before the raster exists and never changes afterwards; weights are
/// cached for the life of the session.
#[derive(Debug)]
pub struct Session<S = SkiaSurface> {
    font: FontSpec,
    estimator: GlyphWeightEstimator<S>,
}

impl Session<SkiaSurface> {
    /// Loads fonts, sizes the raster from the sample alphabet and allocates it.
    pub fn initialize(options: SessionOptions) -> Result<Self> {
        options.font.validate()?;
        let fonts = FontStack::load(&options.font_files, options.skip_system_fonts)?;
        let mut probe = FontMetricsSurface::new(&fonts);
        Self::with_surfaces(options.font.clone(), &mut probe, |geometry| {
            SkiaSurface::new(&fonts, &options.font, geometry)
        })
    }
}

impl<S: RasterSurface> Session<S> {
    /// Builds a session on caller-provided surfaces.
    ///
    /// `make_raster` receives the bootstrapped geometry and must return a surface of that size.
    pub fn with_surfaces<F>(
        font: FontSpec,
        measure: &mut dyn MeasureSurface,
        make_raster: F,
    ) -> Result<Self>
    where
        F: FnOnce(&CanvasGeometry) -> Result<S>,
    {
        font.validate()?;
        let geometry = bootstrap_geometry(measure, &font, sample_alphabet())?;
        let surface = make_raster(&geometry)?;
        tracing::debug!(
            font = %font.css_shorthand(),
            width = geometry.raster_width(),
            height = geometry.raster_height(),
            "session initialized"
        );
        Ok(Self {
            font,
            estimator: GlyphWeightEstimator::new(surface, geometry),
        })
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        self.estimator.geometry()
    }

    pub fn weights(&self) -> &WeightCache {
        self.estimator.cache()
    }

    pub fn weight(&mut self, ch: char) -> Result<u64> {
        self.estimator.weight(ch)
    }

    /// Every non-newline character of `text` with its weight, in input order.
    pub fn weigh(&mut self, text: &str) -> Result<Vec<(char, u64)>> {
        weigh_characters(text, |ch| self.estimator.weight(ch))
    }

    /// `text` sorted by ascending glyph weight, ready for display.
    pub fn sort(&mut self, text: &str) -> Result<String> {
        sort_by_weight(text, |ch| self.estimator.weight(ch))
    }

    /// Ends the session, returning how many distinct characters were measured.
    pub fn teardown(self) -> usize {
        let (_surface, cache) = self.estimator.into_parts();
        tracing::debug!(measured = cache.len(), "session torn down");
        cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::geometry::GlyphBox;
    use crate::weight::tests::RunLengthSurface;

    struct FixedBoxes;

    impl MeasureSurface for FixedBoxes {
        fn attach_probe(&mut self, _font: &FontSpec) -> Result<()> {
            Ok(())
        }

        fn measure(&mut self, _ch: char) -> Result<GlyphBox> {
            Ok(GlyphBox::new(8.0, 16.0))
        }

        fn detach_probe(&mut self) {}
    }

    fn session() -> Session<RunLengthSurface> {
        Session::with_surfaces(FontSpec::default(), &mut FixedBoxes, |geometry| {
            let pixels = (geometry.raster_width() * geometry.raster_height()) as usize;
            Ok(RunLengthSurface::new(pixels))
        })
        .unwrap()
    }

    #[test]
    fn geometry_is_bootstrapped_before_the_raster_exists() {
        let session = session();
        assert_eq!(session.geometry(), &CanvasGeometry::from_extents(8.0, 16.0));
        assert_eq!(session.geometry().raster_width(), 12);
        assert_eq!(session.geometry().raster_height(), 24);
    }

    #[test]
    fn sorts_and_counts_measured_characters() {
        let mut session = session();
        assert_eq!(session.sort("ba").unwrap(), "a\u{200B}b");
        assert_eq!(session.sort("ab\nba").unwrap(), "a\u{200B}a\u{200B}b\u{200B}b");
        assert_eq!(session.weights().len(), 2);
        assert_eq!(session.teardown(), 2);
    }

    #[test]
    fn weigh_reports_input_order() {
        let mut session = session();
        let weighed = session.weigh("b.\na").unwrap();
        let chars: Vec<char> = weighed.iter().map(|(c, _)| *c).collect();
        assert_eq!(chars, vec!['b', '.', 'a']);
        assert_eq!(weighed[1].1, 2 * 255);
    }

    #[test]
    fn invalid_font_is_rejected_before_measuring() {
        let result = Session::with_surfaces(
            FontSpec::new("monospace", -1.0),
            &mut FixedBoxes,
            |_| Ok(RunLengthSurface::new(1)),
        );
        assert!(matches!(
            result,
            Err(Error::Core(inksort_core::Error::InvalidFontSize { .. }))
        ));
    }

    #[test]
    fn raster_allocation_failure_is_propagated() {
        let result: Result<Session<RunLengthSurface>> =
            Session::with_surfaces(FontSpec::default(), &mut FixedBoxes, |geometry| {
                Err(Error::PixmapAlloc {
                    width: geometry.raster_width(),
                    height: geometry.raster_height(),
                })
            });
        assert!(matches!(result, Err(Error::PixmapAlloc { width: 12, height: 24 })));
    }

    #[test]
    fn initialize_without_any_font_fails_cleanly() {
        let err = Session::initialize(SessionOptions {
            skip_system_fonts: true,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::FontUnavailable { .. }));
    }
}

//! Raster sizing.
//!
//! Every sample character is measured alone; the largest width and the largest height (tracked
//! independently) plus a quarter of each on every side give the raster that all later glyphs are
//! drawn into.

use crate::Result;
use inksort_core::FontSpec;
use serde::{Deserialize, Serialize};

/// Layout box of a single character, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphBox {
    pub width: f32,
    pub height: f32,
}

impl GlyphBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Something that can lay out one character at a time and report its box.
///
/// `attach_probe` must succeed before `measure` is called; `detach_probe` releases whatever the
/// probe holds and is always called once measurement is over, whether it succeeded or not.
pub trait MeasureSurface {
    fn attach_probe(&mut self, font: &FontSpec) -> Result<()>;
    fn measure(&mut self, ch: char) -> Result<GlyphBox>;
    fn detach_probe(&mut self);
}

/// Keeps a probe attached for as long as it lives.
struct ProbeGuard<'a> {
    surface: &'a mut dyn MeasureSurface,
}

impl<'a> ProbeGuard<'a> {
    fn attach(surface: &'a mut dyn MeasureSurface, font: &FontSpec) -> Result<Self> {
        surface.attach_probe(font)?;
        Ok(Self { surface })
    }

    fn measure(&mut self, ch: char) -> Result<GlyphBox> {
        self.surface.measure(ch)
    }
}

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        self.surface.detach_probe();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasGeometry {
    pub max_width: f32,
    pub max_height: f32,
    pub horizontal_padding: f32,
    pub vertical_padding: f32,
    pub full_width: f32,
    pub full_height: f32,
}

impl CanvasGeometry {
    pub fn from_extents(max_width: f32, max_height: f32) -> Self {
        let horizontal_padding = max_width / 4.0;
        let vertical_padding = max_height / 4.0;
        Self {
            max_width,
            max_height,
            horizontal_padding,
            vertical_padding,
            full_width: max_width + 2.0 * horizontal_padding,
            full_height: max_height + 2.0 * vertical_padding,
        }
    }

    /// Raster width in whole pixels (never zero).
    pub fn raster_width(&self) -> u32 {
        self.full_width.ceil().max(1.0) as u32
    }

    /// Raster height in whole pixels (never zero).
    pub fn raster_height(&self) -> u32 {
        self.full_height.ceil().max(1.0) as u32
    }

    /// Top-left corner glyphs are drawn at.
    pub fn glyph_origin(&self) -> (f32, f32) {
        (self.horizontal_padding, self.vertical_padding)
    }
}

/// Measures `alphabet` on `surface` and derives the raster geometry.
///
/// Zero-size boxes (a character the font cannot show) leave the maxima untouched. The probe is
/// detached before returning, including when a measurement fails.
pub fn bootstrap_geometry(
    surface: &mut dyn MeasureSurface,
    font: &FontSpec,
    alphabet: impl IntoIterator<Item = char>,
) -> Result<CanvasGeometry> {
    let mut probe = ProbeGuard::attach(surface, font)?;

    let mut max_width = 0.0_f32;
    let mut max_height = 0.0_f32;
    let mut degenerate = 0usize;
    for ch in alphabet {
        let glyph = probe.measure(ch)?;
        if !glyph.is_measurable() || glyph.width == 0.0 || glyph.height == 0.0 {
            degenerate += 1;
            tracing::debug!(?ch, ?glyph, "sample character has no usable extent");
        }
        if glyph.is_measurable() {
            max_width = max_width.max(glyph.width);
            max_height = max_height.max(glyph.height);
        }
    }
    drop(probe);

    let geometry = CanvasGeometry::from_extents(max_width, max_height);
    if max_width == 0.0 || max_height == 0.0 {
        tracing::warn!(
            font = %font.css_shorthand(),
            "no sample character produced a visible box; glyph weights will all be zero"
        );
    }
    tracing::debug!(?geometry, degenerate, "bootstrapped canvas geometry");
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Default)]
    struct ScriptedSurface {
        attached: bool,
        attach_calls: usize,
        detach_calls: usize,
        fail_on: Option<char>,
        measured: Vec<char>,
    }

    impl MeasureSurface for ScriptedSurface {
        fn attach_probe(&mut self, _font: &FontSpec) -> Result<()> {
            self.attached = true;
            self.attach_calls += 1;
            Ok(())
        }

        fn measure(&mut self, ch: char) -> Result<GlyphBox> {
            if !self.attached {
                return Err(Error::ProbeDetached);
            }
            if self.fail_on == Some(ch) {
                return Err(Error::FontFace {
                    message: format!("cannot measure {ch:?}"),
                });
            }
            self.measured.push(ch);
            Ok(match ch {
                // Wide but short.
                'W' => GlyphBox::new(40.0, 10.0),
                // Narrow but tall.
                '|' => GlyphBox::new(8.0, 80.0),
                // Unsupported by the font.
                '~' => GlyphBox::new(0.0, 0.0),
                _ => GlyphBox::new(20.0, 30.0),
            })
        }

        fn detach_probe(&mut self) {
            self.attached = false;
            self.detach_calls += 1;
        }
    }

    #[test]
    fn tracks_width_and_height_independently() {
        let mut surface = ScriptedSurface::default();
        let geometry = bootstrap_geometry(
            &mut surface,
            &FontSpec::default(),
            inksort_core::sample_alphabet(),
        )
        .unwrap();

        assert_eq!(geometry.max_width, 40.0);
        assert_eq!(geometry.max_height, 80.0);
        assert_eq!(geometry.horizontal_padding, 10.0);
        assert_eq!(geometry.vertical_padding, 20.0);
        assert_eq!(geometry.full_width, 60.0);
        assert_eq!(geometry.full_height, 120.0);
        assert_eq!(surface.measured.len(), inksort_core::SAMPLE_ALPHABET_LEN);
    }

    #[test]
    fn raster_is_strictly_larger_than_the_largest_glyph() {
        let geometry = CanvasGeometry::from_extents(43.2, 81.5);
        assert!(geometry.full_width > geometry.max_width);
        assert!(geometry.full_height > geometry.max_height);
        assert!(geometry.raster_width() as f32 > geometry.max_width);
        assert!(geometry.raster_height() as f32 > geometry.max_height);
        assert_eq!(geometry.raster_width(), 65);
        assert_eq!(geometry.raster_height(), 123);
    }

    #[test]
    fn zero_size_samples_do_not_raise_the_maximum() {
        let mut surface = ScriptedSurface::default();
        let geometry = bootstrap_geometry(&mut surface, &FontSpec::default(), ['~']).unwrap();
        assert_eq!(geometry, CanvasGeometry::from_extents(0.0, 0.0));
        assert_eq!(geometry.raster_width(), 1);
        assert_eq!(geometry.raster_height(), 1);
    }

    #[test]
    fn probe_is_released_after_success() {
        let mut surface = ScriptedSurface::default();
        bootstrap_geometry(&mut surface, &FontSpec::default(), ['a', 'b']).unwrap();
        assert_eq!(surface.attach_calls, 1);
        assert_eq!(surface.detach_calls, 1);
        assert!(!surface.attached);
    }

    #[test]
    fn probe_is_released_when_a_measurement_fails() {
        let mut surface = ScriptedSurface {
            fail_on: Some('b'),
            ..Default::default()
        };
        let err = bootstrap_geometry(&mut surface, &FontSpec::default(), ['a', 'b', 'c'])
            .unwrap_err();
        assert!(matches!(err, Error::FontFace { .. }));
        assert_eq!(surface.measured, vec!['a']);
        assert_eq!(surface.detach_calls, 1);
        assert!(!surface.attached);
    }
}

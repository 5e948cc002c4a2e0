//! The offscreen surface glyphs are drawn into.

use crate::fonts::FontStack;
use crate::geometry::CanvasGeometry;
use crate::{Error, Result};
use inksort_core::FontSpec;

/// A fixed-size RGBA8 buffer one character is drawn into at a time.
pub trait RasterSurface {
    /// Makes every pixel fully transparent.
    fn clear(&mut self);
    /// Draws `ch` in solid black with its top edge at `y` and its left edge at `x`.
    fn fill_glyph(&mut self, ch: char, x: f32, y: f32) -> Result<()>;
    /// Row-major RGBA8 bytes of the whole surface.
    fn pixels(&self) -> &[u8];
}

/// Characters that cannot produce ink (and cannot appear in XML text).
fn draws_nothing(ch: char) -> bool {
    ch.is_control() || matches!(ch, '\u{FFFE}' | '\u{FFFF}')
}

/// `tiny-skia` pixmap that `resvg` renders one-glyph SVG documents into.
pub struct SkiaSurface {
    pixmap: tiny_skia::Pixmap,
    options: usvg::Options<'static>,
    font: FontSpec,
}

impl std::fmt::Debug for SkiaSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkiaSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("font", &self.font)
            .finish()
    }
}

impl SkiaSurface {
    pub fn new(fonts: &FontStack, font: &FontSpec, geometry: &CanvasGeometry) -> Result<Self> {
        let (width, height) = (geometry.raster_width(), geometry.raster_height());
        let pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(Error::PixmapAlloc { width, height })?;
        Ok(Self {
            pixmap,
            options: fonts.usvg_options(font),
            font: font.clone(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn glyph_svg(&self, ch: char, x: f32, y: f32) -> String {
        let mut buf = [0u8; 4];
        let text = htmlize::escape_text(&*ch.encode_utf8(&mut buf));
        let family = htmlize::escape_attribute(self.font.family.as_str());
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><text x="{x}" y="{y}" font-family="{family}" font-size="{size}" dominant-baseline="text-before-edge" fill="#000" xml:space="preserve">{text}</text></svg>"##,
            size = self.font.size_px,
        )
    }
}

impl RasterSurface for SkiaSurface {
    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn fill_glyph(&mut self, ch: char, x: f32, y: f32) -> Result<()> {
        if draws_nothing(ch) {
            return Ok(());
        }
        let svg = self.glyph_svg(ch, x, y);
        let tree = usvg::Tree::from_str(&svg, &self.options).map_err(|err| Error::SvgParse {
            message: err.to_string(),
        })?;
        resvg::render(
            &tree,
            tiny_skia::Transform::identity(),
            &mut self.pixmap.as_mut(),
        );
        Ok(())
    }

    fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }
}

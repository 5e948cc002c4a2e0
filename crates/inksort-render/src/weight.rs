use crate::Result;
use crate::geometry::CanvasGeometry;
use crate::raster::RasterSurface;
use rustc_hash::FxHashMap;

/// Character -> glyph weight, filled lazily and never invalidated.
#[derive(Debug, Clone, Default)]
pub struct WeightCache {
    weights: FxHashMap<char, u64>,
}

impl WeightCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ch: char) -> Option<u64> {
        self.weights.get(&ch).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the cached weight for `ch`, running `compute` only on a miss.
    ///
    /// A failed computation is not cached.
    pub fn get_or_compute<F>(&mut self, ch: char, compute: F) -> Result<u64>
    where
        F: FnOnce(char) -> Result<u64>,
    {
        if let Some(&weight) = self.weights.get(&ch) {
            return Ok(weight);
        }
        let weight = compute(ch)?;
        self.weights.insert(ch, weight);
        Ok(weight)
    }
}

/// Sum of every byte in an RGBA8 buffer.
///
/// Glyphs are drawn in black onto a transparent surface, so the color channels stay zero and
/// the sum is the total opacity.
pub fn ink_sum(pixels: &[u8]) -> u64 {
    pixels.iter().map(|&b| u64::from(b)).sum()
}

/// Memoized glyph weight: clear the surface, draw one character at the padding offset, sum.
#[derive(Debug)]
pub struct GlyphWeightEstimator<S> {
    surface: S,
    geometry: CanvasGeometry,
    cache: WeightCache,
}

impl<S: RasterSurface> GlyphWeightEstimator<S> {
    pub fn new(surface: S, geometry: CanvasGeometry) -> Self {
        Self {
            surface,
            geometry,
            cache: WeightCache::new(),
        }
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        &self.geometry
    }

    pub fn cache(&self) -> &WeightCache {
        &self.cache
    }

    pub fn weight(&mut self, ch: char) -> Result<u64> {
        let surface = &mut self.surface;
        let (x, y) = self.geometry.glyph_origin();
        self.cache.get_or_compute(ch, |ch| {
            surface.clear();
            surface.fill_glyph(ch, x, y)?;
            let weight = ink_sum(surface.pixels());
            tracing::trace!(?ch, weight, "measured glyph weight");
            Ok(weight)
        })
    }

    pub fn into_parts(self) -> (S, WeightCache) {
        (self.surface, self.cache)
    }
}

//! Font loading and face resolution.

use crate::geometry::{GlyphBox, MeasureSurface};
use crate::{Error, Result};
use inksort_core::{FamilyName, FontSpec, GenericFamily};
use std::path::PathBuf;
use std::sync::Arc;
use usvg::fontdb;

/// The font database a session measures and rasterizes with.
///
/// The same database backs measurement and the `usvg::Options` glyph SVGs are parsed with, so
/// the faces measured are exactly the faces `resvg` later draws.
#[derive(Clone)]
pub struct FontStack {
    db: Arc<fontdb::Database>,
}

impl std::fmt::Debug for FontStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontStack")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl FontStack {
    /// Loads system fonts (unless `skip_system_fonts`) plus every file in `font_files`.
    pub fn load(font_files: &[PathBuf], skip_system_fonts: bool) -> Result<Self> {
        let mut db = fontdb::Database::new();
        if !skip_system_fonts {
            db.load_system_fonts();
        }
        for path in font_files {
            db.load_font_file(path).map_err(|source| Error::FontFile {
                path: path.clone(),
                source,
            })?;
        }
        adopt_installed_monospace(&mut db);
        tracing::debug!(faces = db.len(), "loaded font database");
        Ok(Self { db: Arc::new(db) })
    }

    /// Options for parsing glyph SVGs against this database.
    pub fn usvg_options(&self, font: &FontSpec) -> usvg::Options<'static> {
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.db);
        if let Some(FamilyName::Named(name)) = font.families().into_iter().next() {
            options.font_family = name;
        }
        options
    }

    /// Picks the first face matching `font`'s family list.
    pub fn resolve(&self, font: &FontSpec) -> Result<fontdb::ID> {
        let names = font.families();
        let families = names.iter().map(to_fontdb_family).collect::<Vec<_>>();
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        self.db
            .query(&query)
            .ok_or_else(|| Error::FontUnavailable {
                family: font.family.clone(),
            })
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    fn with_face<T>(
        &self,
        id: fontdb::ID,
        f: impl FnOnce(&ttf_parser::Face<'_>) -> T,
    ) -> Result<T> {
        self.db
            .with_face_data(id, |data, index| {
                ttf_parser::Face::parse(data, index)
                    .map(|face| f(&face))
                    .map_err(|err| Error::FontFace {
                        message: err.to_string(),
                    })
            })
            .unwrap_or_else(|| {
                Err(Error::FontFace {
                    message: format!("face {id:?} has no data"),
                })
            })
    }
}

fn to_fontdb_family(name: &FamilyName) -> fontdb::Family<'_> {
    match name {
        FamilyName::Named(name) => fontdb::Family::Name(name),
        FamilyName::Generic(GenericFamily::Serif) => fontdb::Family::Serif,
        FamilyName::Generic(GenericFamily::SansSerif) => fontdb::Family::SansSerif,
        FamilyName::Generic(GenericFamily::Monospace) => fontdb::Family::Monospace,
        FamilyName::Generic(GenericFamily::Cursive) => fontdb::Family::Cursive,
        FamilyName::Generic(GenericFamily::Fantasy) => fontdb::Family::Fantasy,
    }
}

/// `fontdb` maps the generic monospace family to "Courier New", which most Linux systems lack.
/// Point it at the first installed monospaced face instead.
fn adopt_installed_monospace(db: &mut fontdb::Database) {
    let configured = db.family_name(&fontdb::Family::Monospace).to_string();
    let installed = db.faces().any(|face| {
        face.families
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(&configured))
    });
    if installed {
        return;
    }

    let fallback = db
        .faces()
        .find(|face| face.monospaced)
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());
    match fallback {
        Some(name) => {
            tracing::warn!(%configured, %name, "monospace family not installed; using fallback");
            db.set_monospace_family(name);
        }
        None => tracing::debug!(%configured, "no monospaced face available"),
    }
}

#[derive(Debug, Clone, Copy)]
struct ProbeFace {
    id: fontdb::ID,
    px_per_unit: f32,
    line_height: f32,
}

/// Measures characters from font tables: the advance width, and the line box height a
/// `line-height: normal` inline element would get (ascender - descender + line gap).
///
/// A character the face has no glyph for measures as zero.
#[derive(Debug)]
pub struct FontMetricsSurface<'a> {
    fonts: &'a FontStack,
    probe: Option<ProbeFace>,
}

impl<'a> FontMetricsSurface<'a> {
    pub fn new(fonts: &'a FontStack) -> Self {
        Self { fonts, probe: None }
    }

    pub fn is_attached(&self) -> bool {
        self.probe.is_some()
    }
}

impl MeasureSurface for FontMetricsSurface<'_> {
    fn attach_probe(&mut self, font: &FontSpec) -> Result<()> {
        let id = self.fonts.resolve(font)?;
        let size_px = font.size_px;
        let probe = self.fonts.with_face(id, |face| {
            let px_per_unit = size_px / f32::from(face.units_per_em().max(1));
            let line_units = i32::from(face.ascender()) - i32::from(face.descender())
                + i32::from(face.line_gap());
            ProbeFace {
                id,
                px_per_unit,
                line_height: line_units.max(0) as f32 * px_per_unit,
            }
        })?;
        tracing::debug!(?probe, "attached measurement probe");
        self.probe = Some(probe);
        Ok(())
    }

    fn measure(&mut self, ch: char) -> Result<GlyphBox> {
        let probe = self.probe.ok_or(Error::ProbeDetached)?;
        let advance = self.fonts.with_face(probe.id, |face| {
            face.glyph_index(ch)
                .and_then(|glyph| face.glyph_hor_advance(glyph))
        })?;
        Ok(match advance {
            Some(advance) => {
                GlyphBox::new(f32::from(advance) * probe.px_per_unit, probe.line_height)
            }
            None => GlyphBox::default(),
        })
    }

    fn detach_probe(&mut self) {
        if self.probe.take().is_some() {
            tracing::debug!("detached measurement probe");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_stack() -> FontStack {
        FontStack::load(&[], true).unwrap()
    }

    #[test]
    fn empty_database_resolves_nothing() {
        let fonts = empty_stack();
        assert_eq!(fonts.face_count(), 0);
        let err = fonts.resolve(&FontSpec::default()).unwrap_err();
        assert!(matches!(err, Error::FontUnavailable { .. }));
    }

    #[test]
    fn measuring_without_a_probe_fails() {
        let fonts = empty_stack();
        let mut surface = FontMetricsSurface::new(&fonts);
        assert!(matches!(surface.measure('a'), Err(Error::ProbeDetached)));
    }

    #[test]
    fn failed_attach_leaves_surface_detached() {
        let fonts = empty_stack();
        let mut surface = FontMetricsSurface::new(&fonts);
        assert!(surface.attach_probe(&FontSpec::default()).is_err());
        assert!(!surface.is_attached());
    }

    #[test]
    fn missing_font_file_is_reported() {
        let err = FontStack::load(&[PathBuf::from("/definitely/not/a/font.ttf")], true)
            .unwrap_err();
        assert!(matches!(err, Error::FontFile { .. }));
    }

    #[test]
    fn glyph_options_use_first_named_family() {
        let fonts = empty_stack();
        let options = fonts.usvg_options(&FontSpec::new("'DejaVu Sans Mono', monospace", 12.0));
        assert_eq!(options.font_family, "DejaVu Sans Mono");
    }
}

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_FAMILY: &str = "\"Courier New\", Courier, monospace";
pub const DEFAULT_FONT_SIZE_PX: f32 = 72.0;

/// Number of characters in [`sample_alphabet`].
pub const SAMPLE_ALPHABET_LEN: usize = 95;

/// Printable ASCII (`' '..='~'`): the characters most texts are made of.
///
/// The raster is sized from these; characters outside the set are covered by padding.
pub fn sample_alphabet() -> impl Iterator<Item = char> + Clone {
    (' '..='~').take(SAMPLE_ALPHABET_LEN)
}

/// Font used for both measuring and rasterizing glyphs.
///
/// `family` is a CSS-style family list (`"Courier New", Courier, monospace`); entries are tried
/// in order and may end with a generic family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub family: String,
    pub size_px: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            size_px: DEFAULT_FONT_SIZE_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenericFamily {
    Serif,
    SansSerif,
    Monospace,
    Cursive,
    Fantasy,
}

impl GenericFamily {
    fn from_keyword(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "serif" => Some(Self::Serif),
            "sans-serif" => Some(Self::SansSerif),
            "monospace" => Some(Self::Monospace),
            "cursive" => Some(Self::Cursive),
            "fantasy" => Some(Self::Fantasy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyName {
    Named(String),
    Generic(GenericFamily),
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size_px: f32) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.size_px.is_finite() && self.size_px > 0.0) {
            return Err(Error::InvalidFontSize {
                size_px: self.size_px,
            });
        }
        if self.families().is_empty() {
            return Err(Error::EmptyFontFamily);
        }
        Ok(())
    }

    /// Splits the family list into individual names.
    ///
    /// Quoted names keep their inner text verbatim; unquoted generic keywords become
    /// [`FamilyName::Generic`]. Empty entries are skipped.
    pub fn families(&self) -> Vec<FamilyName> {
        let mut out = Vec::new();
        for raw in self.family.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let quoted = raw.len() >= 2
                && ((raw.starts_with('"') && raw.ends_with('"'))
                    || (raw.starts_with('\'') && raw.ends_with('\'')));
            if quoted {
                let inner = raw[1..raw.len() - 1].trim();
                if !inner.is_empty() {
                    out.push(FamilyName::Named(inner.to_string()));
                }
                continue;
            }
            match GenericFamily::from_keyword(raw) {
                Some(generic) => out.push(FamilyName::Generic(generic)),
                None => out.push(FamilyName::Named(raw.to_string())),
            }
        }
        out
    }

    /// CSS `font` shorthand, e.g. `72px "Courier New", Courier, monospace`.
    pub fn css_shorthand(&self) -> String {
        format!("{}px {}", self.size_px, self.family.trim())
    }
}

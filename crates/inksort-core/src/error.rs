use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid font size: {size_px}px (expected a finite, positive pixel size)")]
    InvalidFontSize { size_px: f32 },

    #[error("font family list is empty")]
    EmptyFontFamily,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("frequency map JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

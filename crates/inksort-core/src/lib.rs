#![forbid(unsafe_code)]

//! Rendering-independent building blocks for `inksort`.
//!
//! - [`font`]: the font a session measures and rasterizes with, plus the sample alphabet used
//!   to size the raster
//! - [`markers`]: the invisible/non-collapsing characters woven into sorted output
//! - [`counter`]: the offline character counter and its JSON frequency map

pub mod counter;
pub mod error;
pub mod font;
pub mod markers;

pub use counter::{
    DEFAULT_FREQUENCY_MAP_PATH, FrequencyMap, count_characters, expand_frequency_map,
    read_frequency_map, write_frequency_map,
};
pub use error::{Error, Result};
pub use font::{FamilyName, FontSpec, GenericFamily, SAMPLE_ALPHABET_LEN, sample_alphabet};
pub use markers::{NO_BREAK_SPACE, SPACE_SENTINEL, ZERO_WIDTH_SPACE, strip_markers};

//! Offline character counter.
//!
//! Counts every character of a corpus and persists the result as a flat JSON object, e.g.
//! `{"a":2,"b":1,"c":1,"&nbsp;":1}`. The space count lives under [`SPACE_SENTINEL`] and
//! newlines are not recorded at all.

use crate::markers::SPACE_SENTINEL;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_FREQUENCY_MAP_PATH: &str = "deconstructed.json";

/// Character -> occurrence count, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyMap {
    counts: IndexMap<String, u64>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn insert(&mut self, key: impl Into<String>, count: u64) -> Option<u64> {
        self.counts.insert(key.into(), count)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl FromIterator<(String, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Counts every character of `source`.
///
/// The space count is moved to [`SPACE_SENTINEL`] (appended last, and only when the corpus has
/// at least one space); the newline count is dropped.
pub fn count_characters(source: &str) -> FrequencyMap {
    let mut by_char: IndexMap<char, u64> = IndexMap::new();
    for ch in source.chars() {
        *by_char.entry(ch).or_insert(0) += 1;
    }

    let spaces = by_char.shift_remove(&' ');
    by_char.shift_remove(&'\n');

    let mut counts: IndexMap<String, u64> = by_char
        .into_iter()
        .map(|(ch, count)| (ch.to_string(), count))
        .collect();
    if let Some(spaces) = spaces {
        counts.insert(SPACE_SENTINEL.to_string(), spaces);
    }

    tracing::debug!(distinct = counts.len(), "counted corpus characters");
    FrequencyMap { counts }
}

/// Flattens a frequency map back into text: every key repeated `count` times, in map order.
///
/// The sentinel key expands to literal spaces.
pub fn expand_frequency_map(map: &FrequencyMap) -> String {
    let mut out = String::with_capacity(map.total().min(1 << 20) as usize);
    for (key, count) in map.iter() {
        let unit = if key == SPACE_SENTINEL { " " } else { key };
        for _ in 0..count {
            out.push_str(unit);
        }
    }
    out
}

pub fn read_frequency_map(path: &Path) -> Result<FrequencyMap> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    FrequencyMap::from_json(&text)
}

pub fn write_frequency_map(path: &Path, map: &FrequencyMap) -> Result<()> {
    let json = map.to_json()?;
    std::fs::write(path, json).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

//! Weight-sorted text.

use crate::Result;
use inksort_core::{NO_BREAK_SPACE, ZERO_WIDTH_SPACE};

/// Pairs every non-newline character of `text` with its weight, in input order.
pub fn weigh_characters<F>(text: &str, mut weigh: F) -> Result<Vec<(char, u64)>>
where
    F: FnMut(char) -> Result<u64>,
{
    text.chars()
        .filter(|&ch| ch != '\n')
        .map(|ch| Ok((ch, weigh(ch)?)))
        .collect()
}

/// Joins characters for display: a zero-width space between each pair, spaces made
/// non-breaking.
pub fn decorate(chars: impl IntoIterator<Item = char>) -> String {
    let mut out = String::new();
    for (i, ch) in chars.into_iter().enumerate() {
        if i > 0 {
            out.push(ZERO_WIDTH_SPACE);
        }
        out.push(if ch == ' ' { NO_BREAK_SPACE } else { ch });
    }
    out
}

/// Drops newlines, sorts the remaining characters by ascending weight and decorates the result.
///
/// The sort is stable: characters of equal weight keep their input order.
pub fn sort_by_weight<F>(text: &str, weigh: F) -> Result<String>
where
    F: FnMut(char) -> Result<u64>,
{
    let mut weighed = weigh_characters(text, weigh)?;
    weighed.sort_by_key(|&(_, weight)| weight);
    Ok(decorate(weighed.into_iter().map(|(ch, _)| ch)))
}

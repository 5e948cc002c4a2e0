//! Characters woven into sorted output so that it renders as a grid of discrete glyphs.

/// Inserted between every pair of sorted characters so lines may wrap anywhere.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Stands in for a literal space so sorted whitespace stays visible instead of collapsing.
pub const NO_BREAK_SPACE: char = '\u{00A0}';

/// Key the offline counter stores the space count under.
pub const SPACE_SENTINEL: &str = "&nbsp;";

/// Undoes the output decoration: drops zero-width spaces and turns no-break spaces back into
/// plain spaces.
///
/// Lossy by nature: a no-break space that was already present in the input comes back as a
/// plain space too.
pub fn strip_markers(decorated: &str) -> String {
    decorated
        .chars()
        .filter(|&c| c != ZERO_WIDTH_SPACE)
        .map(|c| if c == NO_BREAK_SPACE { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_markers_restores_plain_text() {
        let decorated = format!("a{ZERO_WIDTH_SPACE}{NO_BREAK_SPACE}{ZERO_WIDTH_SPACE}b");
        assert_eq!(strip_markers(&decorated), "a b");
    }

    #[test]
    fn strip_markers_keeps_unmarked_text() {
        assert_eq!(strip_markers("plain\ttext"), "plain\ttext");
        assert_eq!(strip_markers(""), "");
    }
}

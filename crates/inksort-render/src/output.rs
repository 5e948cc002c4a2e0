//! Output region rendering.

use inksort_core::FontSpec;

/// Sorted text as-is, newline-terminated for terminals.
pub fn render_plain(sorted: &str) -> String {
    let mut out = String::with_capacity(sorted.len() + 1);
    out.push_str(sorted);
    out.push('\n');
    out
}

/// Standalone HTML page with the sorted text in a wrapping `<pre>` region.
///
/// The text is escaped, so markup characters from the input show up as glyphs. The zero-width
/// and no-break spaces are emitted as raw UTF-8.
pub fn render_html_page(sorted: &str, font: &FontSpec) -> String {
    let text = htmlize::escape_text(sorted);
    let family = htmlize::escape_attribute(font.family.as_str());
    format!(
        "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<title>inksort</title>\n\
</head>\n\
<body>\n\
<pre style=\"background-color: #eee; white-space: pre-wrap; word-wrap: break-word; font-family: {family};\">{text}</pre>\n\
</body>\n\
</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_is_newline_terminated() {
        assert_eq!(render_plain("a\u{200B}b"), "a\u{200B}b\n");
        assert_eq!(render_plain(""), "\n");
    }

    #[test]
    fn html_output_escapes_text_and_keeps_markers() {
        let page = render_html_page("<\u{200B}&\u{200B}\u{00A0}", &FontSpec::default());
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains(">&lt;\u{200B}&amp;\u{200B}\u{00A0}</pre>"));
        assert!(page.contains("white-space: pre-wrap; word-wrap: break-word;"));
        assert!(page.contains("font-family: &quot;Courier New&quot;, Courier, monospace;"));
    }
}

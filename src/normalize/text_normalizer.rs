use scraper::Html;

/// Turns markdown/HTML-ish markup into plain text.
///
/// Markdown is treated as loosely-structured HTML: tag structure and
/// attributes are discarded and only text nodes survive. Markdown syntax
/// that is not HTML (`# Title`, `*emphasis*`) is plain text to the parser
/// and passes through unchanged.
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Runs the full pipeline: markup-to-text, residual tag stripping,
    /// newline collapsing. Returns `None` when text extraction fails, in
    /// which case the caller is expected to skip the input and carry on.
    pub fn normalize(&self, markup: &str) -> Option<String> {
        let text = self.markup_to_text(markup)?;
        let text = strip_residual_tags(&text);
        Some(collapse_newlines(&text))
    }

    /// Parses the blob as tolerant HTML and collects text content only.
    ///
    /// html5ever recovers from malformed markup rather than erroring, so
    /// `None` is reserved for inputs the parser cannot turn into a document
    /// at all. Script and style bodies are text nodes and are kept, matching
    /// a generic get-the-text contract rather than a browser's rendering.
    fn markup_to_text(&self, markup: &str) -> Option<String> {
        let document = Html::parse_document(markup);
        Some(document.root_element().text().collect())
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes literal `<` and `>` characters the parse left behind, a second
/// line of defense against unparsed markup fragments.
fn strip_residual_tags(text: &str) -> String {
    text.replace(['<', '>'], "")
}

/// Drops empty lines and rejoins with single newlines. Whitespace within a
/// line is untouched.
fn collapse_newlines(text: &str) -> String {
    text.split('\n')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_removed_and_blank_lines_collapsed() {
        let normalizer = TextNormalizer::new();
        let result = normalizer.normalize("<p>Hello</p>\n\n\nWorld").unwrap();
        assert_eq!(result, "Hello\nWorld");
    }

    #[test]
    fn test_idempotent_on_tag_free_prose() {
        let normalizer = TextNormalizer::new();
        let input = "First line of prose\nSecond line, with punctuation.\nThird line";

        let once = normalizer.normalize(input).unwrap();
        let twice = normalizer.normalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_markdown_syntax_passes_through() {
        let normalizer = TextNormalizer::new();
        let result = normalizer.normalize("# Title\n\nSome *emphasis* here").unwrap();
        assert_eq!(result, "# Title\nSome *emphasis* here");
    }

    #[test]
    fn test_residual_angle_brackets_stripped() {
        let normalizer = TextNormalizer::new();
        // A bare "<" with no tag name survives parsing as text.
        let result = normalizer.normalize("value < threshold").unwrap();
        assert_eq!(result, "value  threshold");
    }

    #[test]
    fn test_intra_line_whitespace_preserved() {
        let normalizer = TextNormalizer::new();
        let result = normalizer.normalize("a    b\n\n  indented  ").unwrap();
        assert_eq!(result, "a    b\n  indented  ");
    }

    #[test]
    fn test_empty_input() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("").unwrap(), "");
    }

    #[test]
    fn test_collapse_newlines_helper() {
        assert_eq!(collapse_newlines("a\n\n\nb\n"), "a\nb");
        assert_eq!(collapse_newlines("\n\n"), "");
    }
}

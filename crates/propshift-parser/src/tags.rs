//! Open- and closing-tag location.
//!
//! The open-tag scanner bounds the attribute span of `<Name ...>` by walking
//! forward with quote and brace state, so a `>` inside `"a > b"` or
//! `{() => x}` never ends the tag early. Strings are tracked at every brace
//! depth, so a `{` or `}` inside `{"{"}` does not unbalance the span.

use std::ops::Range;

use crate::position::line_col;
use crate::BoundaryError;

/// One `<Name ...>` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    /// Byte offset of `<`.
    pub start: usize,
    /// Attribute span: after the tag name, before `>`.
    pub attrs: Range<usize>,
    /// Byte offset just past `>`.
    pub end: usize,
}

/// Iterator over the open tags named `name`, in source order.
///
/// Occurrences whose `>` is never found yield a [`BoundaryError`] and scanning
/// resumes right after the tag name.
pub struct TagScanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pattern: String,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    pub fn new(source: &'a str, name: &str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pattern: format!("<{name}"),
            pos: 0,
        }
    }

    /// Find the `>` that closes an attribute span starting at `from`.
    fn find_span_end(&self, from: usize) -> Option<usize> {
        let mut quote: Option<u8> = None;
        let mut depth = 0usize;
        let mut i = from;

        while i < self.bytes.len() {
            let b = self.bytes[i];
            match quote {
                Some(q) => {
                    if b == b'\\' {
                        i += 2;
                        continue;
                    }
                    if b == q {
                        quote = None;
                    }
                }
                None => match b {
                    b'"' | b'\'' | b'`' => quote = Some(b),
                    b'{' => depth += 1,
                    b'}' => depth = depth.saturating_sub(1),
                    b'>' if depth == 0 => return Some(i),
                    _ => {}
                },
            }
            i += 1;
        }

        None
    }

    fn tag_name(&self) -> &str {
        &self.pattern[1..]
    }
}

impl Iterator for TagScanner<'_> {
    type Item = Result<OpenTag, BoundaryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let found = self.source.get(self.pos..)?.find(&self.pattern)?;
            let start = self.pos + found;
            let after_name = start + self.pattern.len();

            // `<Button` must not match `<ButtonGroup`.
            match self.bytes.get(after_name) {
                Some(b) if b.is_ascii_whitespace() || *b == b'/' || *b == b'>' => {}
                Some(_) => {
                    self.pos = after_name;
                    continue;
                }
                None => {}
            }

            return match self.find_span_end(after_name) {
                Some(gt) => {
                    self.pos = gt + 1;
                    Some(Ok(OpenTag {
                        start,
                        attrs: after_name..gt,
                        end: gt + 1,
                    }))
                }
                None => {
                    self.pos = after_name;
                    let position = line_col(self.source, start);
                    Some(Err(BoundaryError {
                        message: format!("unterminated <{}> tag", self.tag_name()),
                        offset: start,
                        line: position.line,
                        column: position.column,
                    }))
                }
            };
        }
    }
}

/// Byte ranges of every `</name>` (whitespace allowed before `>`).
pub fn find_closing_tags(source: &str, name: &str) -> Vec<Range<usize>> {
    let pattern = format!("</{name}");
    let bytes = source.as_bytes();
    let mut ranges = Vec::new();
    let mut pos = 0;

    while let Some(found) = source[pos..].find(&pattern) {
        let start = pos + found;
        let mut i = start + pattern.len();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) == Some(&b'>') {
            ranges.push(start..i + 1);
            pos = i + 1;
        } else {
            pos = start + pattern.len();
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans<'a>(source: &'a str, name: &str) -> Vec<&'a str> {
        TagScanner::new(source, name)
            .map(|t| {
                let t = t.unwrap();
                &source[t.attrs]
            })
            .collect()
    }

    // =========================================================================
    // Open tags
    // =========================================================================

    #[test]
    fn test_simple_tag() {
        let source = "<div><CButton color=\"primary\">Go</CButton></div>";
        let tags: Vec<_> = TagScanner::new(source, "CButton")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].start, 5);
        assert_eq!(&source[tags[0].attrs.clone()], " color=\"primary\"");
        assert_eq!(&source[tags[0].start..tags[0].end], "<CButton color=\"primary\">");
    }

    #[test]
    fn test_arrow_function_does_not_end_span() {
        let source = "<CButton onClick={() => go(a > b)} size=\"sm\">x</CButton>";
        assert_eq!(spans(source, "CButton"), vec![" onClick={() => go(a > b)} size=\"sm\""]);
    }

    #[test]
    fn test_quoted_gt_does_not_end_span() {
        let source = "<CButton title=\"a > b\" alt='>'>x</CButton>";
        assert_eq!(spans(source, "CButton"), vec![" title=\"a > b\" alt='>'"]);
    }

    #[test]
    fn test_braces_inside_expression_strings() {
        let source = "<CButton title={\"{\"} color=\"danger\">x</CButton>\n<b>{a}</b>\n<CButton label={'}'} color=\"info\">y</CButton>";
        assert_eq!(
            spans(source, "CButton"),
            vec![" title={\"{\"} color=\"danger\"", " label={'}'} color=\"info\""]
        );
    }

    #[test]
    fn test_template_literal_gt_does_not_end_span() {
        let source = "<CButton title={`${a} > {`}>x</CButton>";
        assert_eq!(spans(source, "CButton"), vec![" title={`${a} > {`}"]);
    }

    #[test]
    fn test_self_closing_and_multiline() {
        let source = "<CButton\n  disabled\n/>\n<CButton/>";
        assert_eq!(spans(source, "CButton"), vec!["\n  disabled\n/", "/"]);
    }

    #[test]
    fn test_name_prefix_is_not_a_match() {
        let source = "<CButtonGroup><CButton>a</CButton></CButtonGroup>";
        assert_eq!(spans(source, "CButton"), vec![""]);
    }

    #[test]
    fn test_unterminated_tag_reports_position() {
        let source = "ok\n  <CButton color={x\n";
        let results: Vec<_> = TagScanner::new(source, "CButton").collect();
        assert_eq!(results.len(), 1);
        let err = results[0].clone().unwrap_err();
        assert_eq!(err.offset, 5);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 3);
        assert!(err.to_string().contains("unterminated <CButton> tag"));
    }

    #[test]
    fn test_scanning_resumes_after_unterminated_tag() {
        let source = "<CButton onClick={() => {\n<CButton>ok</CButton>";
        let results: Vec<_> = TagScanner::new(source, "CButton").collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert_eq!(results[1].as_ref().unwrap().attrs, 34..34);
    }

    // =========================================================================
    // Closing tags
    // =========================================================================

    #[test]
    fn test_closing_tags() {
        let source = "<CButton>a</CButton> <CButton>b</CButton  >";
        let ranges = find_closing_tags(source, "CButton");
        let texts: Vec<_> = ranges.iter().map(|r| &source[r.clone()]).collect();
        assert_eq!(texts, vec!["</CButton>", "</CButton  >"]);
    }

    #[test]
    fn test_closing_tags_skip_longer_names() {
        let source = "</CButtonGroup></CButton>";
        let ranges = find_closing_tags(source, "CButton");
        assert_eq!(ranges, vec![15..25]);
    }
}

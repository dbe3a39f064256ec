//! Substituting rewritten tags back into source text.

use std::ops::Range;

use propshift_parser::{find_closing_tags, BoundaryError, OpenTag, TagScanner};
use tracing::{debug, warn};

use crate::origin::{Origin, Splice};
use crate::{Edit, Issue, IssueKind, Location};

/// Result of rewriting every occurrence of one component in a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Open tags found and renamed.
    pub count: usize,
    /// Closing tags renamed.
    pub closed: usize,
    pub edits: Vec<Edit>,
    /// Malformed tags that were skipped.
    pub warnings: Vec<Issue>,
    /// Regions of the input that changed, for [`Origin::push_pass`].
    pub splices: Vec<Splice>,
}

/// Rename every `<tag ...>` to `<new_tag ...>`, passing each attribute span
/// through `transform` in source order, and rename the closing tags that
/// belong to them.
///
/// `transform` receives the attribute text with any self-closing tail
/// (trailing whitespace and `/`) already split off; the tail is re-attached
/// verbatim. Tags whose `>` cannot be found are left untouched, together with
/// their closing tags, and reported in [`Rewrite::warnings`]. Locations are
/// resolved through `origin`.
pub fn rewrite_all_occurrences<F>(
    source: &str,
    tag: &str,
    new_tag: &str,
    origin: &Origin<'_>,
    mut transform: F,
) -> Rewrite
where
    F: FnMut(&str, &Location) -> String,
{
    let found: Vec<_> = TagScanner::new(source, tag).collect();
    let closing = paired_closing_tags(source, tag, &found);
    let mut rewrite = Rewrite {
        closed: closing.len(),
        ..Rewrite::default()
    };
    let mut replacements: Vec<(Range<usize>, String)> = Vec::new();

    for result in &found {
        let open = match result {
            Ok(open) => open,
            Err(err) => {
                let location = origin.locate(err.offset);
                warn!(%location, "skipping tag: {}", err.message);
                rewrite.warnings.push(Issue::new(
                    IssueKind::MalformedTag,
                    location,
                    format!("{}; occurrence left untouched", err.message),
                ));
                continue;
            }
        };

        let location = origin.locate(open.start);
        let (head, tail) = split_tail(&source[open.attrs.clone()]);

        let mut replaced = String::with_capacity(open.end - open.start + 16);
        replaced.push('<');
        replaced.push_str(new_tag);
        replaced.push_str(&transform(head, &location));
        replaced.push_str(tail);
        replaced.push('>');

        let original = &source[open.start..open.end];
        if replaced != original {
            debug!(%location, "rewrote <{tag}>");
            rewrite.edits.push(Edit {
                line: location.line,
                before: original.to_string(),
                after: replaced.clone(),
            });
        }

        replacements.push((open.start..open.end, replaced));
        rewrite.count += 1;
    }

    let closing_tag = format!("</{new_tag}>");
    replacements.extend(closing.into_iter().map(|range| (range, closing_tag.clone())));
    replacements.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (range, text) in replacements {
        out.push_str(&source[cursor..range.start]);
        if text != source[range.clone()] {
            rewrite.splices.push(Splice {
                input: range.clone(),
                output_len: text.len(),
            });
        }
        out.push_str(&text);
        cursor = range.end;
    }

    out.push_str(&source[cursor..]);
    rewrite.text = out;
    rewrite
}

/// Closing tags that close an element opened by a bounded tag, paired by
/// nesting. Closing tags of skipped occurrences, unmatched ones and any that
/// sit inside a bounded attribute span are left out.
fn paired_closing_tags(
    source: &str,
    tag: &str,
    opens: &[Result<OpenTag, BoundaryError>],
) -> Vec<Range<usize>> {
    // (start, end, Some(renamed) when the tag opens an element)
    let mut events = opens
        .iter()
        .map(|open| match open {
            Ok(open) => {
                let self_closing = source[open.attrs.clone()].trim_end().ends_with('/');
                (open.start, open.end, (!self_closing).then_some(true))
            }
            Err(err) => (err.offset, err.offset, Some(false)),
        })
        .peekable();

    let mut stack = Vec::new();
    let mut span_end = 0;
    let mut paired = Vec::new();

    for closing in find_closing_tags(source, tag) {
        while let Some((_, end, opens_element)) =
            events.next_if(|(start, _, _)| *start < closing.start)
        {
            span_end = end;
            if let Some(renamed) = opens_element {
                stack.push(renamed);
            }
        }
        if closing.start < span_end {
            continue;
        }
        if stack.pop() == Some(true) {
            paired.push(closing);
        }
    }

    paired
}

/// Split an attribute span into the part to tokenize and its self-closing
/// tail: trailing whitespace, plus a final `/` and whatever precedes it.
fn split_tail(attrs: &str) -> (&str, &str) {
    let trimmed = attrs.trim_end();
    let cut = if trimmed.ends_with('/') {
        trimmed.len() - 1
    } else {
        trimmed.len()
    };
    attrs.split_at(cut)
}

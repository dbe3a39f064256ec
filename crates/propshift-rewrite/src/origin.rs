//! Mapping offsets in rewritten text back to the file as it was read.
//!
//! A migration runs several passes over a file's text (one per component
//! rule, then one per import edit). Each pass reports the regions it
//! replaced; [`Origin`] walks those back so issue and edit positions always
//! name lines of the original file.

use std::ops::Range;

use propshift_parser::LineIndex;

use crate::Location;

/// One replaced region of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// Replaced bytes of the pass's input.
    pub input: Range<usize>,
    /// Length of the text that replaced them.
    pub output_len: usize,
}

impl Splice {
    /// The single region where `after` differs from `before`, widened to
    /// start at a line start so a removed line is not matched against the
    /// first characters of the line that followed it.
    pub fn between(before: &str, after: &str) -> Option<Splice> {
        if before == after {
            return None;
        }
        let common = before
            .bytes()
            .zip(after.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        let prefix = before.as_bytes()[..common]
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |i| i + 1);
        let max_suffix = before.len().min(after.len()) - prefix;
        let suffix = before
            .bytes()
            .rev()
            .zip(after.bytes().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();
        Some(Splice {
            input: prefix..before.len() - suffix,
            output_len: after.len() - prefix - suffix,
        })
    }
}

/// Resolves offsets in the current text of a migration to locations in the
/// original source.
pub struct Origin<'a> {
    file: &'a str,
    index: LineIndex<'a>,
    passes: Vec<Vec<Splice>>,
}

impl<'a> Origin<'a> {
    pub fn new(file: &'a str, source: &'a str) -> Self {
        Self {
            file,
            index: LineIndex::new(source),
            passes: Vec::new(),
        }
    }

    /// Record a pass. `splices` are sorted and disjoint; offsets given to
    /// [`Origin::locate`] afterwards refer to the pass's output.
    pub fn push_pass(&mut self, splices: Vec<Splice>) {
        if !splices.is_empty() {
            self.passes.push(splices);
        }
    }

    /// Offset in the original source. Offsets inside a replaced region map
    /// into the region it replaced, clamped to its end.
    pub fn original_offset(&self, offset: usize) -> usize {
        self.passes
            .iter()
            .rev()
            .fold(offset, |offset, pass| map_back(pass, offset))
    }

    pub fn locate(&self, offset: usize) -> Location {
        let position = self.index.position(self.original_offset(offset));
        Location::new(self.file, position.line, position.column)
    }
}

fn map_back(splices: &[Splice], offset: usize) -> usize {
    // Ends of the last splice passed, in input and output coordinates.
    let mut input_end = 0;
    let mut output_end = 0;

    for splice in splices {
        let output_start = output_end + (splice.input.start - input_end);
        if offset < output_start {
            break;
        }
        let within = offset - output_start;
        if within < splice.output_len {
            return splice.input.start + within.min(splice.input.len());
        }
        input_end = splice.input.end;
        output_end = output_start + splice.output_len;
    }

    input_end + (offset - output_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_splice_between() {
        assert_eq!(Splice::between("abc", "abc"), None);
        assert_eq!(
            Splice::between("a\nb\nc\n", "a\nc\n"),
            Some(Splice {
                input: 2..4,
                output_len: 0,
            })
        );
        assert_eq!(
            Splice::between("ab", "aXYb"),
            Some(Splice {
                input: 0..1,
                output_len: 3,
            })
        );
        assert_eq!(
            Splice::between("import { A } from 'a'\nimport { B } from 'b'\n", "import { B } from 'b'\n"),
            Some(Splice {
                input: 0..22,
                output_len: 0,
            })
        );
    }

    #[test]
    fn test_offsets_map_across_shrinking_pass() {
        // "0123456789" with 2..6 replaced by "x" gives "01x6789".
        let splices = vec![Splice {
            input: 2..6,
            output_len: 1,
        }];
        assert_eq!(map_back(&splices, 1), 1);
        assert_eq!(map_back(&splices, 2), 2);
        assert_eq!(map_back(&splices, 3), 6);
        assert_eq!(map_back(&splices, 6), 9);
    }

    #[test]
    fn test_offset_inside_growing_region_is_clamped() {
        let splices = vec![Splice {
            input: 2..3,
            output_len: 4,
        }];
        assert_eq!(map_back(&splices, 4), 3);
        assert_eq!(map_back(&splices, 6), 3);
        assert_eq!(map_back(&splices, 7), 4);
    }

    #[test]
    fn test_locations_survive_removed_lines() {
        let source = "a\nb\nc\nd\n";
        let mut origin = Origin::new("f.jsx", source);
        // first pass drops line "b\n", second drops line "a\n"
        origin.push_pass(vec![Splice::between(source, "a\nc\nd\n").unwrap()]);
        origin.push_pass(vec![Splice::between("a\nc\nd\n", "c\nd\n").unwrap()]);
        // "d" sits at offset 2 of the final text
        assert_eq!(origin.locate(2), Location::new("f.jsx", 4, 1));
        assert_eq!(origin.locate(0), Location::new("f.jsx", 3, 1));
    }
}

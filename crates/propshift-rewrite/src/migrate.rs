//! Whole-file migration pipeline.

use std::ops::Range;

use propshift_lexer::AttributeList;
use propshift_parser::find_named_import;
use tracing::debug;

use crate::colors::ColorMapping;
use crate::config::{ComponentRule, ImportRule, MigrationConfig};
use crate::imports::{ensure_named_import, remove_named_import};
use crate::mapper::map_color_attributes;
use crate::occurrences::rewrite_all_occurrences;
use crate::origin::{Origin, Splice};
use crate::{Edit, Issue, IssueKind, Location};

/// Result of migrating one file's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub text: String,
    pub changed: bool,
    /// Open tags rewritten, across all component rules.
    pub occurrences: usize,
    /// Sorted by position.
    pub issues: Vec<Issue>,
    pub edits: Vec<Edit>,
}

/// Apply every component rule of `config` to `source`.
///
/// Tags are rewritten first, rule by rule, in source order; import edits run
/// last. Issue and edit positions always refer to `source`, whatever earlier
/// passes did to the text. `file` labels issue locations.
pub fn migrate_source(source: &str, file: &str, config: &MigrationConfig) -> MigrationOutcome {
    let mut outcome = MigrationOutcome {
        text: source.to_string(),
        ..MigrationOutcome::default()
    };
    let mut origin = Origin::new(file, source);
    let mut import_rules = Vec::new();

    for rule in &config.components {
        if !outcome.text.contains(rule.from.as_str()) {
            continue;
        }

        let mut issues = Vec::new();
        let rewrite = rewrite_all_occurrences(&outcome.text, &rule.from, &rule.to, &origin, |attrs, location| {
            rewrite_attributes(attrs, rule, &config.colors, &mut issues, location)
        });
        debug!(file, from = %rule.from, open = rewrite.count, closed = rewrite.closed, "rewrote tags");

        origin.push_pass(rewrite.splices);
        outcome.text = rewrite.text;
        outcome.occurrences += rewrite.count;
        outcome.issues.extend(rewrite.warnings);
        outcome.issues.extend(issues);
        outcome.edits.extend(rewrite.edits);

        if let Some(imports) = &rule.imports {
            if rewrite.count > 0 {
                import_rules.push((rule, imports));
            }
        }
    }

    for (rule, imports) in import_rules {
        migrate_imports(&mut outcome, &mut origin, rule, imports);
    }

    outcome
        .issues
        .sort_by_key(|issue| (issue.location.line, issue.location.column));
    outcome.changed = outcome.text != source;
    outcome
}

/// Prop renames, then color mapping, over one attribute span.
fn rewrite_attributes(
    attrs: &str,
    rule: &ComponentRule,
    colors: &ColorMapping,
    issues: &mut Vec<Issue>,
    location: &Location,
) -> String {
    let mut list = AttributeList::parse(attrs);
    for (from, to) in &rule.props {
        list.rename(from, to);
    }
    if rule.map_colors {
        map_color_attributes(&mut list, colors, issues, location);
    }
    list.serialize()
}

fn migrate_imports(
    outcome: &mut MigrationOutcome,
    origin: &mut Origin<'_>,
    rule: &ComponentRule,
    imports: &ImportRule,
) {
    if let Some(legacy) = find_named_import(&outcome.text, &imports.source) {
        if legacy.contains(&rule.from) {
            if is_referenced(&outcome.text, &rule.from, legacy.range.clone()) {
                outcome.issues.push(Issue::new(
                    IssueKind::StillReferenced,
                    origin.locate(legacy.range.start),
                    format!(
                        "`{}` is still referenced; kept its import from `{}`",
                        rule.from, imports.source
                    ),
                ));
            } else {
                let text = remove_named_import(&outcome.text, &imports.source, &rule.from);
                record_import_edit(outcome, origin, text, &imports.source);
            }
        }
    }

    let text = ensure_named_import(&outcome.text, &imports.target, &rule.to);
    record_import_edit(outcome, origin, text, &imports.target);
}

/// Replace the outcome text and note the changed statement of `module`.
///
/// The edit's line is where the statement stood, or for a new statement, the
/// original line it was inserted after.
fn record_import_edit(
    outcome: &mut MigrationOutcome,
    origin: &mut Origin<'_>,
    text: String,
    module: &str,
) {
    let Some(splice) = Splice::between(&outcome.text, &text) else {
        return;
    };
    let statement = |source: &str| {
        find_named_import(source, module).map(|i| (i.range.start, source[i.range].to_string()))
    };
    let before = statement(&outcome.text);
    let before_line = before.as_ref().map(|(start, _)| origin.locate(*start).line);

    origin.push_pass(vec![splice]);
    let after = statement(&text);
    let line = before_line
        .or_else(|| after.as_ref().map(|(start, _)| origin.locate(*start).line))
        .unwrap_or(1);

    outcome.edits.push(Edit {
        line,
        before: before.map(|(_, s)| s).unwrap_or_default(),
        after: after.map(|(_, s)| s).unwrap_or_default(),
    });
    outcome.text = text;
}

/// Whether `name` appears as a whole identifier outside `skip`.
fn is_referenced(text: &str, name: &str, skip: Range<usize>) -> bool {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    text.match_indices(name).any(|(start, _)| {
        let end = start + name.len();
        !skip.contains(&start)
            && !text[..start].chars().next_back().is_some_and(is_ident)
            && !text[end..].chars().next().is_some_and(is_ident)
    })
}

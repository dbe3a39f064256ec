//! Human-readable run summary.

use std::fmt::Write;

use propshift_rewrite::Edit;

use crate::process::FileReport;

/// Counts over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub scanned: usize,
    pub changed: usize,
    pub failed: usize,
    pub issues: usize,
}

impl Summary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Summary {
            scanned: reports.len(),
            ..Summary::default()
        };
        for report in reports {
            match &report.result {
                Ok(outcome) => {
                    summary.changed += usize::from(outcome.changed);
                    summary.issues += outcome.issues.len();
                }
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Render the report printed on stdout.
///
/// `applied` selects "changed" over "would change"; `previews` adds the
/// before/after lines of every edit.
pub fn render(reports: &[FileReport], applied: bool, previews: bool) -> String {
    let verb = if applied { "changed" } else { "would change" };
    let mut out = String::new();

    for report in reports {
        let outcome = match &report.result {
            Ok(outcome) => outcome,
            Err(err) => {
                let _ = writeln!(out, "error: {err}");
                continue;
            }
        };
        if !outcome.changed {
            continue;
        }
        let _ = writeln!(
            out,
            "{verb}: {} ({} {})",
            report.label,
            outcome.occurrences,
            plural(outcome.occurrences, "occurrence")
        );
        if previews {
            for edit in &outcome.edits {
                write_edit(&mut out, &report.label, edit);
            }
        }
    }

    let summary = Summary::from_reports(reports);
    let _ = writeln!(
        out,
        "{} {} scanned, {} {verb}, {} failed",
        summary.scanned,
        plural(summary.scanned, "file"),
        summary.changed,
        summary.failed
    );

    for report in reports {
        if let Ok(outcome) = &report.result {
            for issue in &outcome.issues {
                let _ = writeln!(out, "{issue}");
            }
        }
    }
    out
}

fn write_edit(out: &mut String, label: &str, edit: &Edit) {
    let _ = writeln!(out, "--- {label}:{}", edit.line);
    for line in edit.before.lines() {
        let _ = writeln!(out, "- {line}");
    }
    for line in edit.after.lines() {
        let _ = writeln!(out, "+ {line}");
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

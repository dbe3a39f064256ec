//! ES module import statements.
//!
//! Only the shapes the migrator edits are understood: `import { A, B } from 'm'`
//! (optionally with a default import in front and a trailing semicolon), plus
//! enough of every other `import` form to know where the import block ends.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Any top-level import statement, named or side-effect only.
static IMPORT_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^import(?:\s*|[\s{][^;]*?\bfrom\s*)(?P<quote>['"])[^'"\n]*['"](?P<semi>[ \t]*;)?"#,
    )
    .expect("import statement pattern is valid")
});

/// A `import [Default,] { ... } from 'module'` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImport {
    /// The whole statement, leading indentation and semicolon included.
    pub range: Range<usize>,
    /// Default import binding, e.g. `React` in `import React, { useState } ...`.
    pub default: Option<String>,
    /// Entries of the brace list, trimmed, in source order.
    pub names: Vec<String>,
    /// The brace list contained a newline.
    pub multiline: bool,
    /// Indentation of the first entry of a multi-line list.
    pub indent: String,
    pub quote: char,
    pub semicolon: bool,
}

impl NamedImport {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Render this statement for `module` with `names` as its brace list,
    /// keeping the original layout style.
    pub fn render(&self, module: &str, names: &[String]) -> String {
        let semi = if self.semicolon { ";" } else { "" };
        let q = self.quote;
        let default = self.default.as_deref();

        if names.is_empty() {
            return match default {
                Some(default) => format!("import {default} from {q}{module}{q}{semi}"),
                None => String::new(),
            };
        }

        let prefix = match default {
            Some(default) => format!("import {default}, "),
            None => "import ".to_string(),
        };

        if self.multiline {
            let body: String = names
                .iter()
                .map(|n| format!("{}{n},\n", self.indent))
                .collect();
            format!("{prefix}{{\n{body}}} from {q}{module}{q}{semi}")
        } else {
            format!("{prefix}{{ {} }} from {q}{module}{q}{semi}", names.join(", "))
        }
    }
}

/// Location and style of any import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSite {
    pub range: Range<usize>,
    pub quote: char,
    pub semicolon: bool,
}

/// Find the first named import from `module`.
pub fn find_named_import(source: &str, module: &str) -> Option<NamedImport> {
    let pattern = format!(
        r#"(?m)^[ \t]*import\s+(?:(?P<default>[A-Za-z_$][\w$]*)\s*,\s*)?\{{(?P<names>[^}}]*)\}}\s*from\s*(?P<quote>['"]){}['"](?P<semi>[ \t]*;)?"#,
        regex::escape(module)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(source)?;

    let whole = caps.get(0)?;
    let names_text = caps.name("names").map_or("", |m| m.as_str());
    let names = names_text
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    Some(NamedImport {
        range: whole.range(),
        default: caps.name("default").map(|m| m.as_str().to_string()),
        names,
        multiline: names_text.contains('\n'),
        indent: list_indent(names_text),
        quote: quote_of(&caps),
        semicolon: caps.name("semi").is_some(),
    })
}

/// Every top-level import statement, in source order.
pub fn import_sites(source: &str) -> Vec<ImportSite> {
    IMPORT_STATEMENT
        .captures_iter(source)
        .filter_map(|caps| {
            Some(ImportSite {
                range: caps.get(0)?.range(),
                quote: quote_of(&caps),
                semicolon: caps.name("semi").is_some(),
            })
        })
        .collect()
}

fn quote_of(caps: &regex::Captures<'_>) -> char {
    match caps.name("quote").map(|m| m.as_str()) {
        Some("\"") => '"',
        _ => '\'',
    }
}

/// Leading whitespace of the first non-blank line after the first newline.
fn list_indent(names_text: &str) -> String {
    names_text
        .lines()
        .skip(1)
        .find(|line| !line.trim().is_empty())
        .map(|line| {
            line.chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect()
        })
        .unwrap_or_else(|| "  ".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Named imports
    // =========================================================================

    #[test]
    fn test_single_line_named_import() {
        let source = "import { CButton, CCard } from '@coreui/react';\nconst x = 1;\n";
        let import = find_named_import(source, "@coreui/react").unwrap();
        assert_eq!(import.range, 0..47);
        assert_eq!(import.names, vec!["CButton", "CCard"]);
        assert!(!import.multiline);
        assert!(import.semicolon);
        assert_eq!(import.quote, '\'');
        assert_eq!(import.default, None);
    }

    #[test]
    fn test_multiline_named_import() {
        let source = "import {\n    CButton,\n    CCard,\n} from \"@coreui/react\"\n";
        let import = find_named_import(source, "@coreui/react").unwrap();
        assert_eq!(import.names, vec!["CButton", "CCard"]);
        assert!(import.multiline);
        assert_eq!(import.indent, "    ");
        assert_eq!(import.quote, '"');
        assert!(!import.semicolon);
        assert_eq!(&source[import.range.clone()], source.trim_end());
    }

    #[test]
    fn test_default_and_named() {
        let source = "import React, { useState } from 'react'\n";
        let import = find_named_import(source, "react").unwrap();
        assert_eq!(import.default.as_deref(), Some("React"));
        assert_eq!(import.names, vec!["useState"]);
    }

    #[test]
    fn test_other_module_not_matched() {
        let source = "import { CButton } from '@coreui/react-pro'\n";
        assert!(find_named_import(source, "@coreui/react").is_none());
    }

    #[test]
    fn test_render_keeps_layout() {
        let source = "import {\n  A,\n  B,\n} from 'm';";
        let import = find_named_import(source, "m").unwrap();
        assert_eq!(
            import.render("m", &["A".to_string()]),
            "import {\n  A,\n} from 'm';"
        );
        let source = "import React, { A, B } from \"m\"";
        let import = find_named_import(source, "m").unwrap();
        assert_eq!(
            import.render("m", &["B".to_string()]),
            "import React, { B } from \"m\""
        );
        assert_eq!(import.render("m", &[]), "import React from \"m\"");
    }

    // =========================================================================
    // Import sites
    // =========================================================================

    #[test]
    fn test_import_sites() {
        let source = "import './styles.css'\nimport React from 'react';\nimport {\n  A,\n} from \"a\"\n\nexport default 1;\n";
        let sites = import_sites(source);
        assert_eq!(sites.len(), 3);
        assert_eq!(&source[sites[0].range.clone()], "import './styles.css'");
        assert_eq!(&source[sites[1].range.clone()], "import React from 'react';");
        assert!(sites[1].semicolon);
        assert_eq!(&source[sites[2].range.clone()], "import {\n  A,\n} from \"a\"");
        assert_eq!(sites[2].quote, '"');
    }

    #[test]
    fn test_dynamic_import_is_not_a_site() {
        let source = "import('./lazy').then(m => m.default)\n";
        assert!(import_sites(source).is_empty());
    }
}

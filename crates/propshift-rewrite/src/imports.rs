//! Import statement edits.

use propshift_parser::{find_named_import, import_sites};

/// Remove `name` from the named import of `module`.
///
/// When the brace list becomes empty the statement is deleted together with
/// one trailing line break (a default import, if any, is kept). Otherwise the
/// statement is rebuilt in its original single- or multi-line layout.
pub fn remove_named_import(source: &str, module: &str, name: &str) -> String {
    let Some(import) = find_named_import(source, module) else {
        return source.to_string();
    };
    if !import.contains(name) {
        return source.to_string();
    }

    let names: Vec<String> = import
        .names
        .iter()
        .filter(|n| n.as_str() != name)
        .cloned()
        .collect();
    let rendered = import.render(module, &names);

    let mut end = import.range.end;
    if rendered.is_empty() {
        let rest = &source[end..];
        if rest.starts_with("\r\n") {
            end += 2;
        } else if rest.starts_with('\n') {
            end += 1;
        }
    }

    let mut out = String::with_capacity(source.len());
    out.push_str(&source[..import.range.start]);
    out.push_str(&rendered);
    out.push_str(&source[end..]);
    out
}

/// Make sure `name` is imported from `module`.
///
/// An existing named import of `module` gets `name` appended in its own
/// layout. Without one, a single-line statement is added after the last
/// import (copying its quote and semicolon style), or at the top of the file.
pub fn ensure_named_import(source: &str, module: &str, name: &str) -> String {
    if let Some(import) = find_named_import(source, module) {
        if import.contains(name) {
            return source.to_string();
        }
        let mut names = import.names.clone();
        names.push(name.to_string());
        let mut out = String::with_capacity(source.len() + name.len() + 2);
        out.push_str(&source[..import.range.start]);
        out.push_str(&import.render(module, &names));
        out.push_str(&source[import.range.end..]);
        return out;
    }

    let sites = import_sites(source);
    match sites.last() {
        Some(last) => {
            let q = last.quote;
            let semi = if last.semicolon { ";" } else { "" };
            let statement = format!("import {{ {name} }} from {q}{module}{q}{semi}");
            let at = last.range.end;
            format!("{}\n{statement}{}", &source[..at], &source[at..])
        }
        None => {
            let gap = if source.starts_with('\n') || source.starts_with("\r\n") {
                "\n"
            } else {
                "\n\n"
            };
            format!("import {{ {name} }} from '{module}'{gap}{source}")
        }
    }
}

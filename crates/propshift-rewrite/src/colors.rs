//! Legacy color vocabulary → `variant` + `colorScheme`.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

/// Built-in tables, shared read-only by every migration that does not
/// override them.
pub static DEFAULT_COLORS: Lazy<ColorMapping> = Lazy::new(ColorMapping::builtin);

const BASE_COLORS: &[(&str, &str)] = &[
    ("primary", "brand"),
    ("secondary", "slate"),
    ("success", "green"),
    ("danger", "red"),
    ("warning", "yellow"),
    ("info", "blue"),
    ("light", "gray"),
    ("dark", "gray"),
];

const OUTLINE_COLORS: &[&str] = &["primary", "secondary", "success", "danger", "warning", "info"];

const STYLE_COLORS: &[(&str, &str, &str)] = &[("ghost", "ghost", "brand"), ("light", "outline", "gray")];

/// A style variant paired with a color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyledScheme {
    pub variant: String,
    pub scheme: String,
}

impl StyledScheme {
    pub fn new(variant: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            scheme: scheme.into(),
        }
    }
}

/// What a legacy `color` value resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Variant implied by the color, if any.
    pub variant: Option<String>,
    pub scheme: String,
}

/// Lookup tables for the color migration.
///
/// Keys are matched against trimmed, lower-cased values. Precedence when a
/// value could match several tables: `compound` (and `style_prefixes`), then
/// `style_colors`, then `base`, then `fallback_scheme`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorMapping {
    /// Single color name → scheme.
    pub base: BTreeMap<String, String>,
    /// Combined style+color value (`outline-danger`) → variant and scheme.
    pub compound: BTreeMap<String, StyledScheme>,
    /// Style names that may prefix a base color (`outline` in `outline-x`).
    pub style_prefixes: Vec<String>,
    /// Color-only values that imply a style (`ghost`). Never consulted for
    /// `variant` values.
    pub style_colors: BTreeMap<String, StyledScheme>,
    pub fallback_scheme: String,
}

impl Default for ColorMapping {
    fn default() -> Self {
        DEFAULT_COLORS.clone()
    }
}

impl ColorMapping {
    fn builtin() -> Self {
        let base = BASE_COLORS
            .iter()
            .map(|(color, scheme)| (color.to_string(), scheme.to_string()))
            .collect::<BTreeMap<_, _>>();
        let compound = OUTLINE_COLORS
            .iter()
            .map(|color| {
                let scheme = base.get(*color).cloned().unwrap_or_default();
                (format!("outline-{color}"), StyledScheme::new("outline", scheme))
            })
            .collect();
        let style_colors = STYLE_COLORS
            .iter()
            .map(|(color, variant, scheme)| (color.to_string(), StyledScheme::new(*variant, *scheme)))
            .collect();

        Self {
            base,
            compound,
            style_prefixes: vec!["outline".to_string()],
            style_colors,
            fallback_scheme: "brand".to_string(),
        }
    }

    fn key(value: &str) -> String {
        value.trim().to_lowercase()
    }

    /// Look a combined style+color value up: an exact compound entry first,
    /// then `<prefix>-<color>` for each configured style prefix.
    pub fn compound(&self, value: &str) -> Option<StyledScheme> {
        let key = Self::key(value);
        if let Some(styled) = self.compound.get(&key) {
            return Some(styled.clone());
        }
        self.style_prefixes.iter().find_map(|prefix| {
            let color = key.strip_prefix(prefix.as_str())?.strip_prefix('-')?;
            if color.is_empty() {
                return None;
            }
            let scheme = self.base.get(color).unwrap_or(&self.fallback_scheme);
            Some(StyledScheme::new(prefix.clone(), scheme.clone()))
        })
    }

    /// Resolve a literal `color` value. Always yields a scheme.
    pub fn resolve_color(&self, value: &str) -> Resolution {
        let key = Self::key(value);
        if let Some(styled) = self
            .compound(&key)
            .or_else(|| self.style_colors.get(&key).cloned())
        {
            return Resolution {
                variant: Some(styled.variant),
                scheme: styled.scheme,
            };
        }
        Resolution {
            variant: None,
            scheme: self
                .base
                .get(&key)
                .unwrap_or(&self.fallback_scheme)
                .clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolved(variant: Option<&str>, scheme: &str) -> Resolution {
        Resolution {
            variant: variant.map(str::to_string),
            scheme: scheme.to_string(),
        }
    }

    #[test]
    fn test_base_colors() {
        let colors = ColorMapping::default();
        assert_eq!(colors.resolve_color("primary"), resolved(None, "brand"));
        assert_eq!(colors.resolve_color("danger"), resolved(None, "red"));
        assert_eq!(colors.resolve_color("dark"), resolved(None, "gray"));
    }

    #[test]
    fn test_compound_beats_base() {
        let colors = ColorMapping::default();
        assert_eq!(
            colors.resolve_color("outline-danger"),
            resolved(Some("outline"), "red")
        );
        // `light` is both a base color and a style color.
        assert_eq!(colors.resolve_color("light"), resolved(Some("outline"), "gray"));
        assert_eq!(colors.resolve_color("ghost"), resolved(Some("ghost"), "brand"));
    }

    #[test]
    fn test_style_prefix_with_unknown_color() {
        let colors = ColorMapping::default();
        assert_eq!(
            colors.resolve_color("outline-dark"),
            resolved(Some("outline"), "gray")
        );
        assert_eq!(
            colors.resolve_color("outline-purple"),
            resolved(Some("outline"), "brand")
        );
        assert_eq!(colors.compound("outline"), None);
        assert_eq!(colors.compound("outline-"), None);
    }

    #[test]
    fn test_keys_are_normalized() {
        let colors = ColorMapping::default();
        assert_eq!(colors.resolve_color(" Primary "), resolved(None, "brand"));
        assert_eq!(
            colors.compound("OUTLINE-INFO"),
            Some(StyledScheme::new("outline", "blue"))
        );
    }

    #[test]
    fn test_unknown_color_falls_back() {
        let colors = ColorMapping::default();
        assert_eq!(colors.resolve_color("chartreuse"), resolved(None, "brand"));
    }

    #[test]
    fn test_style_colors_are_not_compound() {
        let colors = ColorMapping::default();
        assert_eq!(colors.compound("ghost"), None);
    }

    #[test]
    fn test_partial_override_keeps_other_tables() {
        let colors: ColorMapping = toml::from_str(
            r#"
            fallback_scheme = "gray"

            [base]
            primary = "blue"
            "#,
        )
        .unwrap();
        assert_eq!(colors.resolve_color("primary"), resolved(None, "blue"));
        assert_eq!(colors.resolve_color("danger"), resolved(None, "gray"));
        assert_eq!(
            colors.resolve_color("outline-danger"),
            resolved(Some("outline"), "red")
        );
    }
}

//! Legacy `color`/`variant` props → `variant` + `colorScheme`.

use propshift_lexer::{AttrValue, Attribute, AttributeList};
use tracing::debug;

use crate::colors::ColorMapping;
use crate::{Issue, IssueKind, Location};

/// Rewrite the color props of one tag occurrence in place.
///
/// - A literal `variant` matching the compound table is split into its style
///   (kept as `variant`) and scheme.
/// - A literal `color` is resolved, removed, and its information moved to
///   `variant` and `colorScheme`. A `variant` already resolved from the
///   compound table is never overwritten by one implied by `color`.
/// - A `color={...}` expression is left untouched and recorded as an issue;
///   nothing else is changed for that occurrence. A scheme taken from a
///   compound `variant` is named in that issue rather than applied.
/// - `color` written as a bare word or without a value is dropped.
pub fn map_color_attributes(
    list: &mut AttributeList,
    colors: &ColorMapping,
    issues: &mut Vec<Issue>,
    location: &Location,
) {
    let mut scheme_hint = None;
    let mut variant_from_compound = false;

    if let Some(variant) = list.get_mut("variant") {
        match &variant.value {
            AttrValue::Literal { value, .. } => {
                if let Some(styled) = colors.compound(value) {
                    variant.set_literal(styled.variant);
                    scheme_hint = Some(styled.scheme);
                    variant_from_compound = true;
                }
            }
            AttrValue::Expression(expr) => {
                issues.push(Issue::new(
                    IssueKind::UnresolvedValue,
                    location.clone(),
                    format!("variant expression `{{{expr}}}` requires manual mapping"),
                ));
            }
            _ => {}
        }
    }

    let mut desired_variant = None;
    let mut scheme = None;
    let mut color_slot = None;

    if let Some(index) = list.find("color") {
        let value = list
            .attribute(index)
            .map(|attr| attr.value.clone())
            .unwrap_or(AttrValue::Boolean);
        match value {
            AttrValue::Literal { value, .. } => {
                let resolution = colors.resolve_color(&value);
                debug!(%location, color = %value, scheme = %resolution.scheme, "resolved color");
                desired_variant = resolution.variant;
                scheme = Some(resolution.scheme);
                list.remove(index);
                color_slot = Some(index);
            }
            AttrValue::Expression(expr) => {
                let mut message = format!("color expression `{{{expr}}}` requires manual mapping");
                if let Some(hint) = &scheme_hint {
                    message.push_str(&format!("; colorScheme `{hint}` from variant not applied"));
                }
                issues.push(Issue::new(IssueKind::UnresolvedValue, location.clone(), message));
                list.normalize_separation();
                return;
            }
            AttrValue::BareWord(_) | AttrValue::Boolean => {
                list.remove(index);
                list.collapse_whitespace_at(index);
            }
        }
    }

    let mut pending = Vec::new();

    if let Some(variant) = desired_variant {
        match list.find("variant") {
            None => pending.push(Attribute::literal("variant", variant)),
            Some(index) if !variant_from_compound => {
                if let Some(attr) = list.attribute_mut(index) {
                    if matches!(attr.value, AttrValue::Literal { .. }) {
                        attr.set_literal(variant);
                    }
                }
            }
            Some(_) => {}
        }
    }

    if let Some(scheme) = scheme.or(scheme_hint) {
        match list.get_mut("colorScheme") {
            Some(attr) => match &attr.value {
                AttrValue::Expression(expr) => {
                    issues.push(Issue::new(
                        IssueKind::UnresolvedValue,
                        location.clone(),
                        format!("colorScheme expression `{{{expr}}}` kept; resolved scheme `{scheme}` not applied"),
                    ));
                }
                _ => attr.set_literal(scheme),
            },
            None => pending.push(Attribute::literal("colorScheme", scheme)),
        }
    }

    if pending.is_empty() {
        if let Some(slot) = color_slot {
            list.collapse_whitespace_at(slot);
        }
    } else {
        let index = color_slot
            .or_else(|| list.find("variant").map(|i| i + 1))
            .unwrap_or(list.len());
        list.insert_at(index, pending);
    }

    list.normalize_separation();
}

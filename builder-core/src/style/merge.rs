//! Final style resolution for rendering.

use serde_json::Value;

use super::declarations::{kebab_to_camel, parse_declaration_block};
use super::params::{StructuredParams, BORDER_PROPERTIES};
use super::project::owned_declarations;
use crate::document::DeviceMode;
use crate::node::{ComponentNode, StyleMap};

/// Style entries produced by the structured controls.
#[must_use]
pub fn params_to_style(params: &StructuredParams) -> StyleMap {
    owned_declarations(params)
        .into_iter()
        .flat_map(|owned| owned.emit)
        .map(|(property, value)| (kebab_to_camel(property), Value::String(value)))
        .collect()
}

/// Layer base style, structured parameters and custom CSS, in increasing
/// precedence, then resolve shorthand/longhand conflicts.
#[must_use]
pub fn merge_styles(base: &StyleMap, params: &StructuredParams, custom_css: &str) -> StyleMap {
    let mut out = base.clone();
    out.extend(params_to_style(params));
    out.extend(
        parse_declaration_block(custom_css)
            .into_iter()
            .map(|(key, value)| (key, Value::String(value))),
    );
    normalize_style_conflicts(&mut out);
    out
}

/// Drop the `border` shorthand when any side or side longhand is present.
pub fn normalize_style_conflicts(style: &mut StyleMap) {
    const SIDES: [&str; 4] = ["borderTop", "borderRight", "borderBottom", "borderLeft"];
    let has_side = BORDER_PROPERTIES
        .iter()
        .filter(|key| SIDES.iter().any(|side| key.starts_with(side)))
        .any(|key| style.contains_key(*key));
    if has_side {
        style.remove("border");
    }
}

/// The style a node renders with on `mode`: the responsive cascade, then
/// its structured parameters and custom CSS.
#[must_use]
pub fn resolve_node_style(node: &ComponentNode, mode: DeviceMode) -> StyleMap {
    merge_styles(
        &node.style.resolved(mode),
        &StructuredParams::from_props(&node.props),
        node.custom_css(),
    )
}

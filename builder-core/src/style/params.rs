//! Structured style parameters edited through the property panel.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::declarations::{parse_declaration_block, CssMap};
use super::extract::{
    border_from, box_shadow_from, filter_from, opacity_from, split_number_unit, text_shadow_from,
    transform_from, z_index_from, BorderValues, BoxShadowValues, FilterValues, TextShadowValues,
    TransformValues,
};
use crate::node::PropMap;

/// Every camelCase property that contributes to a border.
pub(crate) const BORDER_PROPERTIES: [&str; 20] = [
    "border",
    "borderWidth",
    "borderStyle",
    "borderColor",
    "borderTop",
    "borderRight",
    "borderBottom",
    "borderLeft",
    "borderTopWidth",
    "borderTopStyle",
    "borderTopColor",
    "borderRightWidth",
    "borderRightStyle",
    "borderRightColor",
    "borderBottomWidth",
    "borderBottomStyle",
    "borderBottomColor",
    "borderLeftWidth",
    "borderLeftStyle",
    "borderLeftColor",
];

/// Props keys the structured parameters are stored under.
pub const PARAM_KEYS: [&str; 45] = [
    "fontFamily",
    "fontSize",
    "fontSizeUnit",
    "fontWeight",
    "lineHeight",
    "letterSpacing",
    "textAlign",
    "textTransform",
    "textDecoration",
    "color",
    "opacity",
    "zIndex",
    "transform",
    "filter",
    "border",
    "boxShadow",
    "textShadow",
    "margin",
    "marginTop",
    "marginRight",
    "marginBottom",
    "marginLeft",
    "padding",
    "paddingTop",
    "paddingRight",
    "paddingBottom",
    "paddingLeft",
    "width",
    "height",
    "minWidth",
    "minHeight",
    "maxWidth",
    "maxHeight",
    "backgroundColor",
    "borderRadius",
    "borderTopLeftRadius",
    "borderTopRightRadius",
    "borderBottomRightRadius",
    "borderBottomLeftRadius",
    "display",
    "position",
    "flexDirection",
    "justifyContent",
    "alignItems",
    "gap",
];

/// Values behind the structured style controls.
///
/// `None` means the control is not in use and the CSS it would own is left
/// alone. A value equal to the control's default means the declaration is
/// omitted. Stored in a node's props under the camelCase field names.
///
/// Spacing, min/max sizing, corner radii and `gap` are pixel numbers; CSS
/// in other units stays in the CSS box. When any side of `margin`,
/// `padding` or `border_radius` is set, the sides win over the shorthand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct StructuredParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Unit for `font_size`; `px` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    /// Pixels. Non-px values are left in CSS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Percent, 0-100. CSS carries it as 0-1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<BoxShadowValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<TextShadowValues>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,

    /// Any CSS length (`320px`, `100%`, `auto`). A number in props means px.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Same rules as `width`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top_left_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top_right_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom_right_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom_left_radius: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
}

fn field<T: DeserializeOwned>(props: &PropMap, key: &str) -> Option<T> {
    props
        .get(key)
        .filter(|v| !v.is_null())
        .and_then(|v| T::deserialize(v).ok())
}

/// Strings and numbers are both accepted (`fontWeight: 700`).
fn text_field(props: &PropMap, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like [`text_field`], but a bare number is a pixel length.
fn length_field(props: &PropMap, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format!("{n}px")),
        _ => None,
    }
}

impl StructuredParams {
    /// Read the parameters out of a node's props. Fields with the wrong
    /// shape are treated as unset.
    #[must_use]
    pub fn from_props(props: &PropMap) -> Self {
        Self {
            font_family: text_field(props, "fontFamily"),
            font_size: field(props, "fontSize"),
            font_size_unit: text_field(props, "fontSizeUnit"),
            font_weight: text_field(props, "fontWeight"),
            line_height: text_field(props, "lineHeight"),
            letter_spacing: field(props, "letterSpacing"),
            text_align: text_field(props, "textAlign"),
            text_transform: text_field(props, "textTransform"),
            text_decoration: text_field(props, "textDecoration"),
            color: text_field(props, "color"),
            opacity: field(props, "opacity"),
            z_index: field(props, "zIndex"),
            transform: field(props, "transform"),
            filter: field(props, "filter"),
            border: field(props, "border"),
            box_shadow: field(props, "boxShadow"),
            text_shadow: field(props, "textShadow"),
            margin: field(props, "margin"),
            margin_top: field(props, "marginTop"),
            margin_right: field(props, "marginRight"),
            margin_bottom: field(props, "marginBottom"),
            margin_left: field(props, "marginLeft"),
            padding: field(props, "padding"),
            padding_top: field(props, "paddingTop"),
            padding_right: field(props, "paddingRight"),
            padding_bottom: field(props, "paddingBottom"),
            padding_left: field(props, "paddingLeft"),
            width: length_field(props, "width"),
            height: length_field(props, "height"),
            min_width: field(props, "minWidth"),
            min_height: field(props, "minHeight"),
            max_width: field(props, "maxWidth"),
            max_height: field(props, "maxHeight"),
            background_color: text_field(props, "backgroundColor"),
            border_radius: field(props, "borderRadius"),
            border_top_left_radius: field(props, "borderTopLeftRadius"),
            border_top_right_radius: field(props, "borderTopRightRadius"),
            border_bottom_right_radius: field(props, "borderBottomRightRadius"),
            border_bottom_left_radius: field(props, "borderBottomLeftRadius"),
            display: text_field(props, "display"),
            position: text_field(props, "position"),
            flex_direction: text_field(props, "flexDirection"),
            justify_content: text_field(props, "justifyContent"),
            align_items: text_field(props, "alignItems"),
            gap: field(props, "gap"),
        }
    }

    /// Mirror these parameters into `props`: set fields are written, unset
    /// ones removed. Keys that are not parameters are left alone.
    pub fn write_props(&self, props: &mut PropMap) {
        for key in PARAM_KEYS {
            props.remove(key);
        }
        if let Ok(Value::Object(fields)) = serde_json::to_value(self) {
            props.extend(fields);
        }
    }

    /// These parameters with every set field of `overlay` applied on top.
    #[must_use]
    pub fn merged_with(&self, overlay: &Self) -> Self {
        let mut props = PropMap::new();
        self.write_props(&mut props);
        if let Ok(Value::Object(fields)) = serde_json::to_value(overlay) {
            props.extend(fields);
        }
        Self::from_props(&props)
    }

    /// Whether no control is in use.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn font_weight_number(value: &str) -> String {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => "400".to_string(),
        "bold" => "700".to_string(),
        "lighter" => "300".to_string(),
        "bolder" => "800".to_string(),
        other => other.to_string(),
    }
}

/// `12px` or a bare `12`. Other units and multi-value shorthands give
/// `None`.
fn pixels(value: &str) -> Option<f64> {
    split_number_unit(value)
        .filter(|(_, unit)| unit.is_empty() || unit == "px")
        .map(|(n, _)| n)
}

fn text(map: &CssMap, key: &str) -> Option<String> {
    map.get(key).map(|v| v.trim().to_string())
}

/// A property present in the CSS takes over its slot: the extracted value
/// when it is understood, otherwise `None` so the raw CSS is left alone.
fn take<T>(map: &CssMap, keys: &[&str], slot: &mut Option<T>, extracted: Option<T>) {
    if keys.iter().any(|key| map.contains_key(*key)) {
        *slot = extracted;
    }
}

/// Read structured parameters back out of hand-edited CSS.
///
/// Values found in `text` replace those in `current`; everything else is
/// kept. Opacity is converted from 0-1 to percent and a font size's unit
/// goes to `font_size_unit`. Values the controls cannot represent (a
/// `letter-spacing` in rem, `padding: 1rem 2rem`, an unknown transform)
/// release their control so the CSS stays authoritative.
#[must_use]
pub fn sync_css_to_parameters(text_css: &str, current: &StructuredParams) -> StructuredParams {
    let map = parse_declaration_block(text_css);
    let mut params = current.clone();

    if let Some(value) = map.get("fontSize") {
        match split_number_unit(value) {
            Some((size, unit)) => {
                params.font_size = Some(size);
                params.font_size_unit = Some(if unit.is_empty() { "px".to_string() } else { unit });
            }
            None => {
                params.font_size = None;
                params.font_size_unit = None;
            }
        }
    }
    if let Some(value) = map.get("letterSpacing") {
        params.letter_spacing = split_number_unit(value)
            .filter(|(n, unit)| unit == "px" || (unit.is_empty() && n.abs() < f64::EPSILON))
            .map(|(n, _)| n);
    }
    if let Some(weight) = map.get("fontWeight") {
        params.font_weight = Some(font_weight_number(weight));
    }

    for (key, slot) in [
        ("fontFamily", &mut params.font_family),
        ("lineHeight", &mut params.line_height),
        ("textAlign", &mut params.text_align),
        ("textTransform", &mut params.text_transform),
        ("textDecoration", &mut params.text_decoration),
        ("color", &mut params.color),
        ("backgroundColor", &mut params.background_color),
        ("width", &mut params.width),
        ("height", &mut params.height),
        ("display", &mut params.display),
        ("position", &mut params.position),
        ("flexDirection", &mut params.flex_direction),
        ("justifyContent", &mut params.justify_content),
        ("alignItems", &mut params.align_items),
    ] {
        if let Some(value) = text(&map, key) {
            *slot = Some(value);
        }
    }

    for (key, slot) in [
        ("margin", &mut params.margin),
        ("marginTop", &mut params.margin_top),
        ("marginRight", &mut params.margin_right),
        ("marginBottom", &mut params.margin_bottom),
        ("marginLeft", &mut params.margin_left),
        ("padding", &mut params.padding),
        ("paddingTop", &mut params.padding_top),
        ("paddingRight", &mut params.padding_right),
        ("paddingBottom", &mut params.padding_bottom),
        ("paddingLeft", &mut params.padding_left),
        ("minWidth", &mut params.min_width),
        ("minHeight", &mut params.min_height),
        ("maxWidth", &mut params.max_width),
        ("maxHeight", &mut params.max_height),
        ("borderRadius", &mut params.border_radius),
        ("borderTopLeftRadius", &mut params.border_top_left_radius),
        ("borderTopRightRadius", &mut params.border_top_right_radius),
        ("borderBottomRightRadius", &mut params.border_bottom_right_radius),
        ("borderBottomLeftRadius", &mut params.border_bottom_left_radius),
        ("gap", &mut params.gap),
    ] {
        if let Some(value) = map.get(key) {
            *slot = pixels(value);
        }
    }

    take(
        &map,
        &["opacity"],
        &mut params.opacity,
        opacity_from(&map).map(|o| (o.clamp(0.0, 1.0) * 100.0).round()),
    );
    take(&map, &["zIndex"], &mut params.z_index, z_index_from(&map));
    take(&map, &["transform"], &mut params.transform, transform_from(&map));
    take(&map, &["filter"], &mut params.filter, filter_from(&map));
    take(&map, &BORDER_PROPERTIES, &mut params.border, border_from(&map));
    take(&map, &["boxShadow"], &mut params.box_shadow, box_shadow_from(&map));
    take(&map, &["textShadow"], &mut params.text_shadow, text_shadow_from(&map));

    params
}

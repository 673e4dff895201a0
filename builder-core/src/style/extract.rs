//! Structured values pulled out of free-form CSS.
//!
//! Every extractor returns `None` when its source property is missing, is
//! `none`, or holds nothing it understands.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::declarations::{parse_declaration_block, CssMap};

/// Default colour for a box shadow written without one.
pub const DEFAULT_BOX_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.1)";
/// Default colour for a text shadow written without one.
pub const DEFAULT_TEXT_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.5)";
/// Border style used when a shorthand names none.
pub const DEFAULT_BORDER_STYLE: &str = "solid";
/// Border colour used when a shorthand names none.
pub const DEFAULT_BORDER_COLOR: &str = "#000000";

const BORDER_STYLES: [&str; 10] = [
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

static LEADING_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").ok());
static NUMBER_UNIT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+))\s*([a-zA-Z%]*)\s*$").ok());
static FUNCTION_CALL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z-]+)\(([^()]*)\)").ok());
static BORDER_WIDTH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?(px|rem|em|pt)?$").ok());
static BOX_SHADOW: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let n = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:px|rem|em)?";
    Regex::new(&format!(
        r"^({n})\s+({n})(?:\s+({n}))?(?:\s+({n}))?\s*(.*)$"
    ))
    .ok()
});
static TEXT_SHADOW: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let n = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:px|rem|em)?";
    Regex::new(&format!(r"^({n})\s+({n})(?:\s+({n}))?\s*(.*)$")).ok()
});

/// Components of a `transform` value. Angles are in degrees, translations
/// in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformValues {
    /// `translateX`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    /// `translateY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    /// Horizontal scale factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    /// Vertical scale factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    /// `rotate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    /// `skewX`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f64>,
    /// `skewY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f64>,
}

impl TransformValues {
    /// Whether no component was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Components of a `filter` value. Ratios are percentages
/// (`brightness(1.2)` reads as 120).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct FilterValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue_rotate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sepia: Option<f64>,
}

impl FilterValues {
    /// Whether no function was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One side of a border.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderSide {
    /// Width in the value's own unit (usually px).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Border style keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Colour, unvalidated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BorderSide {
    /// Whether nothing was set on this side.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.style.is_none() && self.color.is_none()
    }

    /// Width, defaulting to 0.
    #[must_use]
    pub fn width_or_default(&self) -> f64 {
        self.width.unwrap_or(0.0)
    }

    /// Style, defaulting to `solid`.
    #[must_use]
    pub fn style_or_default(&self) -> &str {
        self.style.as_deref().unwrap_or(DEFAULT_BORDER_STYLE)
    }

    /// Colour, defaulting to black.
    #[must_use]
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_BORDER_COLOR)
    }
}

/// Per-side border values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct BorderValues {
    pub top: BorderSide,
    pub right: BorderSide,
    pub bottom: BorderSide,
    pub left: BorderSide,
}

impl BorderValues {
    /// Sides in top, right, bottom, left order.
    #[must_use]
    pub fn sides(&self) -> [(&'static str, &BorderSide); 4] {
        [
            ("top", &self.top),
            ("right", &self.right),
            ("bottom", &self.bottom),
            ("left", &self.left),
        ]
    }

    fn sides_mut(&mut self) -> [&mut BorderSide; 4] {
        [
            &mut self.top,
            &mut self.right,
            &mut self.bottom,
            &mut self.left,
        ]
    }

    /// Whether no side has anything set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sides().iter().all(|(_, side)| side.is_empty())
    }
}

/// First layer of a `box-shadow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BoxShadowValues {
    pub x: f64,
    pub y: f64,
    pub blur: f64,
    pub spread: f64,
    pub color: String,
    pub inset: bool,
}

/// First layer of a `text-shadow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TextShadowValues {
    pub x: f64,
    pub y: f64,
    pub blur: f64,
    pub color: String,
}

/// Typography properties found in a declaration block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TypographyValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<String>,
}

/// Everything the extractors understood in one block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ParsedCssProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<BoxShadowValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<TextShadowValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographyValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

/// Transform components of a block.
///
/// `scale` is applied before `scaleX`/`scaleY` regardless of source order,
/// so per-axis values always override the uniform one.
#[must_use]
pub fn extract_transform(text: &str) -> Option<TransformValues> {
    transform_from(&parse_declaration_block(text))
}

/// Filter functions of a block.
#[must_use]
pub fn extract_filter(text: &str) -> Option<FilterValues> {
    filter_from(&parse_declaration_block(text))
}

/// Per-side border values of a block.
///
/// Sources apply in a fixed order, later ones winning: `border`, then
/// `border-width`/`-style`/`-color`, then side shorthands, then side
/// longhands.
#[must_use]
pub fn extract_border(text: &str) -> Option<BorderValues> {
    border_from(&parse_declaration_block(text))
}

/// First `box-shadow` layer of a block.
#[must_use]
pub fn extract_box_shadow(text: &str) -> Option<BoxShadowValues> {
    box_shadow_from(&parse_declaration_block(text))
}

/// First `text-shadow` layer of a block.
#[must_use]
pub fn extract_text_shadow(text: &str) -> Option<TextShadowValues> {
    text_shadow_from(&parse_declaration_block(text))
}

/// Typography properties of a block.
#[must_use]
pub fn extract_typography(text: &str) -> Option<TypographyValues> {
    typography_from(&parse_declaration_block(text))
}

/// `opacity` as a 0-1 number.
#[must_use]
pub fn extract_opacity(text: &str) -> Option<f64> {
    opacity_from(&parse_declaration_block(text))
}

/// `z-index` as an integer.
#[must_use]
pub fn extract_z_index(text: &str) -> Option<i64> {
    z_index_from(&parse_declaration_block(text))
}

/// Run every extractor over one parse of the block.
#[must_use]
pub fn parse_all_properties(text: &str) -> ParsedCssProperties {
    let map = parse_declaration_block(text);
    ParsedCssProperties {
        border: border_from(&map),
        box_shadow: box_shadow_from(&map),
        text_shadow: text_shadow_from(&map),
        transform: transform_from(&map),
        filter: filter_from(&map),
        typography: typography_from(&map),
        opacity: opacity_from(&map),
        z_index: z_index_from(&map),
    }
}

pub(crate) fn lookup<'a>(map: &'a CssMap, key: &str) -> Option<&'a str> {
    map.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("none"))
}

/// Leading number of a value, the way `parseFloat` reads it.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    LEADING_NUMBER
        .as_ref()?
        .captures(value)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
        .filter(|n: &f64| n.is_finite())
}

/// `"1.5rem"` -> `(1.5, "rem")`. The whole value must be a number and unit.
pub(crate) fn split_number_unit(value: &str) -> Option<(f64, String)> {
    let caps = NUMBER_UNIT.as_ref()?.captures(value)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2).map_or("", |m| m.as_str()).to_ascii_lowercase();
    Some((number, unit))
}

/// Whitespace-separated tokens, keeping parenthesised groups whole.
pub(crate) fn split_tokens(value: &str) -> Vec<&str> {
    split_top_level(value, char::is_whitespace)
}

fn split_top_level(value: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 && is_separator(c) {
            if let Some(s) = start.take() {
                tokens.push(&value[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&value[s..]);
    }
    tokens
}

fn function_calls(value: &str) -> Vec<(&str, Vec<&str>)> {
    let Some(re) = FUNCTION_CALL.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(value)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let args = caps
                .get(2)?
                .as_str()
                .split(',')
                .flat_map(|arg| arg.split_whitespace())
                .collect();
            Some((name, args))
        })
        .collect()
}

fn angle_degrees(arg: &str) -> Option<f64> {
    let (n, unit) = split_number_unit(arg)?;
    match unit.as_str() {
        "" | "deg" => Some(n),
        "rad" => Some(n.to_degrees()),
        "turn" => Some(n * 360.0),
        "grad" => Some(n * 0.9),
        _ => None,
    }
}

fn percentage(arg: &str) -> Option<f64> {
    let (n, unit) = split_number_unit(arg)?;
    match unit.as_str() {
        "%" => Some(n),
        "" => Some(n * 100.0),
        _ => None,
    }
}

pub(crate) fn transform_from(map: &CssMap) -> Option<TransformValues> {
    let value = lookup(map, "transform")?;
    let mut out = TransformValues::default();
    let mut uniform = None;
    let (mut axis_x, mut axis_y) = (None, None);

    for (name, args) in function_calls(value) {
        let first = args.first().copied();
        let second = args.get(1).copied();
        match name {
            "translateX" => out.translate_x = first.and_then(parse_number),
            "translateY" => out.translate_y = first.and_then(parse_number),
            "translate" => {
                out.translate_x = first.and_then(parse_number);
                out.translate_y = second.and_then(parse_number).or(Some(0.0));
            }
            "scale" => {
                if let Some(x) = first.and_then(parse_number) {
                    uniform = Some((x, second.and_then(parse_number).unwrap_or(x)));
                }
            }
            "scaleX" => axis_x = first.and_then(parse_number),
            "scaleY" => axis_y = first.and_then(parse_number),
            "rotate" | "rotateZ" => out.rotate = first.and_then(angle_degrees),
            "skewX" => out.skew_x = first.and_then(angle_degrees),
            "skewY" => out.skew_y = first.and_then(angle_degrees),
            "skew" => {
                out.skew_x = first.and_then(angle_degrees);
                out.skew_y = second.and_then(angle_degrees);
            }
            _ => {}
        }
    }

    if let Some((x, y)) = uniform {
        out.scale_x = Some(x);
        out.scale_y = Some(y);
    }
    out.scale_x = axis_x.or(out.scale_x);
    out.scale_y = axis_y.or(out.scale_y);

    (!out.is_empty()).then_some(out)
}

pub(crate) fn filter_from(map: &CssMap) -> Option<FilterValues> {
    let value = lookup(map, "filter")?;
    let mut out = FilterValues::default();
    for (name, args) in function_calls(value) {
        let Some(arg) = args.first().copied() else {
            continue;
        };
        match name {
            "blur" => out.blur = parse_number(arg),
            "brightness" => out.brightness = percentage(arg),
            "contrast" => out.contrast = percentage(arg),
            "grayscale" => out.grayscale = percentage(arg),
            "hue-rotate" => out.hue_rotate = angle_degrees(arg),
            "invert" => out.invert = percentage(arg),
            "saturate" => out.saturate = percentage(arg),
            "sepia" => out.sepia = percentage(arg),
            _ => {}
        }
    }
    (!out.is_empty()).then_some(out)
}

fn parse_border_width(token: &str) -> Option<f64> {
    match token {
        "thin" => Some(1.0),
        "medium" => Some(3.0),
        "thick" => Some(5.0),
        _ if BORDER_WIDTH.as_ref()?.is_match(token) => parse_number(token),
        _ => None,
    }
}

fn is_border_style(token: &str) -> bool {
    BORDER_STYLES.contains(&token.to_ascii_lowercase().as_str())
}

/// `"2px dashed rgb(0, 0, 0)"` -> a fully populated side. Missing parts
/// take the defaults; `none` yields `None`.
pub(crate) fn parse_border_shorthand(value: &str) -> Option<BorderSide> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return None;
    }
    let mut width = None;
    let mut style = None;
    let mut color = Vec::new();
    for token in split_tokens(value) {
        if width.is_none() {
            if let Some(w) = parse_border_width(token) {
                width = Some(w);
                continue;
            }
        }
        if style.is_none() && is_border_style(token) {
            style = Some(token.to_ascii_lowercase());
            continue;
        }
        color.push(token);
    }
    Some(BorderSide {
        width: Some(width.unwrap_or(0.0)),
        style: Some(style.unwrap_or_else(|| DEFAULT_BORDER_STYLE.to_string())),
        color: Some(if color.is_empty() {
            DEFAULT_BORDER_COLOR.to_string()
        } else {
            color.join(" ")
        }),
    })
}

/// Expand a 1-4 value box shorthand to top, right, bottom, left.
fn box_values(value: &str) -> Option<[&str; 4]> {
    let tokens = split_tokens(value);
    match *tokens.as_slice() {
        [] => None,
        [a] => Some([a, a, a, a]),
        [a, b] => Some([a, b, a, b]),
        [a, b, c] => Some([a, b, c, b]),
        [a, b, c, d, ..] => Some([a, b, c, d]),
    }
}

pub(crate) fn border_from(map: &CssMap) -> Option<BorderValues> {
    let mut out = BorderValues::default();

    if let Some(side) = map.get("border").and_then(|v| parse_border_shorthand(v)) {
        for target in out.sides_mut() {
            *target = side.clone();
        }
    }

    if let Some(values) = map.get("borderWidth").and_then(|v| box_values(v)) {
        for (target, token) in out.sides_mut().into_iter().zip(values) {
            if let Some(w) = parse_border_width(token) {
                target.width = Some(w);
            }
        }
    }
    if let Some(values) = map.get("borderStyle").and_then(|v| box_values(v)) {
        for (target, token) in out.sides_mut().into_iter().zip(values) {
            target.style = Some(token.to_ascii_lowercase());
        }
    }
    if let Some(values) = map.get("borderColor").and_then(|v| box_values(v)) {
        for (target, token) in out.sides_mut().into_iter().zip(values) {
            target.color = Some(token.to_string());
        }
    }

    let names = ["Top", "Right", "Bottom", "Left"];
    for (target, name) in out.sides_mut().into_iter().zip(names) {
        if let Some(side) = map
            .get(&format!("border{name}"))
            .and_then(|v| parse_border_shorthand(v))
        {
            *target = side;
        }
    }
    for (target, name) in out.sides_mut().into_iter().zip(names) {
        if let Some(w) = map
            .get(&format!("border{name}Width"))
            .and_then(|v| parse_border_width(v.trim()).or_else(|| parse_number(v)))
        {
            target.width = Some(w);
        }
        if let Some(s) = map.get(&format!("border{name}Style")) {
            target.style = Some(s.trim().to_ascii_lowercase());
        }
        if let Some(c) = map.get(&format!("border{name}Color")) {
            target.color = Some(c.trim().to_string());
        }
    }

    (!out.is_empty()).then_some(out)
}

fn first_layer(value: &str) -> &str {
    split_top_level(value, |c| c == ',')
        .first()
        .map_or("", |layer| layer.trim())
}

pub(crate) fn box_shadow_from(map: &CssMap) -> Option<BoxShadowValues> {
    let layer = first_layer(lookup(map, "boxShadow")?);
    let inset = layer.contains("inset");
    let layer = layer.replacen("inset", "", 1);
    let caps = BOX_SHADOW.as_ref()?.captures(layer.trim())?;
    let number = |i| caps.get(i).and_then(|m| parse_number(m.as_str()));
    let color = caps.get(5).map_or("", |m| m.as_str().trim());
    Some(BoxShadowValues {
        x: number(1)?,
        y: number(2)?,
        blur: number(3).unwrap_or(0.0),
        spread: number(4).unwrap_or(0.0),
        color: if color.is_empty() {
            DEFAULT_BOX_SHADOW_COLOR.to_string()
        } else {
            color.to_string()
        },
        inset,
    })
}

pub(crate) fn text_shadow_from(map: &CssMap) -> Option<TextShadowValues> {
    let layer = first_layer(lookup(map, "textShadow")?);
    let caps = TEXT_SHADOW.as_ref()?.captures(layer)?;
    let number = |i| caps.get(i).and_then(|m| parse_number(m.as_str()));
    let color = caps.get(4).map_or("", |m| m.as_str().trim());
    Some(TextShadowValues {
        x: number(1)?,
        y: number(2)?,
        blur: number(3).unwrap_or(0.0),
        color: if color.is_empty() {
            DEFAULT_TEXT_SHADOW_COLOR.to_string()
        } else {
            color.to_string()
        },
    })
}

pub(crate) fn typography_from(map: &CssMap) -> Option<TypographyValues> {
    let text = |key: &str| map.get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let out = TypographyValues {
        font_family: text("fontFamily"),
        font_size: map.get("fontSize").and_then(|v| parse_number(v)),
        font_weight: text("fontWeight"),
        line_height: text("lineHeight"),
        letter_spacing: map.get("letterSpacing").and_then(|v| parse_number(v)),
        text_decoration: text("textDecoration"),
        text_transform: text("textTransform"),
    };
    (out != TypographyValues::default()).then_some(out)
}

pub(crate) fn opacity_from(map: &CssMap) -> Option<f64> {
    map.get("opacity").and_then(|v| parse_number(v))
}

pub(crate) fn z_index_from(map: &CssMap) -> Option<i64> {
    let value = map.get("zIndex")?.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    value[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_components() {
        let t = extract_transform("transform: translateX(10px) translateY(-5px) rotate(45deg)")
            .expect("transform");
        assert_eq!(t.translate_x, Some(10.0));
        assert_eq!(t.translate_y, Some(-5.0));
        assert_eq!(t.rotate, Some(45.0));
        assert_eq!(t.scale_x, None);
    }

    #[test]
    fn test_per_axis_scale_beats_uniform() {
        let t = extract_transform("transform: scaleX(2) scale(1.5)").expect("transform");
        assert_eq!(t.scale_x, Some(2.0));
        assert_eq!(t.scale_y, Some(1.5));

        let t = extract_transform("transform: scale(3)").expect("transform");
        assert_eq!((t.scale_x, t.scale_y), (Some(3.0), Some(3.0)));
    }

    #[test]
    fn test_transform_none_and_missing() {
        assert!(extract_transform("transform: none").is_none());
        assert!(extract_transform("color: red").is_none());
        assert!(extract_transform("transform: matrix(1, 0, 0, 1, 0, 0)").is_none());
    }

    #[test]
    fn test_rotate_units() {
        let t = extract_transform("transform: rotate(0.5turn)").expect("transform");
        assert_eq!(t.rotate, Some(180.0));
    }

    #[test]
    fn test_filter_functions() {
        let f = extract_filter("filter: blur(4px) brightness(120%) hue-rotate(90deg) grayscale(0.5)")
            .expect("filter");
        assert_eq!(f.blur, Some(4.0));
        assert_eq!(f.brightness, Some(120.0));
        assert_eq!(f.hue_rotate, Some(90.0));
        assert_eq!(f.grayscale, Some(50.0));
        assert_eq!(f.sepia, None);
        assert!(extract_filter("filter: none").is_none());
    }

    #[test]
    fn test_border_shorthand_tokens() {
        let side = parse_border_shorthand("2px dashed red").expect("side");
        assert_eq!(side.width, Some(2.0));
        assert_eq!(side.style.as_deref(), Some("dashed"));
        assert_eq!(side.color.as_deref(), Some("red"));

        let side = parse_border_shorthand("dotted").expect("side");
        assert_eq!(side.width, Some(0.0));
        assert_eq!(side.color.as_deref(), Some(DEFAULT_BORDER_COLOR));

        let side = parse_border_shorthand("1px solid rgb(0, 0, 0)").expect("side");
        assert_eq!(side.color.as_deref(), Some("rgb(0, 0, 0)"));

        assert!(parse_border_shorthand("none").is_none());
    }

    #[test]
    fn test_border_longhand_beats_shorthand() {
        let b = extract_border("border-top-color: blue; border: 1px solid red").expect("border");
        assert_eq!(b.top.color.as_deref(), Some("blue"));
        assert_eq!(b.right.color.as_deref(), Some("red"));
        assert_eq!(b.top.width, Some(1.0));
    }

    #[test]
    fn test_border_side_shorthand_beats_uniform_longhand() {
        let b = extract_border("border-left: 3px double green; border-width: 1px 2px").expect("border");
        assert_eq!(b.top.width, Some(1.0));
        assert_eq!(b.right.width, Some(2.0));
        assert_eq!(b.left.width, Some(3.0));
        assert_eq!(b.left.style.as_deref(), Some("double"));
    }

    #[test]
    fn test_box_shadow() {
        let s = extract_box_shadow("box-shadow: 0 4px 6px rgba(0, 0, 0, 0.2)").expect("shadow");
        assert_eq!((s.x, s.y, s.blur, s.spread), (0.0, 4.0, 6.0, 0.0));
        assert_eq!(s.color, "rgba(0, 0, 0, 0.2)");
        assert!(!s.inset);

        let s = extract_box_shadow("box-shadow: inset 1px 2px 3px 4px").expect("shadow");
        assert!(s.inset);
        assert_eq!(s.spread, 4.0);
        assert_eq!(s.color, DEFAULT_BOX_SHADOW_COLOR);

        assert!(extract_box_shadow("box-shadow: none").is_none());
    }

    #[test]
    fn test_text_shadow() {
        let s = extract_text_shadow("text-shadow: 1px 1px 2px black").expect("shadow");
        assert_eq!((s.x, s.y, s.blur), (1.0, 1.0, 2.0));
        assert_eq!(s.color, "black");

        let s = extract_text_shadow("text-shadow: 2px 3px").expect("shadow");
        assert_eq!(s.color, DEFAULT_TEXT_SHADOW_COLOR);
    }

    #[test]
    fn test_typography_and_scalars() {
        let all = parse_all_properties(
            "font-family: Inter, sans-serif; font-size: 18px; letter-spacing: 0.5px; opacity: 0.8; z-index: 10",
        );
        let typo = all.typography.expect("typography");
        assert_eq!(typo.font_family.as_deref(), Some("Inter, sans-serif"));
        assert_eq!(typo.font_size, Some(18.0));
        assert_eq!(typo.letter_spacing, Some(0.5));
        assert_eq!(all.opacity, Some(0.8));
        assert_eq!(all.z_index, Some(10));
        assert!(all.border.is_none());
    }

    #[test]
    fn test_z_index_reads_leading_integer() {
        assert_eq!(extract_z_index("z-index: -3"), Some(-3));
        assert_eq!(extract_z_index("z-index: auto"), None);
    }

    #[test]
    fn test_split_tokens_keeps_groups() {
        assert_eq!(
            split_tokens(" 1px  solid rgba(0, 0, 0, 0.5) "),
            vec!["1px", "solid", "rgba(0, 0, 0, 0.5)"]
        );
    }
}

//! Forward sync: structured parameters written into a CSS text blob.
//!
//! Each controlled parameter owns a fixed set of CSS properties. Owned
//! declarations are rewritten, appended or removed; every other byte of
//! the blob is kept as the user typed it.

use std::collections::HashSet;

use super::declarations::{kebab_to_camel, parse_segment, split_segments};
use super::extract::{BorderSide, BorderValues, FilterValues, TransformValues};
use super::params::StructuredParams;

/// The CSS a single parameter controls and what it currently wants there.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OwnedDeclarations {
    /// Kebab-case properties this parameter is responsible for.
    pub properties: &'static [&'static str],
    /// Declarations to write; empty when the parameter is at its default.
    pub emit: Vec<(&'static str, String)>,
}

const BORDER_KEBAB: [&str; 20] = [
    "border",
    "border-width",
    "border-style",
    "border-color",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
    "border-top-width",
    "border-top-style",
    "border-top-color",
    "border-right-width",
    "border-right-style",
    "border-right-color",
    "border-bottom-width",
    "border-bottom-style",
    "border-bottom-color",
    "border-left-width",
    "border-left-style",
    "border-left-color",
];

/// Shortest decimal form, at most three fractional digits.
pub(crate) fn format_number(n: f64) -> String {
    let rounded = (n * 1000.0).round() / 1000.0;
    format!("{}", rounded + 0.0)
}

fn differs(value: Option<f64>, default: f64) -> Option<f64> {
    value.filter(|v| (v - default).abs() > f64::EPSILON)
}

fn transform_value(t: &TransformValues) -> String {
    let mut parts = Vec::new();
    if let Some(x) = differs(t.translate_x, 0.0) {
        parts.push(format!("translateX({}px)", format_number(x)));
    }
    if let Some(y) = differs(t.translate_y, 0.0) {
        parts.push(format!("translateY({}px)", format_number(y)));
    }
    let (sx, sy) = (differs(t.scale_x, 1.0), differs(t.scale_y, 1.0));
    match (sx, sy) {
        (Some(x), Some(y)) if (x - y).abs() <= f64::EPSILON => {
            parts.push(format!("scale({})", format_number(x)));
        }
        _ => {
            if let Some(x) = sx {
                parts.push(format!("scaleX({})", format_number(x)));
            }
            if let Some(y) = sy {
                parts.push(format!("scaleY({})", format_number(y)));
            }
        }
    }
    if let Some(r) = differs(t.rotate, 0.0) {
        parts.push(format!("rotate({}deg)", format_number(r)));
    }
    if let Some(x) = differs(t.skew_x, 0.0) {
        parts.push(format!("skewX({}deg)", format_number(x)));
    }
    if let Some(y) = differs(t.skew_y, 0.0) {
        parts.push(format!("skewY({}deg)", format_number(y)));
    }
    parts.join(" ")
}

fn filter_value(f: &FilterValues) -> String {
    let functions = [
        ("blur", f.blur, 0.0, "px"),
        ("brightness", f.brightness, 100.0, "%"),
        ("contrast", f.contrast, 100.0, "%"),
        ("grayscale", f.grayscale, 0.0, "%"),
        ("hue-rotate", f.hue_rotate, 0.0, "deg"),
        ("invert", f.invert, 0.0, "%"),
        ("saturate", f.saturate, 100.0, "%"),
        ("sepia", f.sepia, 0.0, "%"),
    ];
    functions
        .into_iter()
        .filter_map(|(name, value, default, unit)| {
            differs(value, default).map(|v| format!("{name}({}{unit})", format_number(v)))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn side_value(side: &BorderSide) -> String {
    format!(
        "{}px {} {}",
        format_number(side.width_or_default()),
        side.style_or_default(),
        side.color_or_default()
    )
}

fn border_declarations(border: &BorderValues) -> Vec<(&'static str, String)> {
    let visible: Vec<_> = border
        .sides()
        .into_iter()
        .filter(|(_, side)| side.width_or_default() > 0.0)
        .map(|(name, side)| (name, side_value(side)))
        .collect();
    let uniform = visible.len() == 4 && visible.iter().all(|(_, v)| *v == visible[0].1);
    if uniform {
        return vec![("border", visible[0].1.clone())];
    }
    visible
        .into_iter()
        .map(|(name, value)| {
            let property = match name {
                "top" => "border-top",
                "right" => "border-right",
                "bottom" => "border-bottom",
                _ => "border-left",
            };
            (property, value)
        })
        .collect()
}

fn non_default_text(value: Option<&String>, default: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && Some(*v) != default)
        .map(str::to_string)
}

fn single(
    property: &'static str,
    properties: &'static [&'static str],
    value: Option<String>,
) -> OwnedDeclarations {
    OwnedDeclarations {
        properties,
        emit: value
            .filter(|v| !v.is_empty())
            .map(|v| vec![(property, v)])
            .unwrap_or_default(),
    }
}

fn pixels(value: f64) -> String {
    format!("{}px", format_number(value))
}

/// A shorthand and its four side longhands. Once any side is set every
/// side is written, falling back to the shorthand value, and the shorthand
/// declaration is dropped.
fn box_sides(
    out: &mut Vec<OwnedDeclarations>,
    shorthand: &'static [&'static str],
    general: Option<f64>,
    sides: [(&'static [&'static str], Option<f64>); 4],
) {
    if sides.iter().all(|(_, value)| value.is_none()) {
        if let Some(value) = general {
            out.push(single(shorthand[0], shorthand, Some(pixels(value))));
        }
        return;
    }
    for (properties, value) in sides {
        if let Some(value) = value.or(general) {
            out.push(single(properties[0], properties, Some(pixels(value))));
        }
    }
    if general.is_some() {
        out.push(OwnedDeclarations {
            properties: shorthand,
            emit: Vec::new(),
        });
    }
}

/// The declarations each controlled parameter owns, in output order.
pub(crate) fn owned_declarations(params: &StructuredParams) -> Vec<OwnedDeclarations> {
    let mut out = Vec::new();
    if let Some(size) = params.font_size {
        let unit = params.font_size_unit.as_deref().unwrap_or("px");
        out.push(single(
            "font-size",
            &["font-size"],
            Some(format!("{}{unit}", format_number(size))),
        ));
    }
    let texts: [(&'static [&'static str], &Option<String>, Option<&str>); 15] = [
        (&["font-family"], &params.font_family, None),
        (&["font-weight"], &params.font_weight, None),
        (&["line-height"], &params.line_height, None),
        (&["text-align"], &params.text_align, None),
        (&["text-transform"], &params.text_transform, Some("none")),
        (&["text-decoration"], &params.text_decoration, Some("none")),
        (&["color"], &params.color, None),
        (&["background-color"], &params.background_color, None),
        (&["width"], &params.width, None),
        (&["height"], &params.height, None),
        (&["display"], &params.display, None),
        (&["position"], &params.position, None),
        (&["flex-direction"], &params.flex_direction, None),
        (&["justify-content"], &params.justify_content, None),
        (&["align-items"], &params.align_items, None),
    ];
    for (properties, value, default) in texts {
        if value.is_some() {
            out.push(single(
                properties[0],
                properties,
                non_default_text(value.as_ref(), default),
            ));
        }
    }
    if params.letter_spacing.is_some() {
        out.push(single(
            "letter-spacing",
            &["letter-spacing"],
            differs(params.letter_spacing, 0.0).map(pixels),
        ));
    }
    if params.opacity.is_some() {
        out.push(single(
            "opacity",
            &["opacity"],
            differs(params.opacity, 100.0).map(|v| format_number(v.clamp(0.0, 100.0) / 100.0)),
        ));
    }
    box_sides(
        &mut out,
        &["margin"],
        params.margin,
        [
            (&["margin-top"], params.margin_top),
            (&["margin-right"], params.margin_right),
            (&["margin-bottom"], params.margin_bottom),
            (&["margin-left"], params.margin_left),
        ],
    );
    box_sides(
        &mut out,
        &["padding"],
        params.padding,
        [
            (&["padding-top"], params.padding_top),
            (&["padding-right"], params.padding_right),
            (&["padding-bottom"], params.padding_bottom),
            (&["padding-left"], params.padding_left),
        ],
    );
    box_sides(
        &mut out,
        &["border-radius"],
        params.border_radius,
        [
            (&["border-top-left-radius"], params.border_top_left_radius),
            (&["border-top-right-radius"], params.border_top_right_radius),
            (&["border-bottom-right-radius"], params.border_bottom_right_radius),
            (&["border-bottom-left-radius"], params.border_bottom_left_radius),
        ],
    );
    let lengths: [(&'static [&'static str], Option<f64>); 5] = [
        (&["min-width"], params.min_width),
        (&["min-height"], params.min_height),
        (&["max-width"], params.max_width),
        (&["max-height"], params.max_height),
        (&["gap"], params.gap),
    ];
    for (properties, value) in lengths {
        if let Some(value) = value {
            out.push(single(properties[0], properties, Some(pixels(value))));
        }
    }
    if let Some(z) = params.z_index {
        out.push(single("z-index", &["z-index"], Some(z.to_string())));
    }
    if let Some(transform) = &params.transform {
        out.push(single("transform", &["transform"], Some(transform_value(transform))));
    }
    if let Some(filter) = &params.filter {
        out.push(single("filter", &["filter"], Some(filter_value(filter))));
    }
    if let Some(border) = &params.border {
        out.push(OwnedDeclarations {
            properties: &BORDER_KEBAB,
            emit: border_declarations(border),
        });
    }
    if let Some(shadow) = &params.box_shadow {
        let zero = [shadow.x, shadow.y, shadow.blur, shadow.spread]
            .iter()
            .all(|v| v.abs() <= f64::EPSILON);
        let value = (!zero).then(|| {
            format!(
                "{}{}px {}px {}px {}px {}",
                if shadow.inset { "inset " } else { "" },
                format_number(shadow.x),
                format_number(shadow.y),
                format_number(shadow.blur),
                format_number(shadow.spread),
                shadow.color
            )
        });
        out.push(single("box-shadow", &["box-shadow"], value));
    }
    if let Some(shadow) = &params.text_shadow {
        let zero = [shadow.x, shadow.y, shadow.blur]
            .iter()
            .all(|v| v.abs() <= f64::EPSILON);
        let value = (!zero).then(|| {
            format!(
                "{}px {}px {}px {}",
                format_number(shadow.x),
                format_number(shadow.y),
                format_number(shadow.blur),
                shadow.color
            )
        });
        out.push(single("text-shadow", &["text-shadow"], value));
    }
    out
}

#[derive(Debug)]
struct Piece {
    raw: String,
    terminated: bool,
    open_comment: bool,
    property: Option<String>,
    value: Option<String>,
}

fn leading_whitespace(raw: &str) -> &str {
    &raw[..raw.len() - raw.trim_start().len()]
}

fn upsert(pieces: &mut Vec<Piece>, key: &str, property: &str, value: &str) {
    if let Some(first) = pieces
        .iter()
        .position(|p| p.property.as_deref() == Some(key))
    {
        let piece = &mut pieces[first];
        if piece.value.as_deref() != Some(value) {
            piece.raw = format!("{}{property}: {value}", leading_whitespace(&piece.raw));
            piece.value = Some(value.to_string());
        }
        let mut index = 0;
        pieces.retain(|p| {
            let keep = index <= first || p.property.as_deref() != Some(key);
            index += 1;
            keep
        });
        return;
    }

    // Trailing whitespace stays last, and nothing may land inside a comment
    // the user has not closed yet.
    let at = match pieces.last() {
        Some(last) if last.open_comment => pieces.len() - 1,
        Some(last) if !last.terminated && last.raw.trim().is_empty() => pieces.len() - 1,
        _ => pieces.len(),
    };
    let separator = if at == 0 { "" } else { "\n" };
    if let Some(previous) = at.checked_sub(1).and_then(|i| pieces.get_mut(i)) {
        previous.terminated = true;
    }
    pieces.insert(
        at,
        Piece {
            raw: format!("{separator}{property}: {value}"),
            terminated: true,
            open_comment: false,
            property: Some(key.to_string()),
            value: Some(value.to_string()),
        },
    );
}

/// Write `params` into `existing` CSS text.
///
/// Running the projection twice with the same parameters gives the same
/// text as running it once.
#[must_use]
pub fn project_parameters_to_css(params: &StructuredParams, existing: &str) -> String {
    let mut pieces: Vec<Piece> = split_segments(existing)
        .into_iter()
        .map(|segment| {
            let parsed = parse_segment(segment.raw);
            Piece {
                raw: segment.raw.to_string(),
                terminated: segment.terminated,
                open_comment: segment.open_comment,
                property: parsed.as_ref().map(|(p, _)| p.clone()),
                value: parsed.map(|(_, v)| v),
            }
        })
        .collect();

    for owned in owned_declarations(params) {
        let mut written = HashSet::new();
        for (property, value) in &owned.emit {
            let key = kebab_to_camel(property);
            upsert(&mut pieces, &key, property, value);
            written.insert(key);
        }
        for property in owned.properties {
            let key = kebab_to_camel(property);
            if !written.contains(&key) {
                pieces.retain(|p| p.property.as_deref() != Some(key.as_str()));
            }
        }
    }

    let mut out = String::with_capacity(existing.len() + 32);
    for piece in &pieces {
        out.push_str(&piece.raw);
        if piece.terminated {
            out.push(';');
        }
    }
    out
}

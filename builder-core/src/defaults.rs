//! Default style and props for freshly added components.

use serde_json::{json, Value};

use crate::node::{ComponentType, PropMap, StyleMap};

/// Initial style and props for a component type.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Base style layer.
    pub style: StyleMap,
    /// Props.
    pub props: PropMap,
}

fn object(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

/// The template a component type starts from when added to the canvas.
#[must_use]
pub fn template(component_type: ComponentType) -> Template {
    let (props, style) = match component_type {
        ComponentType::Button => (
            json!({ "text": "Click Me", "variant": "default" }),
            json!({
                "padding": "0.5rem 1rem",
                "backgroundColor": "#000000",
                "color": "#ffffff",
                "borderRadius": "0.375rem",
                "cursor": "pointer",
                "border": "none",
                "fontSize": "0.875rem",
                "fontWeight": "500",
            }),
        ),
        ComponentType::Text => (
            json!({ "text": "Edit this text" }),
            json!({ "fontSize": "1rem", "lineHeight": "1.5", "color": "#000000" }),
        ),
        ComponentType::Heading => (
            json!({ "text": "Heading", "variant": "h2" }),
            json!({
                "fontSize": "1.875rem",
                "fontWeight": "700",
                "lineHeight": "1.2",
                "color": "#000000",
                "marginBottom": "1rem",
            }),
        ),
        ComponentType::Image => (
            json!({
                "src": "https://via.placeholder.com/400x300",
                "alt": "Placeholder image",
            }),
            json!({ "width": "100%", "height": "auto", "borderRadius": "0.5rem" }),
        ),
        ComponentType::Container => (
            json!({}),
            json!({
                "display": "flex",
                "flexDirection": "column",
                "gap": "1rem",
                "padding": "1rem",
                "border": "1px dashed #e2e8f0",
                "borderRadius": "0.5rem",
                "minHeight": "100px",
            }),
        ),
        ComponentType::Section => (
            json!({}),
            json!({
                "display": "flex",
                "flexDirection": "column",
                "padding": "2rem",
                "backgroundColor": "#ffffff",
                "minHeight": "200px",
            }),
        ),
        ComponentType::Grid => (
            json!({}),
            json!({
                "display": "grid",
                "gridTemplateColumns": "repeat(3, 1fr)",
                "gap": "1rem",
                "padding": "1rem",
                "minHeight": "150px",
            }),
        ),
        ComponentType::Card => (
            json!({}),
            json!({
                "backgroundColor": "#ffffff",
                "border": "1px solid #e2e8f0",
                "borderRadius": "0.5rem",
                "padding": "1.5rem",
                "boxShadow": "0 1px 3px 0 rgb(0 0 0 / 0.1)",
            }),
        ),
        ComponentType::Input => (
            json!({ "type": "text", "placeholder": "Enter text..." }),
            json!({
                "width": "100%",
                "padding": "0.5rem",
                "border": "1px solid #e2e8f0",
                "borderRadius": "0.375rem",
                "fontSize": "0.875rem",
            }),
        ),
        ComponentType::Form => (
            json!({}),
            json!({
                "display": "flex",
                "flexDirection": "column",
                "gap": "1rem",
                "padding": "1rem",
                "minHeight": "150px",
            }),
        ),
    };

    Template {
        style: object(style),
        props: object(props),
    }
}

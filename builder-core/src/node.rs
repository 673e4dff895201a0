//! Component nodes - the building blocks of a page.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::defaults;
use crate::document::DeviceMode;

/// Map of camelCase CSS property names to values.
pub type StyleMap = Map<String, Value>;

/// Open-ended bag of named component parameters.
pub type PropMap = Map<String, Value>;

/// Props key holding the raw, user-edited CSS text blob.
pub const CUSTOM_CSS_KEY: &str = "customCSS";

/// Unique identifier for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(Uuid);

impl ComponentId {
    /// Create a new unique component ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ComponentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of visual component a node renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    /// Full-width page section.
    Section,
    /// Generic flex container.
    Container,
    /// CSS grid container.
    Grid,
    /// Card with border and shadow.
    Card,
    /// Form wrapper.
    Form,
    /// Paragraph text.
    Text,
    /// Heading (h1-h6 via the `variant` prop).
    Heading,
    /// Image.
    Image,
    /// Button.
    Button,
    /// Form input.
    Input,
}

impl ComponentType {
    /// Every component type, in palette order.
    pub const ALL: [Self; 10] = [
        Self::Section,
        Self::Container,
        Self::Grid,
        Self::Card,
        Self::Form,
        Self::Text,
        Self::Heading,
        Self::Image,
        Self::Button,
        Self::Input,
    ];

    /// Whether nodes of this type may own children.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Section | Self::Container | Self::Grid | Self::Card | Self::Form
        )
    }

    /// Type name as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Section => "Section",
            Self::Container => "Container",
            Self::Grid => "Grid",
            Self::Card => "Card",
            Self::Form => "Form",
            Self::Text => "Text",
            Self::Heading => "Heading",
            Self::Image => "Image",
            Self::Button => "Button",
            Self::Input => "Input",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style of a node, partitioned by responsive breakpoint.
///
/// `base` applies everywhere; `tablet` and `mobile` hold overrides that are
/// layered on top when rendering for those devices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveStyle {
    /// Desktop / default layer.
    #[serde(default)]
    pub base: StyleMap,
    /// Tablet overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<StyleMap>,
    /// Mobile overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<StyleMap>,
}

impl ResponsiveStyle {
    /// Create a style with only a base layer.
    #[must_use]
    pub fn from_base(base: StyleMap) -> Self {
        Self {
            base,
            tablet: None,
            mobile: None,
        }
    }

    /// The layer a device mode edits, if it exists.
    #[must_use]
    pub fn layer(&self, mode: DeviceMode) -> Option<&StyleMap> {
        match mode {
            DeviceMode::Desktop => Some(&self.base),
            DeviceMode::Tablet => self.tablet.as_ref(),
            DeviceMode::Mobile => self.mobile.as_ref(),
        }
    }

    /// Mutable access to a device layer, creating it when missing.
    pub fn layer_mut(&mut self, mode: DeviceMode) -> &mut StyleMap {
        match mode {
            DeviceMode::Desktop => &mut self.base,
            DeviceMode::Tablet => self.tablet.get_or_insert_with(StyleMap::new),
            DeviceMode::Mobile => self.mobile.get_or_insert_with(StyleMap::new),
        }
    }

    /// Drop override layers that no longer contain anything.
    pub fn collapse_empty_layers(&mut self) {
        if self.tablet.as_ref().is_some_and(Map::is_empty) {
            self.tablet = None;
        }
        if self.mobile.as_ref().is_some_and(Map::is_empty) {
            self.mobile = None;
        }
    }

    /// Cascade the layers for a device: base, then tablet, then mobile.
    #[must_use]
    pub fn resolved(&self, mode: DeviceMode) -> StyleMap {
        let mut out = self.base.clone();
        let overrides = match mode {
            DeviceMode::Desktop => vec![],
            DeviceMode::Tablet => vec![self.tablet.as_ref()],
            DeviceMode::Mobile => vec![self.tablet.as_ref(), self.mobile.as_ref()],
        };
        for layer in overrides.into_iter().flatten() {
            for (k, v) in layer {
                out.insert(k.clone(), v.clone());
            }
        }
        out
    }
}

/// A node in the page tree.
///
/// `id` and `component_type` are fixed at creation; changing a node's type
/// means deleting it and inserting a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    id: ComponentId,
    #[serde(rename = "type")]
    component_type: ComponentType,
    /// Responsive style layers.
    #[serde(default)]
    pub style: ResponsiveStyle,
    /// Named parameters, including the raw CSS blob under [`CUSTOM_CSS_KEY`].
    #[serde(default)]
    pub props: PropMap,
    /// Ordered children; always empty for leaf types.
    #[serde(default)]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    /// Create a bare node with empty style and props.
    #[must_use]
    pub fn new(component_type: ComponentType) -> Self {
        Self::with_id(ComponentId::new(), component_type)
    }

    /// Create a bare node with a caller-chosen id.
    #[must_use]
    pub fn with_id(id: ComponentId, component_type: ComponentType) -> Self {
        Self {
            id,
            component_type,
            style: ResponsiveStyle::default(),
            props: PropMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a node carrying the type's default style and props.
    #[must_use]
    pub fn from_template(component_type: ComponentType) -> Self {
        let template = defaults::template(component_type);
        Self {
            style: ResponsiveStyle::from_base(template.style),
            props: template.props,
            ..Self::new(component_type)
        }
    }

    /// Set the props.
    #[must_use]
    pub fn with_props(mut self, props: PropMap) -> Self {
        self.props = props;
        self
    }

    /// Set the base style layer.
    #[must_use]
    pub fn with_style(mut self, base: StyleMap) -> Self {
        self.style.base = base;
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }

    /// The node's id.
    #[must_use]
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// The node's type.
    #[must_use]
    pub const fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// The raw CSS text blob, empty when unset.
    #[must_use]
    pub fn custom_css(&self) -> &str {
        self.props
            .get(CUSTOM_CSS_KEY)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub(crate) fn reassign_id(&mut self, id: ComponentId) {
        self.id = id;
    }
}

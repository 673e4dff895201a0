//! Two-way synchronisation between hand-written CSS and structured style
//! parameters, plus final style resolution.
//!
//! ```text
//!   customCSS text ──parse_declaration_block──▶ CssMap ──extract_*──▶ values
//!        ▲                                                            │
//!        └──────── project_parameters_to_css ◀── StructuredParams ◀───┘
//!                                                     (sync_css_to_parameters)
//! ```

mod declarations;
mod extract;
mod merge;
mod params;
mod project;

pub use declarations::{camel_to_kebab, kebab_to_camel, parse_declaration_block, CssMap};
pub use extract::{
    extract_border, extract_box_shadow, extract_filter, extract_opacity, extract_text_shadow,
    extract_transform, extract_typography, extract_z_index, parse_all_properties, BorderSide,
    BorderValues, BoxShadowValues, FilterValues, ParsedCssProperties, TextShadowValues,
    TransformValues, TypographyValues, DEFAULT_BORDER_COLOR, DEFAULT_BORDER_STYLE,
    DEFAULT_BOX_SHADOW_COLOR, DEFAULT_TEXT_SHADOW_COLOR,
};
pub use merge::{merge_styles, normalize_style_conflicts, params_to_style, resolve_node_style};
pub use params::{sync_css_to_parameters, StructuredParams, PARAM_KEYS};
pub use project::project_parameters_to_css;

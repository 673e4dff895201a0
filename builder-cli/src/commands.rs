//! Subcommand implementations. Each returns its output instead of printing
//! so it can be tested directly.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use builder_autosave::{
    AutoSaveConfig, AutoSaveController, CancellationToken, FilePageSaver, FlushOutcome,
    HttpPageSaver, Saver,
};
use builder_core::style::{parse_declaration_block, CssMap, ParsedCssProperties};
use builder_core::{
    parse_all_properties, project_parameters_to_css, resolve_node_style, sync_css_to_parameters,
    tree, ComponentId, ComponentNode, DeviceMode, StructuredParams,
};
use serde::{Deserialize, Serialize};

use crate::cli::CssInput;

/// Page files hold either the bare components array or the API body shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageFile {
    Bare(Vec<ComponentNode>),
    Wrapped { content: Vec<ComponentNode> },
}

pub fn read_css(input: &CssInput) -> anyhow::Result<String> {
    match (&input.css, &input.file) {
        (Some(css), _) => Ok(css.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CSS from {}", path.display())),
        (None, None) => bail!("Provide CSS text or --file"),
    }
}

pub fn load_page(path: &Path) -> anyhow::Result<Vec<ComponentNode>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page {}", path.display()))?;
    let components = match serde_json::from_str::<PageFile>(&text)
        .with_context(|| format!("{} is not a page document", path.display()))?
    {
        PageFile::Bare(components) | PageFile::Wrapped { content: components } => components,
    };
    tree::validate(&components)?;
    tracing::debug!(
        path = %path.display(),
        components = tree::count(&components),
        "Page loaded"
    );
    Ok(components)
}

#[derive(Serialize)]
struct CssReport {
    declarations: CssMap,
    properties: ParsedCssProperties,
}

pub fn parse_css(css: &str) -> anyhow::Result<String> {
    let report = CssReport {
        declarations: parse_declaration_block(css),
        properties: parse_all_properties(css),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn sync_params(css: &str, current: Option<&str>) -> anyhow::Result<String> {
    let current: StructuredParams = match current {
        Some(text) => serde_json::from_str(text).context("Invalid --current parameters")?,
        None => StructuredParams::default(),
    };
    let params = sync_css_to_parameters(css, &current);
    Ok(serde_json::to_string_pretty(&params)?)
}

pub fn project_css(params: &str, css: &str) -> anyhow::Result<String> {
    let params: StructuredParams =
        serde_json::from_str(params).context("Invalid --params parameters")?;
    Ok(project_parameters_to_css(&params, css))
}

pub fn resolve_style(
    components: &[ComponentNode],
    id: &str,
    device: DeviceMode,
) -> anyhow::Result<String> {
    let id = ComponentId::parse(id).with_context(|| format!("Invalid component id {id}"))?;
    let Some(node) = tree::find_by_id(components, id) else {
        bail!("Component {id} not found");
    };
    Ok(serde_json::to_string_pretty(&resolve_node_style(node, device))?)
}

pub async fn push(
    components: Vec<ComponentNode>,
    base_url: &str,
    page_id: &str,
    token: Option<String>,
) -> anyhow::Result<FlushOutcome> {
    let mut saver = HttpPageSaver::new(base_url, page_id)?;
    if let Some(token) = token {
        saver = saver.with_bearer_token(token);
    }
    tracing::info!(endpoint = %saver.endpoint(), "Pushing page");

    let handle = AutoSaveController::new(saver, Vec::new())
        .with_config(AutoSaveConfig::from_env())
        .on_status_change(|status| tracing::info!(%status, "Save status"))
        .spawn();

    // Always write, even when the page is empty.
    handle.notify_change(components)?;
    handle.save_now()?;
    let outcome = handle.flush().await;
    handle.shutdown().await;
    Ok(outcome)
}

pub async fn export(
    components: Vec<ComponentNode>,
    out_dir: PathBuf,
    name: String,
) -> anyhow::Result<PathBuf> {
    let saver = FilePageSaver::new(out_dir, name);
    saver.save(components, CancellationToken::new()).await?;
    Ok(saver.path())
}

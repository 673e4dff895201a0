//! # pagebuilder
//!
//! Command-line companion to the page builder: inspect how CSS maps onto
//! structured parameters, resolve component styles and push pages.

mod cli;
mod commands;

use anyhow::bail;
use builder_autosave::FlushOutcome;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Command};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: warn,builder_cli=info,builder_autosave=info).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,builder_cli=info,builder_autosave=info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::ParseCss(input) => {
            let css = commands::read_css(&input)?;
            println!("{}", commands::parse_css(&css)?);
        }
        Command::SyncParams { css, current } => {
            let css = commands::read_css(&css)?;
            println!("{}", commands::sync_params(&css, current.as_deref())?);
        }
        Command::ProjectCss { params, css } => {
            let existing = match (&css.css, &css.file) {
                (None, None) => String::new(),
                _ => commands::read_css(&css)?,
            };
            println!("{}", commands::project_css(&params, &existing)?);
        }
        Command::ResolveStyle { page, id, device } => {
            let components = commands::load_page(&page)?;
            println!(
                "{}",
                commands::resolve_style(&components, &id, device.into())?
            );
        }
        Command::Push {
            page,
            base_url,
            page_id,
            token,
        } => {
            let components = commands::load_page(&page)?;
            match commands::push(components, &base_url, &page_id, token).await? {
                FlushOutcome::Saved => println!("Saved page {page_id}"),
                FlushOutcome::NothingToSave => println!("Page {page_id} already up to date"),
                FlushOutcome::Failed(message) => bail!("Push failed: {message}"),
                FlushOutcome::Disabled => {
                    bail!("Saving is disabled (BUILDER_AUTOSAVE_ENABLED=false)")
                }
                FlushOutcome::Offline | FlushOutcome::Cancelled => {
                    bail!("Push did not complete")
                }
            }
        }
        Command::Export {
            page,
            out_dir,
            name,
        } => {
            let components = commands::load_page(&page)?;
            let path = commands::export(components, out_dir, name).await?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

//! Command-line arguments.

use std::path::PathBuf;

use builder_core::DeviceMode;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Page builder command-line tools.
#[derive(Debug, Parser)]
#[command(name = "pagebuilder")]
#[command(about = "Inspect page-builder CSS and push page snapshots")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a CSS declaration block and print every recognised value as JSON.
    ParseCss(CssInput),

    /// Derive structured parameters from a CSS block.
    SyncParams {
        #[command(flatten)]
        css: CssInput,

        /// Current parameters as JSON; fields the CSS does not mention are kept.
        #[arg(long)]
        current: Option<String>,
    },

    /// Write structured parameters into a CSS block, keeping everything else.
    ProjectCss {
        /// Structured parameters as JSON.
        #[arg(long)]
        params: String,

        #[command(flatten)]
        css: CssInput,
    },

    /// Print the merged style of one component in a saved page.
    ResolveStyle {
        /// Page file containing the components array.
        #[arg(long)]
        page: PathBuf,

        /// Component id.
        #[arg(long)]
        id: String,

        /// Breakpoint to resolve for.
        #[arg(long, value_enum, default_value_t = Device::Desktop)]
        device: Device,
    },

    /// Upload a page through the auto-save pipeline (with retries).
    Push {
        /// Page file containing the components array.
        #[arg(long)]
        page: PathBuf,

        /// Base URL of the page API.
        #[arg(long, env = "PAGEBUILDER_API_URL")]
        base_url: String,

        /// Page id on the server.
        #[arg(long, env = "PAGEBUILDER_PAGE_ID")]
        page_id: String,

        /// Bearer token for the page API.
        #[arg(long, env = "PAGEBUILDER_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Validate a page and write it atomically into a directory.
    Export {
        /// Page file containing the components array.
        #[arg(long)]
        page: PathBuf,

        /// Output directory.
        #[arg(long)]
        out_dir: PathBuf,

        /// Output file name without extension.
        #[arg(long, default_value = "page")]
        name: String,
    },
}

/// CSS text given inline or read from a file.
#[derive(Debug, Args)]
pub struct CssInput {
    /// CSS declarations, e.g. "color: red; opacity: 0.5".
    #[arg(conflicts_with = "file")]
    pub css: Option<String>,

    /// Read the CSS from a file instead.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Device {
    Desktop,
    Tablet,
    Mobile,
}

impl From<Device> for DeviceMode {
    fn from(device: Device) -> Self {
        match device {
            Device::Desktop => Self::Desktop,
            Device::Tablet => Self::Tablet,
            Device::Mobile => Self::Mobile,
        }
    }
}

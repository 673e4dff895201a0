//! # Page Builder Auto-Save
//!
//! Debounced, retrying persistence for page snapshots.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  notify_change   ┌─────────────────────┐  save()  ┌────────────┐
//! │ CanvasStore  │ ───────────────▶ │ AutoSaveController  │ ───────▶ │   Saver    │
//! │ (subscriber) │                  │  debounce / retry   │          │ HTTP, file │
//! └──────────────┘                  │  offline / cancel   │          └────────────┘
//!                                   └──────────┬──────────┘
//!                                              │ watch
//!                                              ▼
//!                                       AutoSaveState
//! ```
//!
//! The controller runs as a single Tokio task. Every save attempt gets a
//! generation number and a [`CancellationToken`]; starting a new attempt
//! cancels the previous one and results from older generations are
//! dropped.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bridge;
pub mod cancel;
pub mod config;
pub mod controller;
pub mod error;
pub mod file;
pub mod http;
pub mod saver;
pub mod status;

pub use bridge::attach_store;
pub use cancel::CancellationToken;
pub use config::AutoSaveConfig;
pub use controller::{AutoSaveController, AutoSaveHandle};
pub use error::{SaveError, SaveResult};
pub use file::FilePageSaver;
pub use http::HttpPageSaver;
pub use saver::{saver_fn, FnSaver, Saver};
pub use status::{AutoSaveState, FlushOutcome, SaveStatus};

//! # Docsum
//!
//! A TUI client for a document summarization backend.
//!
//! ## Features
//!
//! - **Upload**: pick a PDF or image, get back a summary and the model that wrote it
//! - **Two views**: a landing page at `/` and the summarizer at `/summarize`
//! - **Headless mode**: `docsum summarize <file>` runs one cycle without the TUI

pub mod client;
pub mod config;
pub mod driver;
pub mod logging;
pub mod progress;
pub mod router;
pub mod selection;
pub mod state;
pub mod summary;
pub mod ui;

pub use client::{ClientError, SummarizerClient};
pub use config::Config;
pub use router::{Route, Router};
pub use selection::{PreviewUrl, SelectedFile};
pub use state::{Msg, SummarizerState};
pub use summary::Summary;

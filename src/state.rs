//! Summarizer view state and its update function.
//!
//! All interactive state of the summarizer view lives in [`SummarizerState`].
//! It only changes through [`SummarizerState::update`], which returns the side
//! effect (if any) the caller must run. Effects report back as further
//! messages tagged with the [`RequestId`] of the cycle that started them, so a
//! late message from an older cycle cannot touch newer state.

use crate::client::ClientError;
use crate::config::ProgressConfig;
use crate::progress;
use crate::selection::{PreviewUrl, SelectedFile};
use crate::summary::{self, Summary};
use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicU64, Ordering};

/// Error shown when submitting without a selected file
pub const NO_FILE_MESSAGE: &str = "Please upload a file.";

/// Identifies one submission cycle.
///
/// Ids are unique for the whole process, so a remounted view never reuses
/// the id of a request started by the view it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

impl RequestId {
    fn next() -> Self {
        RequestId(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Where the view is in the submission cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting(RequestId),
    /// Response received; the overlay is closing
    Succeeded(RequestId),
    /// Request failed; the overlay is closing
    Failed(RequestId),
}

#[derive(Debug)]
pub enum Msg {
    /// The user picked a file
    FileSelected(SelectedFile),
    /// The picked path could not be opened
    SelectionFailed(String),
    /// The user pressed the summarize control
    Submit,
    ProgressTick(RequestId),
    Finished {
        id: RequestId,
        outcome: Result<Summary, ClientError>,
    },
    /// The settle delay after a response elapsed
    Settled(RequestId),
}

/// Side effects requested by [`SummarizerState::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upload the file, ticking progress until the response arrives,
    /// then report `Msg::Finished`
    Send { id: RequestId, file: SelectedFile },
    /// Report `Msg::Settled` after the settle delay
    Settle { id: RequestId },
}

#[derive(Debug, Default)]
pub struct SummarizerState {
    selected: Option<SelectedFile>,
    preview: Option<PreviewUrl>,
    summary: Option<String>,
    model_used: Option<String>,
    completed_at: Option<DateTime<Local>>,
    error: Option<String>,
    phase: Phase,
    progress: u8,
    settings: ProgressConfig,
}

impl SummarizerState {
    pub fn new(settings: ProgressConfig) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn update(&mut self, msg: Msg) -> Option<Command> {
        match msg {
            Msg::FileSelected(file) => {
                if self.is_loading() {
                    tracing::debug!("ignoring file selection while a request is in flight");
                    return None;
                }
                self.clear_result();
                self.error = None;
                self.preview = PreviewUrl::create(&file);
                self.selected = Some(file);
                None
            }
            Msg::SelectionFailed(message) => {
                if self.is_loading() {
                    return None;
                }
                self.clear_result();
                self.selected = None;
                self.preview = None;
                self.error = Some(message);
                None
            }
            Msg::Submit => self.submit(),
            Msg::ProgressTick(id) => {
                if self.phase == Phase::Submitting(id) {
                    self.progress =
                        progress::advance(self.progress, self.settings.step, self.settings.cap);
                }
                None
            }
            Msg::Finished { id, outcome } => {
                if self.phase != Phase::Submitting(id) {
                    tracing::debug!(?id, "discarding stale response");
                    return None;
                }
                match outcome {
                    Ok(summary) => {
                        self.progress = 100;
                        self.summary = Some(summary.text);
                        self.model_used = summary.model_used;
                        self.completed_at = Some(Local::now());
                        self.error = None;
                        self.phase = Phase::Succeeded(id);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, timeout = e.is_timeout(), "summarization failed");
                        self.progress = 0;
                        self.error = Some(e.user_message());
                        self.clear_result();
                        self.phase = Phase::Failed(id);
                    }
                }
                Some(Command::Settle { id })
            }
            Msg::Settled(id) => {
                if matches!(self.phase, Phase::Succeeded(p) | Phase::Failed(p) if p == id) {
                    self.phase = Phase::Idle;
                }
                None
            }
        }
    }

    fn submit(&mut self) -> Option<Command> {
        if self.is_loading() {
            tracing::debug!("submit ignored, request already in flight");
            return None;
        }
        let Some(file) = self.selected.clone() else {
            self.clear_result();
            self.error = Some(NO_FILE_MESSAGE.to_string());
            return None;
        };

        let id = RequestId::next();
        self.phase = Phase::Submitting(id);
        self.progress = 0;
        Some(Command::Send { id, file })
    }

    fn clear_result(&mut self) {
        self.summary = None;
        self.model_used = None;
        self.completed_at = None;
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewUrl> {
        self.preview.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewUrl::as_str)
    }

    /// Summary text, empty when there is none
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    /// Raw model name from the backend, empty when there is none
    pub fn model_used(&self) -> &str {
        self.model_used.as_deref().unwrap_or_default()
    }

    /// Model name for display, "Unknown" when absent
    pub fn model_label(&self) -> &str {
        summary::model_label(self.model_used.as_deref())
    }

    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    /// Last error, empty when there is none
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }

    pub fn has_summary(&self) -> bool {
        !self.summary_text().is_empty()
    }

    pub fn has_error(&self) -> bool {
        !self.error_message().is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Whether the summarize control is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }
}

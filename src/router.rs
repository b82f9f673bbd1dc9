//! Two-route navigation: landing page and summarizer.

use crate::config::ProgressConfig;
use crate::state::SummarizerState;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("no route for path {0:?} (expected \"/\" or \"/summarize\")")]
pub struct RouteError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Summarize,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Summarize => "/summarize",
        }
    }

    /// Resolve a path. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" if trimmed.starts_with('/') => "/",
            other => other,
        };
        match normalized {
            "/" => Some(Route::Landing),
            "/summarize" => Some(Route::Summarize),
            _ => None,
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s).ok_or_else(|| RouteError(s.to_string()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The mounted view. The summarizer owns its state; unmounting drops it.
#[derive(Debug)]
pub enum View {
    Landing,
    Summarizer(SummarizerState),
}

#[derive(Debug)]
pub struct Router {
    view: View,
    settings: ProgressConfig,
}

impl Router {
    pub fn new(start: Route, settings: ProgressConfig) -> Self {
        let view = Self::mount(start, &settings);
        Self { view, settings }
    }

    fn mount(route: Route, settings: &ProgressConfig) -> View {
        match route {
            Route::Landing => View::Landing,
            Route::Summarize => View::Summarizer(SummarizerState::new(settings.clone())),
        }
    }

    pub fn current(&self) -> Route {
        match self.view {
            View::Landing => Route::Landing,
            View::Summarizer(_) => Route::Summarize,
        }
    }

    /// Navigate to a route. Navigating to the current route keeps the view.
    pub fn navigate(&mut self, route: Route) {
        if route == self.current() {
            return;
        }
        tracing::debug!(from = %self.current(), to = %route, "navigate");
        self.view = Self::mount(route, &self.settings);
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn summarizer(&self) -> Option<&SummarizerState> {
        match &self.view {
            View::Summarizer(state) => Some(state),
            View::Landing => None,
        }
    }

    pub fn summarizer_mut(&mut self) -> Option<&mut SummarizerState> {
        match &mut self.view {
            View::Summarizer(state) => Some(state),
            View::Landing => None,
        }
    }
}

//! UI components for the TUI

mod landing;
mod loader;
mod summarizer;

use crate::router::{Router, View};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::Frame;

/// Draw the mounted view, plus the loading overlay while a request is in flight
pub fn render(frame: &mut Frame, router: &Router, input: &str) {
    let area = frame.area();
    match router.view() {
        View::Landing => landing::render(frame, area),
        View::Summarizer(state) => {
            summarizer::render(frame, area, state, input);
            if state.is_loading() {
                loader::render(frame, area, state.progress());
            }
        }
    }
}

fn centered(area: Rect, width: Constraint, height: Constraint) -> Rect {
    let [area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
    let [area] = Layout::vertical([height]).flex(Flex::Center).areas(area);
    area
}

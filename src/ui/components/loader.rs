use super::centered;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Clear, Gauge};
use ratatui::Frame;

/// Modal overlay with the cosmetic progress bar
pub fn render(frame: &mut Frame, area: Rect, progress: u8) {
    let overlay = centered(area, Constraint::Percentage(60), Constraint::Length(3));
    frame.render_widget(Clear, overlay);

    let gauge = Gauge::default()
        .block(Block::bordered().title(" Summarizing "))
        .gauge_style(Style::new().fg(Color::Cyan).bg(Color::Black))
        .percent(u16::from(progress.min(100)))
        .label(format!("Processing... {progress}%"));
    frame.render_widget(gauge, overlay);
}

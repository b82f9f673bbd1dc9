use super::centered;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            "Summarize Documents with power of three models",
            Style::new().add_modifier(Modifier::BOLD),
        ),
        Line::styled("(Bert, Legal Bert & Pegasus)", Style::new().fg(Color::Gray)),
        Line::default(),
        Line::from(Span::styled(
            "  Start Summarizer  ",
            Style::new().fg(Color::Black).bg(Color::Cyan),
        )),
        Line::default(),
        Line::styled("enter: start   q: quit", Style::new().fg(Color::DarkGray)),
    ];

    let height = lines.len() as u16;
    let content = centered(area, Constraint::Percentage(100), Constraint::Length(height));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), content);
}

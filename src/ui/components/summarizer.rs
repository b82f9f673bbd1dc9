use crate::selection::ACCEPTED_EXTENSIONS;
use crate::state::SummarizerState;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

const PLACEHOLDER: &str = "Type a path and press enter to upload (PDF, PNG, JPEG)";

pub fn render(frame: &mut Frame, area: Rect, state: &SummarizerState, input: &str) {
    let [header, upload, button, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new("Document Summarizer")
            .alignment(Alignment::Center)
            .style(Style::new().add_modifier(Modifier::BOLD)),
        header,
    );
    render_upload(frame, upload, state, input);
    render_button(frame, button, state);

    if state.has_error() {
        render_error(frame, body, state.error_message());
    } else if state.has_summary() {
        render_result(frame, body, state);
    }

    frame.render_widget(
        Paragraph::new("enter: select path / summarize   ctrl+s: summarize   esc: back")
            .style(Style::new().fg(Color::DarkGray)),
        footer,
    );
}

fn render_upload(frame: &mut Frame, area: Rect, state: &SummarizerState, input: &str) {
    let mut lines = vec![Line::from(vec![
        Span::styled("> ", Style::new().fg(Color::Cyan)),
        Span::raw(input),
        Span::styled("_", Style::new().add_modifier(Modifier::SLOW_BLINK)),
    ])];

    match state.selected_file() {
        Some(file) => {
            let mut selected = vec![Span::styled(
                file.name(),
                Style::new().add_modifier(Modifier::BOLD),
            )];
            selected.push(Span::raw(format!("  {}  {} bytes", file.mime_type(), file.size())));
            if !file.matches_accept_filter() {
                selected.push(Span::styled(
                    format!("  (not {})", ACCEPTED_EXTENSIONS.join("/")),
                    Style::new().fg(Color::Yellow),
                ));
            }
            lines.push(Line::from(selected));
        }
        None => lines.push(Line::styled(PLACEHOLDER, Style::new().fg(Color::DarkGray))),
    }

    if let Some(preview) = state.preview() {
        let mut text = format!("Preview: {}", preview.as_str());
        if let Some((width, height)) = preview.dimensions() {
            text.push_str(&format!(" ({width}x{height})"));
        }
        lines.push(Line::styled(text, Style::new().fg(Color::Gray)));
    }

    let block = Block::bordered().title(" Upload Your Document ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_button(frame: &mut Frame, area: Rect, state: &SummarizerState) {
    let style = if state.can_submit() {
        Style::new().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::new().fg(Color::DarkGray).bg(Color::Black)
    };
    frame.render_widget(
        Paragraph::new(Span::styled("  Summarize  ", style)).alignment(Alignment::Center),
        area,
    );
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::new().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::new().title(" Error ")),
        area,
    );
}

fn render_result(frame: &mut Frame, area: Rect, state: &SummarizerState) {
    let mut text = Text::from(state.summary_text());
    text.push_line(Line::default());

    let mut model = vec![
        Span::styled("Model Used: ", Style::new().add_modifier(Modifier::BOLD)),
        Span::raw(state.model_label()),
    ];
    if let Some(at) = state.completed_at() {
        model.push(Span::styled(
            format!("  ({})", at.format("%H:%M:%S")),
            Style::new().fg(Color::DarkGray),
        ));
    }
    text.push_line(Line::from(model));

    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(" Summary ")),
        area,
    );
}

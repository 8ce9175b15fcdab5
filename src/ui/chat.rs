use crate::app::{App, InputMode};
use crate::models::ChatRole;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

const PROMPT: &str = " › ";

/// Assistant panel: transcript above, input line below.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    if app.chat.messages.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask for anything: \"light comedies for tonight\", \"shows like Dark\"...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for msg in &app.chat.messages {
        let time = msg.timestamp.format("%H:%M").to_string();
        match msg.role {
            ChatRole::User => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "You ",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(time, Style::default().fg(Color::DarkGray)),
                ]));
                lines.push(Line::from(msg.content.as_str()));
            }
            ChatRole::Ai => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "AI ",
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(time, Style::default().fg(Color::DarkGray)),
                ]));
                if msg.is_error {
                    lines.push(Line::from(Span::styled(
                        msg.content.as_str(),
                        Style::default().fg(Color::Red),
                    )));
                } else {
                    lines.extend(tui_markdown::from_str(&msg.content).lines);
                }
                if !msg.recommendations.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("→ {} titles shown in the grid", msg.recommendations.len()),
                        Style::default().fg(Color::Green),
                    )));
                }
                if let Some(summary) = msg.query_analysis.as_ref().and_then(analysis_summary) {
                    lines.push(Line::from(Span::styled(
                        summary,
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    )));
                }
            }
        }
        lines.push(Line::from(""));
    }

    if app.chat.is_sending() {
        lines.push(Line::from(Span::styled(
            "AI is thinking…",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the newest lines in view
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(" AI Assistant ")
                .title_bottom(Line::from(" Ctrl+L clear ").style(Style::default().fg(Color::DarkGray))),
        );
    frame.render_widget(transcript, chunks[0]);

    let editing = app.input_mode == InputMode::Chat;
    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input = Paragraph::new(format!("{}{}", PROMPT, app.chat_input))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(if editing { " Message (Enter to send) " } else { " Message (c to focus) " }),
        );
    frame.render_widget(input, chunks[1]);

    if editing {
        let cursor_x = chunks[1].x + 1 + PROMPT.width() as u16 + app.chat_input.width() as u16;
        frame.set_cursor_position((cursor_x, chunks[1].y + 1));
    }
}

/// One-line digest of what the assistant understood, e.g. `genre: thriller · mood: dark`.
fn analysis_summary(analysis: &Value) -> Option<String> {
    let fields = analysis.as_object()?;
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("/"),
                _ => return None,
            };
            (!text.is_empty()).then(|| format!("{}: {}", key.replace('_', " "), text))
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join(" · "))
}

use super::{centered_rect, truncate_str};
use crate::app::App;
use crate::models::InteractionAction;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

pub fn render(app: &App, frame: &mut Frame) {
    let Some(menu) = &app.action_menu else {
        return;
    };
    let item = &menu.item;

    let area = centered_rect(44, 40, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", truncate_str(&item.title, area.width.saturating_sub(6) as usize)))
        .title_bottom(
            Line::from(" Enter save · 1-5 rate · Esc close ").style(Style::default().fg(Color::DarkGray)),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(inner);

    let current = app.prefs.action_for(item);
    let items: Vec<ListItem> = InteractionAction::ALL
        .iter()
        .map(|action| {
            let mut spans = vec![
                Span::styled(format!("{} ", action.marker()), Style::default().fg(Color::Magenta)),
                Span::raw(action.label()),
            ];
            if current == Some(*action) {
                spans.push(Span::styled("  (current)", Style::default().fg(Color::DarkGray)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");
    let mut state = ListState::default();
    state.select(Some(menu.selected));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let stars = match menu.effective_rating() {
        Some(n) => format!("{}{}", "★".repeat(n as usize), "☆".repeat(5 - n as usize)),
        None if !menu.action().accepts_rating() => "not used for this action".to_string(),
        None => "not rated".to_string(),
    };
    let rating = Paragraph::new(Line::from(vec![
        Span::styled(" Rating: ", Style::default().fg(Color::DarkGray)),
        Span::styled(stars, Style::default().fg(Color::Yellow)),
    ]));
    frame.render_widget(rating, chunks[1]);
}

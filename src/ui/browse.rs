use super::{chat, key_hint, truncate_str};
use crate::app::{App, InputMode, PREVIEW_HEIGHT};
use crate::models::{ContentItem, MediaType};
use crate::options::{self, FilterField};
use crate::state::DisplayMode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + search(3) + filters/banner(3) + body(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(app, frame, chunks[0]);
    render_search_bar(app, frame, chunks[1]);
    if app.mode.shows_filters() {
        render_filter_bar(app, frame, chunks[2]);
    } else {
        render_mode_banner(app, frame, chunks[2]);
    }

    let content_area = if app.chat.open {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[3]);
        chat::render(app, frame, body[1]);
        body[0]
    } else {
        chunks[3]
    };
    render_content(app, frame, content_area);
    render_status(app, frame, chunks[4]);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let resolved = app.display();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" 🎬 {}", options::APP_NAME),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   [{} · {} titles]", resolved.mode.label(), resolved.items.len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("   {}", app.prefs.user_id()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn render_search_bar(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Search;
    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label = if editing {
        " 🔍 Search (Enter to keep, Esc to clear): "
    } else {
        " 🔍 Search (/): "
    };
    let mut spans = vec![Span::raw(label), Span::raw(app.search_query.as_str())];
    if app.search.loading {
        spans.push(Span::styled("  searching…", Style::default().fg(Color::Cyan)));
    } else if app.search.has_pending_timer() {
        spans.push(Span::styled("  …", Style::default().fg(Color::DarkGray)));
    }

    let bar = Paragraph::new(Line::from(spans)).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(" Search movies & shows "),
    );
    frame.render_widget(bar, area);

    if editing {
        let cursor_x = area.x + label.width() as u16 + app.search_query.width() as u16;
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn filter_value(app: &App, field: FilterField) -> &'static str {
    let f = &app.filters;
    let value = match field {
        FilterField::Language => f.language.map(|v| v.label()),
        FilterField::Genre => f.genre.map(|v| v.label()),
        FilterField::ContentType => f.content_type.map(|v| v.label()),
        FilterField::ReleasePeriod => f.release_period.map(|v| v.label()),
    };
    value.unwrap_or("—")
}

fn render_filter_bar(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, field) in FilterField::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        let focused = *field == app.filter_focus;
        spans.push(Span::styled(
            format!("{}: ", field.label()),
            Style::default().fg(Color::DarkGray),
        ));
        let value = if focused {
            format!("◂ {} ▸", filter_value(app, *field))
        } else {
            filter_value(app, *field).to_string()
        };
        spans.push(Span::styled(
            value,
            if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            },
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Filters "),
    );
    frame.render_widget(bar, area);
}

fn render_mode_banner(app: &App, frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(6) as usize;
    let (title, text, color) = match app.mode {
        DisplayMode::Search => (
            " Search ",
            format!("Results for \"{}\"", app.search_query.trim()),
            Color::Yellow,
        ),
        DisplayMode::Ai => (
            " AI Picks ",
            app.ai_picks.response.lines().next().unwrap_or_default().to_string(),
            Color::Magenta,
        ),
        DisplayMode::Personalized => (
            " For You ",
            format!(
                "Personalized recommendations ({} personalization)",
                app.prefs.personalization_level
            ),
            Color::Green,
        ),
        DisplayMode::Normal => (" Filters ", String::new(), Color::DarkGray),
    };

    let banner = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {}", truncate_str(&text, width)), Style::default().fg(color)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title)
            .title_bottom(Line::from(" Esc: back to browse ").alignment(Alignment::Right)),
    );
    frame.render_widget(banner, area);
}

fn render_content(app: &App, frame: &mut Frame, area: Rect) {
    let resolved = app.display();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", mode_title(resolved.mode)));

    if resolved.items.is_empty() {
        let (text, style) = if resolved.loading {
            ("Loading...".to_string(), Style::default().fg(Color::Cyan))
        } else if let (DisplayMode::Normal, Some(err)) = (resolved.mode, &app.content.error) {
            (err.clone(), Style::default().fg(Color::Red))
        } else {
            (app.empty_message(), Style::default().fg(Color::DarkGray))
        };
        let empty = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(PREVIEW_HEIGHT)])
        .split(area);

    let width = chunks[0].width as usize;
    let items: Vec<ListItem> = resolved
        .items
        .iter()
        .map(|item| ListItem::new(item_line(app, item, width)))
        .collect();

    let page_info = format!(
        " {} of {} ",
        app.list_selected + 1,
        resolved.items.len()
    );
    let list = List::new(items)
        .block(block.title_bottom(Line::from(page_info).alignment(Alignment::Right)))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(app.list_selected));
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    if let Some(item) = resolved.items.get(app.list_selected) {
        render_preview(app, frame, chunks[1], item);
    }
}

fn mode_title(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Normal => "Discover",
        DisplayMode::Search => "Search Results",
        DisplayMode::Ai => "AI Recommendations",
        DisplayMode::Personalized => "Recommended For You",
    }
}

fn item_line<'a>(app: &App, item: &'a ContentItem, width: usize) -> Line<'a> {
    let (marker, marker_style) = match app.prefs.action_for(item) {
        Some(action) => (action.marker(), Style::default().fg(Color::Magenta)),
        None => (" ", Style::default()),
    };
    let platforms = item
        .streaming_platforms
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Line::from(vec![
        Span::styled(format!("{} ", marker), marker_style),
        Span::styled(
            format!("{:<3} ", item.content_type.label()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(truncate_str(&item.title, width.saturating_sub(40).max(10))),
        Span::styled(format!("  {}", item.year), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("  ★ {:.1}", item.rating), Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("  {}", truncate_str(&platforms, 24)),
            Style::default().fg(Color::Green),
        ),
    ])
}

fn render_preview(app: &App, frame: &mut Frame, area: Rect, item: &ContentItem) {
    let genres = options::genre_names(&item.genre_ids, item.content_type == MediaType::Tv);
    let date = item
        .release_date
        .as_deref()
        .or(item.first_air_date.as_deref())
        .unwrap_or(&item.year);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                &item.title,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} · {} · ★ {:.1}", item.content_type.label(), date, item.rating),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled("Genres: ", Style::default().fg(Color::DarkGray)),
            Span::styled(genres.join(", "), Style::default().fg(Color::Cyan)),
        ]),
    ];
    if let Some(action) = app.prefs.action_for(item) {
        lines.push(Line::from(vec![
            Span::styled("You: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} {}", action.marker(), action.as_str()),
                Style::default().fg(Color::Magenta),
            ),
        ]));
    }
    if let Some(reason) = &item.recommendation_reason {
        lines.push(Line::from(Span::styled(
            reason.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    if !item.overview.is_empty() {
        lines.push(Line::from(item.overview.as_str()));
    }

    let preview = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Details "),
    );
    frame.render_widget(preview, area);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let status_line = Line::from(vec![
        key_hint(" ↑↓"),
        Span::raw(" Navigate  "),
        key_hint("/"),
        Span::raw(" Search  "),
        key_hint("Tab ←→"),
        Span::raw(" Filters  "),
        key_hint("Enter"),
        Span::raw(" Rate  "),
        key_hint("c"),
        Span::raw(" Chat  "),
        key_hint("p"),
        Span::raw(" For you  "),
        key_hint("u"),
        Span::raw(" Profile  "),
        key_hint("?"),
        Span::raw(" Help  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}

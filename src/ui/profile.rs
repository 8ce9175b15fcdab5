use super::{key_hint, truncate_str};
use crate::app::App;
use crate::models::UserProfile;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const BAR_WIDTH: usize = 24;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + body(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " 👤 Your Profile",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {}", app.prefs.user_id()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, chunks[0]);

    match &app.prefs.profile {
        Some(profile) => render_profile(app, profile, frame, chunks[1]),
        None if app.prefs.profile_loading => {
            let loading = Paragraph::new("Loading profile...")
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Center);
            frame.render_widget(loading, chunks[1]);
        }
        None => render_no_profile(frame, chunks[1]),
    }

    let status_line = Line::from(vec![
        key_hint(" Esc"),
        Span::raw(" Back  "),
        key_hint("↑↓"),
        Span::raw(" Scroll  "),
        key_hint("p"),
        Span::raw(" Personalized picks  "),
        key_hint("r"),
        Span::raw(" Reload  "),
        key_hint("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[2]);
}

fn render_no_profile(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No Profile Found",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Start interacting with content to build your profile."),
        Line::from(Span::styled(
            "Like, dislike, watchlist or mark titles as watched from the browse view.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field<'a>(label: &'a str, values: &[String]) -> Line<'a> {
    let value = if values.is_empty() {
        "none yet".to_string()
    } else {
        values.join(", ")
    };
    Line::from(vec![
        Span::styled(format!("  {:<18}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn render_profile(app: &App, profile: &UserProfile, frame: &mut Frame, area: Rect) {
    let prefs = &profile.profile;
    let stats = &profile.stats;

    let mut lines = vec![
        section("Preferences"),
        field("Genres", &prefs.preferred_genres),
        field("Languages", &prefs.preferred_languages),
        field("Content types", &prefs.preferred_content_types),
        field("Actors", &prefs.liked_actors),
        field("Directors", &prefs.liked_directors),
        Line::from(""),
        section("Activity"),
        Line::from(vec![
            Span::styled("  Interactions ", Style::default().fg(Color::DarkGray)),
            Span::styled(stats.total_interactions.to_string(), Style::default().fg(Color::White)),
            Span::styled("   Liked ", Style::default().fg(Color::DarkGray)),
            Span::styled(stats.liked_content.to_string(), Style::default().fg(Color::Magenta)),
            Span::styled("   Watchlist ", Style::default().fg(Color::DarkGray)),
            Span::styled(stats.watchlist_items.to_string(), Style::default().fg(Color::Yellow)),
            Span::styled("   Watched ", Style::default().fg(Color::DarkGray)),
            Span::styled(stats.watched_items.to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
    ];

    if !stats.genre_distribution.is_empty() {
        lines.push(section("Genre distribution"));
        let max = stats.genre_distribution.values().copied().max().unwrap_or(1).max(1);
        let mut genres: Vec<(&String, &u64)> = stats.genre_distribution.iter().collect();
        genres.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (genre, count) in genres {
            let filled = (*count as usize * BAR_WIDTH) / max as usize;
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<18}", truncate_str(genre, 18)), Style::default().fg(Color::DarkGray)),
                Span::styled("█".repeat(filled.max(1)), Style::default().fg(Color::Cyan)),
                Span::styled(format!(" {}", count), Style::default().fg(Color::White)),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(section("Recent activity"));
    if profile.recent_activity.is_empty() {
        lines.push(Line::from(Span::styled("  nothing yet", Style::default().fg(Color::DarkGray))));
    }
    for entry in &profile.recent_activity {
        let when = entry
            .timestamp
            .as_deref()
            .map(|t| t.chars().take(10).collect::<String>())
            .unwrap_or_default();
        let mut spans = vec![
            Span::styled(format!("  {} ", entry.action.marker()), Style::default().fg(Color::Magenta)),
            Span::styled(format!("{:<12}", entry.action.as_str()), Style::default().fg(Color::DarkGray)),
            Span::raw(truncate_str(&entry.title, 40)),
        ];
        if let Some(rating) = entry.rating {
            spans.push(Span::styled(format!("  ★ {:.1}", rating), Style::default().fg(Color::Yellow)));
        }
        spans.push(Span::styled(format!("  {}", when), Style::default().fg(Color::DarkGray)));
        lines.push(Line::from(spans));
    }

    if !app.prefs.has_preferences() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Like a few more titles to unlock personalized recommendations.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.profile_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(body, area);
}

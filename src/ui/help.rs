use super::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("q", "Quit application"),
            ("Esc", "Back to browse / cancel"),
            ("u", "Open your profile"),
            ("p", "Personalized recommendations"),
        ],
    ),
    (
        "Browse",
        &[
            ("↑/k ↓/j", "Navigate titles"),
            ("PgUp/PgDn", "Page up/down"),
            ("Tab/S-Tab", "Focus next/previous filter"),
            ("←/h →/l", "Change focused filter"),
            ("/", "Search all movies and shows"),
            ("Enter/a", "Like, dislike, watchlist or rate"),
            ("r", "Reload current filters"),
        ],
    ),
    (
        "AI Assistant",
        &[
            ("c", "Open and focus the chat"),
            ("C", "Close the chat panel"),
            ("Enter", "Send message"),
            ("Ctrl+L", "Clear conversation"),
        ],
    ),
    (
        "Profile",
        &[("↑/↓", "Scroll"), ("r", "Reload profile")],
    ),
];

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 80, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let mut help_text = vec![Line::from("")];
    for (title, keys) in SECTIONS {
        help_text.push(Line::from(vec![Span::styled(
            format!("  {}", title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]));
        for (key, desc) in keys.iter() {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {:<12}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*desc),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help: Keybindings ")
                .title_bottom(Line::from(" Press ? or Esc to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}

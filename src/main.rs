mod api;
mod app;
mod config;
mod error;
mod events;
mod identity;
mod models;
mod options;
mod state;
mod ui;

use api::{HttpApi, RecommenderApi};
use app::{App, InputMode, View};
use clap::{Parser, Subcommand};
use config::Settings;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use identity::IdentityStore;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Terminal client for the movieflix recommendation service
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides MOVIEFLIX_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// File holding the persistent user id
    #[arg(long, global = true)]
    user_id_file: Option<PathBuf>,

    /// Log file (overrides MOVIEFLIX_LOG_FILE)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive browser (default)
    Run,
    /// Search movies and shows and print the results
    Search {
        /// Free-text query
        query: String,
    },
    /// Print the stored user's profile
    Profile,
    /// Print the persistent user id and where it is stored
    Whoami,
    /// Check that the backend is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(url) = cli.api_url {
        settings.api_url = url;
    }
    if cli.user_id_file.is_some() {
        settings.user_id_file = cli.user_id_file;
    }
    if cli.log_file.is_some() {
        settings.log_file = cli.log_file;
    }
    let settings = settings.validate()?;

    init_logging(&settings.log_path()?)?;

    let identity = IdentityStore::new(settings.user_id_path()?);
    let api: Arc<dyn RecommenderApi> = Arc::new(HttpApi::new(settings.api_url.clone()));

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Search { query } => {
            let Some(query) = state::search::searchable_query(&query, settings.min_search_length)
            else {
                eprintln!(
                    "Error: query must be at least {} characters",
                    settings.min_search_length
                );
                std::process::exit(1);
            };
            let items = api.search(query).await?;
            if items.is_empty() {
                println!("{}", state::DisplayMode::Search.empty_message(query));
            }
            for item in items {
                println!(
                    "{:>8}  {:<3} {:<40} {:>4}  ★ {:.1}",
                    item.id,
                    item.content_type.label(),
                    ui::truncate_str(&item.title, 40),
                    item.year,
                    item.rating
                );
            }
        }
        Commands::Profile => {
            let Some(user_id) = identity.load()? else {
                println!("No Profile Found (no user id at {})", identity.path().display());
                return Ok(());
            };
            match api.user_profile(&user_id).await? {
                Some(profile) => {
                    let summary = &profile.profile;
                    let stats = &profile.stats;
                    println!("User:          {}", user_id);
                    println!("Genres:        {}", summary.preferred_genres.join(", "));
                    println!("Languages:     {}", summary.preferred_languages.join(", "));
                    println!("Content types: {}", summary.preferred_content_types.join(", "));
                    println!(
                        "Interactions:  {} (liked {}, watchlist {}, watched {})",
                        stats.total_interactions,
                        stats.liked_content,
                        stats.watchlist_items,
                        stats.watched_items
                    );
                    for entry in &profile.recent_activity {
                        println!("  {} {:<12} {}", entry.action.marker(), entry.action.as_str(), entry.title);
                    }
                }
                None => println!("No Profile Found for {}", user_id),
            }
        }
        Commands::Whoami => {
            let user_id = identity.load_or_create()?;
            println!("{}", user_id);
            println!("stored in {}", identity.path().display());
        }
        Commands::Health => match api.health().await {
            Ok(()) => println!("{} is healthy", api.base_url()),
            Err(e) => {
                eprintln!("Error: {} is unreachable: {}", api.base_url(), e.user_message());
                std::process::exit(1);
            }
        },
        Commands::Run => {
            let user_id = identity.load_or_create()?;
            let mut app = App::new(api, &settings, user_id);
            app.init();

            // Init terminal
            let mut terminal = ratatui::init();

            // Initial page size setup
            let size = terminal.size()?;
            app.update_page_size(size.height);

            // Main loop
            let result = run_app(&mut terminal, &mut app).await;

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                tracing::error!(error = %e, "Exiting after error");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Log to a file so output never lands on the alternate screen.
fn init_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movieflix=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.drain_events();
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so background results show up promptly
        if crossterm::event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(_, height) => {
                    app.update_page_size(height);
                }
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.action_menu.is_some() {
        handle_action_menu_key(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Search => handle_search_input(app, key),
        InputMode::Chat => handle_chat_input(app, key),
        InputMode::Normal => match app.view {
            View::Browse => handle_browse_key(app, key),
            View::Profile => handle_profile_key(app, key),
        },
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.back_to_browse();
        }
        KeyCode::Backspace => {
            let mut query = app.search_query.clone();
            query.pop();
            app.set_search_query(query);
        }
        KeyCode::Char(c) => {
            let mut query = app.search_query.clone();
            query.push(c);
            app.set_search_query(query);
        }
        _ => {}
    }
}

fn handle_chat_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.clear_chat();
        return;
    }
    match key.code {
        KeyCode::Enter => app.send_chat(),
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.chat_input.pop();
        }
        KeyCode::Char(c) => {
            app.chat_input.push(c);
        }
        _ => {}
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.clear_chat();
        return;
    }
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
        }
        KeyCode::Esc => {
            app.back_to_browse();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list_prev();
        }
        KeyCode::PageDown => {
            app.list_page_down();
        }
        KeyCode::PageUp => {
            app.list_page_up();
        }
        KeyCode::Tab => {
            app.filter_focus = app.filter_focus.next();
        }
        KeyCode::BackTab => {
            app.filter_focus = app.filter_focus.prev();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.cycle_filter(true);
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.cycle_filter(false);
        }
        KeyCode::Enter | KeyCode::Char('a') => {
            app.open_action_menu();
        }
        KeyCode::Char('c') => {
            app.focus_chat();
        }
        KeyCode::Char('C') => {
            if app.chat.open {
                app.toggle_chat();
            }
        }
        KeyCode::Char('p') => {
            app.request_personalized();
        }
        KeyCode::Char('u') => {
            app.open_profile();
        }
        KeyCode::Char('r') => {
            app.refetch_content();
        }
        _ => {}
    }
}

fn handle_profile_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Esc | KeyCode::Char('b') => {
            app.view = View::Browse;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up();
        }
        KeyCode::Char('p') => {
            app.request_personalized();
        }
        KeyCode::Char('r') => {
            app.prefs.load_profile();
        }
        _ => {}
    }
}

fn handle_action_menu_key(app: &mut App, key: KeyEvent) {
    let Some(menu) = app.action_menu.as_mut() else {
        return;
    };
    let count = models::InteractionAction::ALL.len();
    match key.code {
        KeyCode::Esc => {
            app.action_menu = None;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            menu.selected = (menu.selected + 1) % count;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            menu.selected = (menu.selected + count - 1) % count;
        }
        KeyCode::Char(c @ '1'..='5') if menu.action().accepts_rating() => {
            menu.rating = c.to_digit(10).map(|d| d as u8);
        }
        KeyCode::Char('0') => {
            menu.rating = None;
        }
        KeyCode::Enter => {
            app.confirm_action_menu();
        }
        _ => {}
    }
}

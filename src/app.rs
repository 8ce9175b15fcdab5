use crate::api::RecommenderApi;
use crate::config::Settings;
use crate::events::{self, AppEvent, EventReceiver};
use crate::models::{ContentItem, Filters, InteractionAction};
use crate::options::{self, FilterField};
use crate::state::{
    AiPicks, ChatSession, ContentFeed, DisplayMode, GlobalSearch, ModeSources, QueryChange,
    Resolved, SendOutcome, Slice, UserPreferences,
};
use std::sync::Arc;

/// Which view is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Browse,
    Profile,
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Chat,
}

/// Interaction popup. The title is pinned when the popup opens.
#[derive(Debug, Clone)]
pub struct ActionMenu {
    pub item: ContentItem,
    pub selected: usize,
    pub rating: Option<u8>,
}

impl ActionMenu {
    pub fn action(&self) -> InteractionAction {
        InteractionAction::ALL[self.selected % InteractionAction::ALL.len()]
    }

    /// The rating sent with the chosen action, if that action takes one.
    pub fn effective_rating(&self) -> Option<u8> {
        self.rating.filter(|_| self.action().accepts_rating())
    }
}

pub const PREVIEW_HEIGHT: u16 = 8;

// Header, search and filter rows, status line, list borders, details pane
pub const LIST_OVERHEAD: u16 = 3 + 3 + 3 + 1 + 2 + PREVIEW_HEIGHT;

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub show_help: bool,
    pub input_mode: InputMode,

    // Display mode and its inputs
    pub mode: DisplayMode,
    pub filters: Filters,
    pub filter_focus: FilterField,
    pub search_query: String,
    pub ai_picks: AiPicks,

    // State slices
    pub content: ContentFeed,
    pub search: GlobalSearch,
    pub chat: ChatSession,
    pub prefs: UserPreferences,

    pub chat_input: String,
    pub action_menu: Option<ActionMenu>,

    // List view state
    pub list_selected: usize,
    pub page_size: usize,

    pub profile_scroll: u16,
    pub status_msg: String,

    events_rx: EventReceiver,
}

impl App {
    pub fn new(api: Arc<dyn RecommenderApi>, settings: &Settings, user_id: String) -> Self {
        let (tx, events_rx) = events::channel();
        let status_msg = format!("Connecting to {}...", api.base_url());

        Self {
            should_quit: false,
            view: View::Browse,
            show_help: false,
            input_mode: InputMode::Normal,

            mode: DisplayMode::Normal,
            filters: Filters::default(),
            filter_focus: FilterField::Language,
            search_query: String::new(),
            ai_picks: AiPicks::default(),

            content: ContentFeed::new(Arc::clone(&api), tx.clone()),
            search: GlobalSearch::new(
                Arc::clone(&api),
                tx.clone(),
                settings.search_debounce(),
                settings.min_search_length,
            ),
            chat: ChatSession::new(Arc::clone(&api), tx.clone()),
            prefs: UserPreferences::new(
                api,
                tx,
                user_id,
                settings.profile_refresh_delay(),
                settings.recommendation_limit,
            ),

            chat_input: String::new(),
            action_menu: None,

            list_selected: 0,
            page_size: 20,

            profile_scroll: 0,
            status_msg,

            events_rx,
        }
    }

    /// Kick off the profile load and the first discover request.
    pub fn init(&mut self) {
        tracing::info!(user_id = self.prefs.user_id(), "Starting session");
        self.prefs.load_profile();
        self.sync_content();
    }

    /// Apply every event posted since the last frame.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ContentLoaded { filters, result } => {
                if self.content.apply(filters, result) {
                    self.status_msg = match &self.content.error {
                        Some(err) => err.clone(),
                        None => format!("{} titles", self.content.items.len()),
                    };
                    self.clamp_selection();
                }
            }
            AppEvent::SearchStarted { seq, query } => {
                if self.search.apply_started(seq, &query) {
                    let mode = DisplayMode::from_flags(
                        self.mode == DisplayMode::Personalized,
                        self.mode == DisplayMode::Ai,
                        true,
                    );
                    self.set_mode(mode);
                }
            }
            AppEvent::SearchFinished { seq, result } => {
                if self.search.apply_finished(seq, result) {
                    self.status_msg = format!(
                        "{} results for \"{}\"",
                        self.search.results.len(),
                        self.search.query
                    );
                    self.clamp_selection();
                }
            }
            AppEvent::ChatReplied { generation, result } => {
                if let Some(picks) = self.chat.apply_reply(generation, result) {
                    self.status_msg = format!("Assistant picked {} titles", picks.items.len());
                    self.enter_ai(picks);
                }
            }
            AppEvent::ProfileLoaded { seq, result } => {
                self.prefs.apply_profile(seq, result);
            }
            AppEvent::InteractionRecorded {
                action,
                title,
                success,
            } => {
                self.status_msg = if success {
                    format!("{} {}", action.label(), title)
                } else {
                    format!("Could not save {} for {}", action.as_str(), title)
                };
            }
            AppEvent::ProfileRefreshDue => self.prefs.load_profile(),
            AppEvent::RecommendationsLoaded { result } => {
                let count = self.prefs.apply_recommendations(result);
                if count > 0 {
                    self.enter_personalized();
                    self.view = View::Browse;
                    self.status_msg = format!(
                        "{} personalized picks ({} personalization)",
                        count, self.prefs.personalization_level
                    );
                } else {
                    self.status_msg =
                        "No personalized recommendations yet. Like a few titles first.".to_string();
                }
            }
        }
    }

    /// The content array, loading flag and mode the grid renders.
    pub fn display(&self) -> Resolved<'_> {
        let sources = ModeSources {
            personalized: Slice::new(&self.prefs.personalized, self.prefs.recommendations_loading),
            ai: Slice::new(&self.ai_picks.items, self.chat.is_sending()),
            search: Slice::new(&self.search.results, self.search.loading),
            normal: Slice::new(&self.content.items, self.content.loading),
        };
        crate::state::mode::resolve(self.mode, &sources)
    }

    pub fn empty_message(&self) -> String {
        self.mode.empty_message(self.search_query.trim())
    }

    pub fn selected_item(&self) -> Option<&ContentItem> {
        self.display().items.get(self.list_selected)
    }

    // ── Mode transitions ──

    fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            tracing::debug!(from = self.mode.label(), to = mode.label(), "Display mode change");
            self.mode = mode;
            self.list_selected = 0;
        }
        self.sync_content();
    }

    fn clear_search(&mut self) {
        self.search_query.clear();
        self.search.clear();
        if self.input_mode == InputMode::Search {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Typing in the search bar. Leaves AI and personalized mode at once;
    /// search mode starts only when the debounced request goes out.
    pub fn set_search_query(&mut self, query: String) {
        self.search_query = query;
        match self.search.on_query_changed(&self.search_query) {
            QueryChange::Scheduled => {
                if matches!(self.mode, DisplayMode::Ai | DisplayMode::Personalized) {
                    self.set_mode(DisplayMode::Normal);
                }
            }
            QueryChange::Cleared => {
                if self.mode != DisplayMode::Normal {
                    self.set_mode(DisplayMode::Normal);
                }
            }
        }
    }

    pub fn enter_ai(&mut self, picks: AiPicks) {
        self.clear_search();
        self.ai_picks = picks;
        self.set_mode(DisplayMode::Ai);
    }

    pub fn enter_personalized(&mut self) {
        self.clear_search();
        self.set_mode(DisplayMode::Personalized);
    }

    /// Esc from any mode: normal browse with an empty query.
    pub fn back_to_browse(&mut self) {
        self.clear_search();
        self.set_mode(DisplayMode::Normal);
    }

    /// Hand the filter tuple to the feed while filters drive the grid.
    pub fn sync_content(&mut self) {
        let filters = match self.mode {
            DisplayMode::Normal | DisplayMode::Search => Some(&self.filters),
            DisplayMode::Ai | DisplayMode::Personalized => None,
        };
        self.content.sync(filters);
    }

    pub fn refetch_content(&mut self) {
        if self.mode == DisplayMode::Normal && self.content.refetch() {
            self.status_msg = "Refreshing...".to_string();
        }
    }

    pub fn cycle_filter(&mut self, forward: bool) {
        if !self.mode.shows_filters() {
            return;
        }
        let f = &mut self.filters;
        match self.filter_focus {
            FilterField::Language => {
                f.language = f.language.map(|v| options::cycle(&options::Language::ALL, v, forward));
            }
            FilterField::Genre => {
                f.genre = f.genre.map(|v| options::cycle(&options::Genre::ALL, v, forward));
            }
            FilterField::ContentType => {
                f.content_type = f
                    .content_type
                    .map(|v| options::cycle(&options::ContentKind::ALL, v, forward));
            }
            FilterField::ReleasePeriod => {
                f.release_period = f
                    .release_period
                    .map(|v| options::cycle(&options::ReleasePeriod::ALL, v, forward));
            }
        }
        self.list_selected = 0;
        self.sync_content();
    }

    // ── Chat ──

    pub fn toggle_chat(&mut self) {
        self.chat.toggle();
        self.input_mode = if self.chat.open {
            InputMode::Chat
        } else {
            InputMode::Normal
        };
    }

    /// Open the panel if needed and direct keystrokes to it.
    pub fn focus_chat(&mut self) {
        if !self.chat.open {
            self.chat.toggle();
        }
        self.input_mode = InputMode::Chat;
    }

    pub fn send_chat(&mut self) {
        match self.chat.send(&self.chat_input) {
            SendOutcome::Sent => {
                self.chat_input.clear();
                self.status_msg = "Asking the assistant...".to_string();
            }
            SendOutcome::Busy => {
                self.status_msg = "Still waiting for the previous answer".to_string();
            }
            SendOutcome::Empty => {}
        }
    }

    pub fn clear_chat(&mut self) {
        self.chat.clear();
        self.status_msg = "Conversation cleared".to_string();
    }

    // ── Interactions and profile ──

    pub fn open_action_menu(&mut self) {
        if let Some(item) = self.selected_item().cloned() {
            self.action_menu = Some(ActionMenu {
                item,
                selected: 0,
                rating: None,
            });
        }
    }

    /// Record the chosen action for the title the popup was opened on.
    pub fn confirm_action_menu(&mut self) {
        let Some(menu) = self.action_menu.take() else {
            return;
        };
        let action = menu.action();
        self.prefs
            .record(&menu.item, action, menu.effective_rating().map(f64::from));
        self.status_msg = format!("Saving {} for {}...", action.as_str(), menu.item.title);
    }

    pub fn open_profile(&mut self) {
        self.view = View::Profile;
        self.profile_scroll = 0;
        self.input_mode = InputMode::Normal;
        self.prefs.load_profile();
    }

    pub fn request_personalized(&mut self) {
        if self.prefs.recommendations_loading {
            return;
        }
        self.prefs.request_recommendations(None, None);
        self.status_msg = "Fetching personalized recommendations...".to_string();
    }

    // ── List navigation ──

    /// Update page size based on terminal height.
    pub fn update_page_size(&mut self, terminal_height: u16) {
        let new_size = terminal_height.saturating_sub(LIST_OVERHEAD) as usize;
        self.page_size = new_size.max(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.display().items.len();
        if self.list_selected >= len {
            self.list_selected = len.saturating_sub(1);
        }
    }

    pub fn list_next(&mut self) {
        if self.list_selected + 1 < self.display().items.len() {
            self.list_selected += 1;
        }
    }

    pub fn list_prev(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn list_page_down(&mut self) {
        let last = self.display().items.len().saturating_sub(1);
        self.list_selected = (self.list_selected + self.page_size).min(last);
    }

    pub fn list_page_up(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(self.page_size);
    }

    pub fn scroll_down(&mut self) {
        self.profile_scroll = self.profile_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.profile_scroll = self.profile_scroll.saturating_sub(1);
    }

    /// Wait for the next background event and apply it.
    #[cfg(test)]
    pub(crate) async fn next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::api::types::ChatReply;
    use crate::identity::IdentityStore;
    use crate::models::sample_item;
    use std::time::Duration;

    fn test_app(api: Arc<FakeApi>) -> App {
        App::new(api, &Settings::default(), "user_1_test".to_string())
    }

    fn picks() -> AiPicks {
        AiPicks {
            response: "Here you go".to_string(),
            items: vec![sample_item(1, "Kahaani")],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_then_ai_clears_search() {
        let api = Arc::new(FakeApi::new());
        let mut app = test_app(api.clone());

        app.set_search_query("batman".to_string());
        assert_eq!(app.mode, DisplayMode::Normal);
        assert!(app.search.has_pending_timer());

        app.enter_ai(picks());
        assert_eq!(app.mode, DisplayMode::Ai);
        assert!(app.search_query.is_empty());
        assert!(!app.search.has_pending_timer());
        assert_eq!(app.display().items.len(), 1);

        tokio::time::sleep(Duration::from_secs(1)).await;
        app.drain_events();
        assert!(api.search_queries().is_empty());
        assert_eq!(app.mode, DisplayMode::Ai);
    }

    #[tokio::test]
    async fn test_ai_then_personalized_replaces_ai() {
        let api = Arc::new(FakeApi::new());
        let mut app = test_app(api);

        app.enter_ai(picks());
        app.prefs.personalized = vec![sample_item(2, "Dangal"), sample_item(3, "PK")];
        app.enter_personalized();
        assert_eq!(app.mode, DisplayMode::Personalized);
        assert_eq!(app.display().items.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_leaves_ai_mode_then_search_starts() {
        let api = Arc::new(FakeApi::with_content(vec![sample_item(6, "Dune")]));
        let mut app = test_app(api.clone());

        app.enter_ai(picks());
        app.set_search_query("dune".to_string());
        assert_eq!(app.mode, DisplayMode::Normal);
        assert!(app.mode.shows_filters());

        while app.mode != DisplayMode::Search || app.search.loading {
            assert!(app.next_event().await);
        }
        assert_eq!(api.search_queries(), vec!["dune".to_string()]);
        assert_eq!(app.display().items[0].title, "Dune");
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_then_personalized_clears_search() {
        let api = Arc::new(FakeApi::with_content(vec![sample_item(7, "Batman")]));
        let mut app = test_app(api.clone());

        app.set_search_query("batman".to_string());
        while app.mode != DisplayMode::Search || app.search.loading {
            assert!(app.next_event().await);
        }
        assert!(!app.search.results.is_empty());

        app.set_search_query("batman b".to_string());
        assert!(app.search.has_pending_timer());

        app.prefs.personalized = vec![sample_item(2, "Dangal")];
        app.enter_personalized();
        assert_eq!(app.mode, DisplayMode::Personalized);
        assert!(app.search_query.is_empty());
        assert!(app.search.results.is_empty());
        assert!(!app.search.has_pending_timer());

        tokio::time::sleep(Duration::from_secs(1)).await;
        app.drain_events();
        assert_eq!(api.search_queries(), vec!["batman".to_string()]);
        assert_eq!(app.mode, DisplayMode::Personalized);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_returns_to_normal() {
        let api = Arc::new(FakeApi::new());
        let mut app = test_app(api);

        app.set_search_query("du".to_string());
        assert_eq!(app.mode, DisplayMode::Normal);
        while app.mode != DisplayMode::Search {
            assert!(app.next_event().await);
        }
        app.set_search_query("d".to_string());
        assert_eq!(app.mode, DisplayMode::Normal);
        assert!(app.mode.shows_filters());
    }

    #[tokio::test]
    async fn test_back_to_browse_refetches_after_ai() {
        let api = Arc::new(FakeApi::with_content(vec![sample_item(5, "RRR")]));
        let mut app = test_app(api.clone());
        app.init();
        while app.content.loading || app.prefs.profile_loading {
            assert!(app.next_event().await);
        }

        app.enter_ai(picks());
        app.back_to_browse();
        assert_eq!(app.mode, DisplayMode::Normal);
        assert!(app.content.loading);
        while app.content.loading {
            assert!(app.next_event().await);
        }
        assert_eq!(api.discover_calls().len(), 2);
        assert_eq!(app.display().items[0].title, "RRR");
    }

    #[tokio::test]
    async fn test_filter_cycle_refetches_in_normal_mode_only() {
        let api = Arc::new(FakeApi::new());
        let mut app = test_app(api.clone());
        app.init();

        app.filter_focus = FilterField::Genre;
        app.cycle_filter(true);
        assert_eq!(app.filters.genre, Some(options::Genre::Comedy));
        while app.content.loading {
            assert!(app.next_event().await);
        }
        assert_eq!(api.discover_calls().len(), 2);
        assert_eq!(api.discover_calls()[1].genre, options::Genre::Comedy);

        app.enter_personalized();
        app.cycle_filter(true);
        assert_eq!(app.filters.genre, Some(options::Genre::Comedy));
    }

    #[tokio::test]
    async fn test_chat_reply_with_picks_enters_ai_mode() {
        let api = Arc::new(FakeApi::new());
        *api.chat_reply.lock().unwrap() = Some(ChatReply {
            ai_response: "Two thrillers".to_string(),
            recommendations: vec![sample_item(8, "Andhadhun"), sample_item(9, "Talaash")],
            ..ChatReply::default()
        });
        let mut app = test_app(api);
        app.set_search_query("thril".to_string());

        app.toggle_chat();
        assert_eq!(app.input_mode, InputMode::Chat);
        app.chat_input = "suggest thrillers".to_string();
        app.send_chat();
        assert!(app.chat_input.is_empty());

        loop {
            assert!(app.next_event().await);
            if app.mode == DisplayMode::Ai {
                break;
            }
        }
        assert_eq!(app.ai_picks.response, "Two thrillers");
        assert_eq!(app.display().items.len(), 2);
        assert!(app.search_query.is_empty());
    }

    #[tokio::test]
    async fn test_empty_personalized_result_keeps_mode() {
        let api = Arc::new(FakeApi::new());
        let mut app = test_app(api);

        app.request_personalized();
        loop {
            assert!(app.next_event().await);
            if !app.prefs.recommendations_loading {
                break;
            }
        }
        assert_eq!(app.mode, DisplayMode::Normal);
        assert!(app.status_msg.contains("No personalized"));
    }

    #[tokio::test]
    async fn test_personalized_result_switches_to_browse() {
        let api = Arc::new(FakeApi::new());
        *api.recommendations.lock().unwrap() = vec![sample_item(4, "Lagaan")];
        let mut app = test_app(api);
        app.view = View::Profile;

        app.request_personalized();
        loop {
            assert!(app.next_event().await);
            if !app.prefs.recommendations_loading {
                break;
            }
        }
        assert_eq!(app.mode, DisplayMode::Personalized);
        assert_eq!(app.view, View::Browse);
    }

    #[tokio::test]
    async fn test_action_menu_records_selected_item() {
        let api = Arc::new(FakeApi::new());
        let mut app = test_app(api.clone());
        app.enter_ai(picks());

        app.open_action_menu();
        if let Some(menu) = app.action_menu.as_mut() {
            menu.selected = 3;
            menu.rating = Some(4);
        }
        app.confirm_action_menu();
        assert!(app.action_menu.is_none());

        loop {
            assert!(app.next_event().await);
            if app.status_msg.starts_with("Watched") {
                break;
            }
        }
        let recorded: Vec<_> = api
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                crate::api::fake::Call::Interaction(r) => Some((r.title, r.action, r.rating)),
                _ => None,
            })
            .collect();
        assert_eq!(
            recorded,
            vec![("Kahaani".to_string(), InteractionAction::Watched, Some(4.0))]
        );
    }

    #[tokio::test]
    async fn test_action_menu_keeps_title_when_grid_changes() {
        let api = Arc::new(FakeApi::with_content(vec![sample_item(5, "RRR")]));
        let mut app = test_app(api.clone());
        app.init();
        while app.content.loading || app.prefs.profile_loading {
            assert!(app.next_event().await);
        }

        app.open_action_menu();
        if let Some(menu) = app.action_menu.as_mut() {
            menu.rating = Some(5);
        }
        app.handle_event(AppEvent::ChatReplied {
            generation: 0,
            result: Ok(ChatReply {
                ai_response: "One thriller".to_string(),
                recommendations: vec![sample_item(9, "Talaash")],
                ..ChatReply::default()
            }),
        });
        assert_eq!(app.mode, DisplayMode::Ai);
        assert_eq!(app.selected_item().map(|i| i.title.as_str()), Some("Talaash"));

        app.confirm_action_menu();
        while !app.status_msg.starts_with("Like ") {
            assert!(app.next_event().await);
        }
        let recorded: Vec<_> = api
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                crate::api::fake::Call::Interaction(r) => Some((r.title, r.rating)),
                _ => None,
            })
            .collect();
        assert_eq!(recorded, vec![("RRR".to_string(), Some(5.0))]);
    }

    #[tokio::test]
    async fn test_rating_dropped_for_dislike() {
        let api = Arc::new(FakeApi::new());
        let mut app = test_app(api.clone());
        app.enter_ai(picks());

        app.open_action_menu();
        if let Some(menu) = app.action_menu.as_mut() {
            menu.rating = Some(3);
            menu.selected = 1;
            assert_eq!(menu.action(), InteractionAction::Disliked);
            assert_eq!(menu.effective_rating(), None);
        }
        app.confirm_action_menu();
        while !app.status_msg.starts_with("Dislike ") {
            assert!(app.next_event().await);
        }
        let ratings: Vec<_> = api
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                crate::api::fake::Call::Interaction(r) => Some(r.rating),
                _ => None,
            })
            .collect();
        assert_eq!(ratings, vec![None]);
    }

    #[tokio::test]
    async fn test_list_navigation_is_bounded() {
        let api = Arc::new(FakeApi::new());
        let mut app = test_app(api);
        app.enter_ai(AiPicks {
            response: String::new(),
            items: (0..30).map(|i| sample_item(i, "T")).collect(),
        });
        app.update_page_size(31);
        assert_eq!(app.page_size, 11);
        app.update_page_size(LIST_OVERHEAD);
        assert_eq!(app.page_size, 1);

        app.list_prev();
        assert_eq!(app.list_selected, 0);
        app.list_page_down();
        app.list_page_down();
        app.list_page_down();
        assert_eq!(app.list_selected, 29);
        app.list_next();
        assert_eq!(app.list_selected, 29);
        app.list_page_up();
        assert_eq!(app.list_selected, 18);
    }

    #[tokio::test]
    async fn test_fresh_start_shows_no_profile() {
        use ratatui::{Terminal, backend::TestBackend};

        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path().join("movie_app_user_id"));
        let user_id = store.load_or_create().unwrap();
        assert!(user_id.starts_with("user_"));
        assert!(store.path().exists());

        let api = Arc::new(FakeApi::new());
        let mut app = App::new(api.clone(), &Settings::default(), user_id.clone());
        app.init();
        while app.prefs.profile_loading || app.content.loading {
            assert!(app.next_event().await);
        }
        assert!(app.prefs.profile.is_none());
        assert!(!app.prefs.has_preferences());
        assert_eq!(api.profile_calls(), 1);

        app.view = View::Profile;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| crate::ui::render(&app, frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("No Profile Found"));
        assert!(text.contains(&user_id[..12]));
    }
}

use crate::api::RecommenderApi;
use crate::events::{AppEvent, EventSender};
use crate::error::ApiResult;
use crate::models::{CompleteFilters, ContentItem, Filters};
use std::sync::Arc;

/// Discover results for the normal browse mode.
pub struct ContentFeed {
    api: Arc<dyn RecommenderApi>,
    events: EventSender,
    requested: Option<CompleteFilters>,

    pub items: Vec<ContentItem>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ContentFeed {
    pub fn new(api: Arc<dyn RecommenderApi>, events: EventSender) -> Self {
        Self {
            api,
            events,
            requested: None,
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Reconcile with the current filters; `None` while another mode is shown.
    ///
    /// Fetches only for a complete tuple that differs from the last one
    /// requested. Returns whether a request was issued.
    pub fn sync(&mut self, filters: Option<&Filters>) -> bool {
        let Some(complete) = filters.and_then(Filters::complete) else {
            self.requested = None;
            return false;
        };
        if self.requested == Some(complete) {
            return false;
        }
        self.fetch(complete);
        true
    }

    /// Re-issue the last requested tuple.
    pub fn refetch(&mut self) -> bool {
        match self.requested {
            Some(filters) => {
                self.fetch(filters);
                true
            }
            None => false,
        }
    }

    fn fetch(&mut self, filters: CompleteFilters) {
        self.requested = Some(filters);
        self.loading = true;
        self.error = None;
        tracing::info!(
            language = filters.language.id(),
            genre = filters.genre.id(),
            content_type = filters.content_type.id(),
            release_period = filters.release_period.id(),
            "Fetching discover content"
        );

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.discover(&filters).await;
            let _ = events.send(AppEvent::ContentLoaded { filters, result });
        });
    }

    /// Returns true when the result matches the latest request.
    pub fn apply(&mut self, filters: CompleteFilters, result: ApiResult<Vec<ContentItem>>) -> bool {
        if self.requested != Some(filters) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching content");
                self.error = Some(format!("Failed to fetch content: {}", e.user_message()));
                self.items.clear();
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::events::{self, EventReceiver};
    use crate::models::sample_item;
    use crate::options::{ContentKind, Genre, Language, ReleasePeriod};
    use proptest::prelude::*;

    fn feed_with(api: Arc<FakeApi>) -> (ContentFeed, EventReceiver) {
        let (tx, rx) = events::channel();
        (ContentFeed::new(api, tx), rx)
    }

    async fn settle(feed: &mut ContentFeed, rx: &mut EventReceiver) {
        match rx.recv().await {
            Some(AppEvent::ContentLoaded { filters, result }) => {
                feed.apply(filters, result);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_one_request_per_filter_change() {
        let api = Arc::new(FakeApi::with_content(vec![sample_item(1, "Hera Pheri")]));
        let (mut feed, mut rx) = feed_with(api.clone());

        let mut filters = Filters {
            language: Some(Language::English),
            genre: Some(Genre::Comedy),
            content_type: Some(ContentKind::Movie),
            release_period: Some(ReleasePeriod::OneYear),
        };
        assert!(feed.sync(Some(&filters)));
        assert!(feed.loading);
        settle(&mut feed, &mut rx).await;
        assert!(!feed.sync(Some(&filters)));

        filters.release_period = Some(ReleasePeriod::TwoYears);
        assert!(feed.sync(Some(&filters)));
        settle(&mut feed, &mut rx).await;

        let calls = api.discover_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].genre, Genre::Comedy);
        assert_eq!(calls[0].language, Language::English);
        assert_eq!(calls[0].content_type, ContentKind::Movie);
        assert_eq!(calls[0].release_period, ReleasePeriod::OneYear);
        assert_eq!(calls[1].release_period, ReleasePeriod::TwoYears);
        assert_eq!(feed.items.len(), 1);
        assert!(!feed.loading);
    }

    #[tokio::test]
    async fn test_failure_clears_content() {
        let api = Arc::new(FakeApi::failing());
        let (mut feed, mut rx) = feed_with(api);
        feed.items = vec![sample_item(1, "Stale")];

        feed.sync(Some(&Filters::default()));
        settle(&mut feed, &mut rx).await;
        assert!(feed.items.is_empty());
        assert!(feed.error.is_some());
        assert!(!feed.loading);
    }

    #[tokio::test]
    async fn test_leaving_normal_mode_forgets_tuple() {
        let api = Arc::new(FakeApi::new());
        let (mut feed, mut rx) = feed_with(api.clone());
        let filters = Filters::default();

        feed.sync(Some(&filters));
        settle(&mut feed, &mut rx).await;
        assert!(!feed.sync(None));
        assert!(feed.sync(Some(&filters)));
        settle(&mut feed, &mut rx).await;
        assert_eq!(api.discover_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_result_is_ignored() {
        let api = Arc::new(FakeApi::new());
        let (mut feed, _rx) = feed_with(api);
        let first = Filters::default();
        let second = Filters {
            genre: Some(Genre::Horror),
            ..first
        };
        feed.sync(Some(&first));
        feed.sync(Some(&second));

        let stale = first.complete().unwrap();
        assert!(!feed.apply(stale, Ok(vec![sample_item(1, "Old")])));
        assert!(feed.items.is_empty());
        assert!(feed.loading);
    }

    fn incomplete_filters() -> impl Strategy<Value = Filters> {
        (
            proptest::option::of(proptest::sample::select(Language::ALL.to_vec())),
            proptest::option::of(proptest::sample::select(Genre::ALL.to_vec())),
            proptest::option::of(proptest::sample::select(ContentKind::ALL.to_vec())),
            proptest::option::of(proptest::sample::select(ReleasePeriod::ALL.to_vec())),
        )
            .prop_map(|(language, genre, content_type, release_period)| Filters {
                language,
                genre,
                content_type,
                release_period,
            })
            .prop_filter("at least one field missing", |f| f.complete().is_none())
    }

    proptest! {
        #[test]
        fn prop_incomplete_filters_issue_no_request(filters in incomplete_filters()) {
            let api = Arc::new(FakeApi::new());
            let (mut feed, _rx) = feed_with(api.clone());
            prop_assert!(!feed.sync(Some(&filters)));
            prop_assert!(!feed.loading);
            prop_assert!(api.calls().is_empty());
        }
    }
}

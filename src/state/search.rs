use crate::api::RecommenderApi;
use crate::events::{AppEvent, EventSender};
use crate::error::ApiResult;
use crate::models::ContentItem;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// What a keystroke did to the search slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryChange {
    /// A search is pending behind the debounce timer
    Scheduled,
    /// Query too short; search state was reset
    Cleared,
}

/// The trimmed query if it is long enough to be sent.
pub fn searchable_query(query: &str, min_length: usize) -> Option<&str> {
    let trimmed = query.trim();
    (trimmed.chars().count() >= min_length).then_some(trimmed)
}

/// Debounced global search.
///
/// The pending timer is owned here; a new keystroke aborts it. Once the timer
/// has fired the HTTP call runs in its own task and is never cancelled, but
/// its result is dropped if a newer request or a clear happened meanwhile.
pub struct GlobalSearch {
    api: Arc<dyn RecommenderApi>,
    events: EventSender,
    debounce: Duration,
    min_length: usize,
    timer: Option<JoinHandle<()>>,
    seq: u64,

    pub results: Vec<ContentItem>,
    pub loading: bool,
    pub query: String,
}

impl GlobalSearch {
    pub fn new(
        api: Arc<dyn RecommenderApi>,
        events: EventSender,
        debounce: Duration,
        min_length: usize,
    ) -> Self {
        Self {
            api,
            events,
            debounce,
            min_length,
            timer: None,
            seq: 0,
            results: Vec::new(),
            loading: false,
            query: String::new(),
        }
    }

    pub fn on_query_changed(&mut self, query: &str) -> QueryChange {
        self.cancel_timer();

        let Some(trimmed) = searchable_query(query, self.min_length) else {
            self.clear();
            return QueryChange::Cleared;
        };

        self.seq += 1;
        let seq = self.seq;
        let query = trimmed.to_string();
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let delay = self.debounce;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if events
                .send(AppEvent::SearchStarted {
                    seq,
                    query: query.clone(),
                })
                .is_err()
            {
                return;
            }
            tokio::spawn(async move {
                let result = api.search(&query).await;
                let _ = events.send(AppEvent::SearchFinished { seq, result });
            });
        }));

        QueryChange::Scheduled
    }

    /// Returns true when the started request is the current one.
    pub fn apply_started(&mut self, seq: u64, query: &str) -> bool {
        if seq != self.seq {
            return false;
        }
        self.timer = None;
        self.loading = true;
        self.query = query.to_string();
        tracing::debug!(query, "Search request outstanding");
        true
    }

    /// Returns true when the result was accepted.
    pub fn apply_finished(&mut self, seq: u64, result: ApiResult<Vec<ContentItem>>) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, current = self.seq, "Dropping superseded search result");
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                tracing::info!(query = %self.query, count = items.len(), "Search finished");
                self.results = items;
            }
            Err(e) => {
                tracing::error!(query = %self.query, error = %e, "Global search failed");
                self.results.clear();
            }
        }
        true
    }

    /// Drop pending and outstanding work and reset results.
    pub fn clear(&mut self) {
        self.cancel_timer();
        self.seq += 1;
        self.results.clear();
        self.loading = false;
        self.query.clear();
    }

    pub fn has_pending_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for GlobalSearch {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::events;
    use crate::models::sample_item;
    use proptest::prelude::*;

    fn search_with(api: Arc<FakeApi>) -> (GlobalSearch, crate::events::EventReceiver) {
        let (tx, rx) = events::channel();
        let search = GlobalSearch::new(api, tx, Duration::from_millis(500), 2);
        (search, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_within_window_fire_once() {
        let api = Arc::new(FakeApi::with_content(vec![sample_item(1, "Batman Begins")]));
        let (mut search, mut rx) = search_with(api.clone());

        assert_eq!(search.on_query_changed("batma"), QueryChange::Scheduled);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(search.on_query_changed("batman"), QueryChange::Scheduled);

        let (seq, query) = match rx.recv().await {
            Some(AppEvent::SearchStarted { seq, query }) => (seq, query),
            other => panic!("unexpected event: {:?}", other),
        };
        assert_eq!(query, "batman");
        assert!(search.apply_started(seq, &query));
        assert!(search.loading);

        match rx.recv().await {
            Some(AppEvent::SearchFinished { seq, result }) => {
                assert!(search.apply_finished(seq, result));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(!search.loading);
        assert_eq!(search.results.len(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(api.search_queries(), vec!["batman".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_pauses_fire_separately() {
        let api = Arc::new(FakeApi::new());
        let (mut search, mut rx) = search_with(api.clone());

        search.on_query_changed("dune");
        tokio::time::sleep(Duration::from_millis(600)).await;
        search.on_query_changed("dune 2");
        tokio::time::sleep(Duration::from_millis(600)).await;

        let mut started = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::SearchStarted { query, .. } = event {
                started.push(query);
            }
        }
        assert_eq!(started, vec!["dune".to_string(), "dune 2".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_clears_and_cancels_pending() {
        let api = Arc::new(FakeApi::new());
        let (mut search, mut rx) = search_with(api.clone());
        search.results = vec![sample_item(1, "Old")];

        search.on_query_changed("bat");
        assert!(search.has_pending_timer());
        assert_eq!(search.on_query_changed("b"), QueryChange::Cleared);
        assert!(!search.has_pending_timer());
        assert!(search.results.is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
        assert!(api.search_queries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_after_clear_is_dropped() {
        let api = Arc::new(FakeApi::with_content(vec![sample_item(1, "Up")]));
        let (mut search, mut rx) = search_with(api);

        search.on_query_changed("up!");
        let Some(AppEvent::SearchStarted { seq, query }) = rx.recv().await else {
            panic!("expected search start");
        };
        assert!(search.apply_started(seq, &query));
        search.clear();
        assert!(!search.loading);

        let Some(AppEvent::SearchFinished { seq, result }) = rx.recv().await else {
            panic!("expected search result");
        };
        assert!(!search.apply_finished(seq, result));
        assert!(search.results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_empties_results() {
        let api = Arc::new(FakeApi::failing());
        let (mut search, mut rx) = search_with(api);
        search.results = vec![sample_item(9, "Stale")];

        search.on_query_changed("matrix");
        let Some(AppEvent::SearchStarted { seq, query }) = rx.recv().await else {
            panic!("expected search start");
        };
        search.apply_started(seq, &query);
        let Some(AppEvent::SearchFinished { seq, result }) = rx.recv().await else {
            panic!("expected search result");
        };
        assert!(search.apply_finished(seq, result));
        assert!(search.results.is_empty());
        assert!(!search.loading);
    }

    proptest! {
        #[test]
        fn prop_short_queries_are_not_searchable(q in "\\s{0,3}[a-zA-Z0-9]?\\s{0,3}") {
            prop_assert!(searchable_query(&q, 2).is_none());
        }

        #[test]
        fn prop_long_queries_are_trimmed(core in "[a-z]{2,12}", pad in "\\s{0,3}") {
            let q = format!("{pad}{core}{pad}");
            prop_assert_eq!(searchable_query(&q, 2), Some(core.as_str()));
        }
    }
}

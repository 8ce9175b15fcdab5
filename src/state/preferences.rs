use crate::api::RecommenderApi;
use crate::api::types::{InteractionRecord, RecommendationRequest, RecommendationResponse};
use crate::events::{AppEvent, EventSender};
use crate::error::ApiResult;
use crate::models::{ContentItem, InteractionAction, UserProfile};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Identity, profile and personalized recommendations for the current user.
///
/// Interaction writes go through a single writer task so they reach the
/// backend in order. The writer owns the profile refresh timer: it restarts
/// after every write and fires `ProfileRefreshDue` once writes go quiet.
pub struct UserPreferences {
    api: Arc<dyn RecommenderApi>,
    events: EventSender,
    user_id: String,
    writes: UnboundedSender<InteractionRecord>,
    recommendation_limit: u32,
    profile_seq: u64,

    pub profile: Option<UserProfile>,
    pub profile_loading: bool,
    pub personalized: Vec<ContentItem>,
    pub personalization_level: String,
    pub recommendations_loading: bool,
}

impl UserPreferences {
    pub fn new(
        api: Arc<dyn RecommenderApi>,
        events: EventSender,
        user_id: String,
        refresh_delay: Duration,
        recommendation_limit: u32,
    ) -> Self {
        let (writes, jobs) = unbounded_channel();
        tokio::spawn(run_writer(
            Arc::clone(&api),
            events.clone(),
            jobs,
            refresh_delay,
        ));

        Self {
            api,
            events,
            user_id,
            writes,
            recommendation_limit,
            profile_seq: 0,
            profile: None,
            profile_loading: false,
            personalized: Vec::new(),
            personalization_level: "none".to_string(),
            recommendations_loading: false,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn has_preferences(&self) -> bool {
        self.profile.as_ref().is_some_and(UserProfile::has_preferences)
    }

    pub fn action_for(&self, item: &ContentItem) -> Option<InteractionAction> {
        self.profile.as_ref().and_then(|p| p.action_for(item))
    }

    pub fn load_profile(&mut self) {
        self.profile_seq += 1;
        self.profile_loading = true;

        let seq = self.profile_seq;
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let user_id = self.user_id.clone();
        tokio::spawn(async move {
            let result = api.user_profile(&user_id).await;
            let _ = events.send(AppEvent::ProfileLoaded { seq, result });
        });
    }

    /// Returns true when the result belongs to the latest load.
    pub fn apply_profile(&mut self, seq: u64, result: ApiResult<Option<UserProfile>>) -> bool {
        if seq != self.profile_seq {
            return false;
        }
        self.profile_loading = false;
        self.profile = match result {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "Profile fetch failed, treating as no profile");
                None
            }
        };
        true
    }

    /// Queue an interaction write. The outcome arrives as `InteractionRecorded`.
    pub fn record(&self, item: &ContentItem, action: InteractionAction, rating: Option<f64>) {
        let record = InteractionRecord::new(&self.user_id, item, action, rating);
        tracing::debug!(content_id = item.id, action = action.as_str(), "Queueing interaction");
        if self.writes.send(record).is_err() {
            tracing::error!("Interaction writer is gone");
        }
    }

    pub fn request_recommendations(&mut self, mood: Option<String>, specific_request: Option<String>) {
        self.recommendations_loading = true;

        let request = RecommendationRequest {
            user_id: self.user_id.clone(),
            limit: self.recommendation_limit,
            exclude_seen: true,
            mood,
            specific_request,
        };
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.recommendations(&request).await;
            let _ = events.send(AppEvent::RecommendationsLoaded { result });
        });
    }

    /// Store the recommendations and return how many arrived.
    pub fn apply_recommendations(&mut self, result: ApiResult<RecommendationResponse>) -> usize {
        self.recommendations_loading = false;
        let response = result.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Error getting personalized recommendations");
            RecommendationResponse::default()
        });
        tracing::info!(
            count = response.recommendations.len(),
            level = %response.personalization_level,
            algorithm = response.algorithm.as_deref().unwrap_or("unknown"),
            total_found = response.total_found.unwrap_or(0),
            "Personalized recommendations loaded"
        );
        self.personalized = response.recommendations;
        self.personalization_level = response.personalization_level;
        self.personalized.len()
    }
}

async fn run_writer(
    api: Arc<dyn RecommenderApi>,
    events: EventSender,
    mut jobs: UnboundedReceiver<InteractionRecord>,
    refresh_delay: Duration,
) {
    let mut refresh_pending = false;
    loop {
        let next = if refresh_pending {
            match tokio::time::timeout(refresh_delay, jobs.recv()).await {
                Ok(job) => job,
                Err(_) => {
                    refresh_pending = false;
                    if events.send(AppEvent::ProfileRefreshDue).is_err() {
                        return;
                    }
                    continue;
                }
            }
        } else {
            jobs.recv().await
        };
        let Some(record) = next else {
            return;
        };

        let success = match api.record_interaction(&record).await {
            Ok(()) => {
                tracing::info!(
                    content_id = record.content_id,
                    action = record.action.as_str(),
                    "Interaction recorded"
                );
                true
            }
            Err(e) => {
                tracing::error!(content_id = record.content_id, error = %e, "Error recording interaction");
                false
            }
        };
        let _ = events.send(AppEvent::InteractionRecorded {
            action: record.action,
            title: record.title,
            success,
        });
        refresh_pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::events::{self, EventReceiver};
    use crate::models::sample_item;

    fn prefs_with(api: Arc<FakeApi>) -> (UserPreferences, EventReceiver) {
        let (tx, rx) = events::channel();
        let prefs = UserPreferences::new(
            api,
            tx,
            "user_1_abc".to_string(),
            Duration::from_millis(500),
            15,
        );
        (prefs, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_write_still_schedules_refresh() {
        let api = Arc::new(FakeApi::failing());
        let (prefs, mut rx) = prefs_with(api);

        prefs.record(&sample_item(7, "Jawan"), InteractionAction::Liked, None);
        match rx.recv().await {
            Some(AppEvent::InteractionRecorded { success, title, .. }) => {
                assert!(!success);
                assert_eq!(title, "Jawan");
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(matches!(rx.recv().await, Some(AppEvent::ProfileRefreshDue)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_writes_share_one_refresh() {
        let api = Arc::new(FakeApi::new());
        let (prefs, mut rx) = prefs_with(api.clone());

        prefs.record(&sample_item(1, "A"), InteractionAction::Liked, None);
        prefs.record(&sample_item(1, "A"), InteractionAction::Watched, Some(4.5));

        let mut recorded = 0;
        loop {
            match rx.recv().await {
                Some(AppEvent::InteractionRecorded { success, .. }) => {
                    assert!(success);
                    recorded += 1;
                }
                Some(AppEvent::ProfileRefreshDue) => break,
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(recorded, 2);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());

        let actions: Vec<InteractionAction> = api
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Interaction(r) => Some(r.action),
                _ => None,
            })
            .collect();
        assert_eq!(actions, vec![InteractionAction::Liked, InteractionAction::Watched]);
    }

    #[tokio::test]
    async fn test_missing_profile_has_no_preferences() {
        let api = Arc::new(FakeApi::new());
        let (mut prefs, mut rx) = prefs_with(api.clone());

        prefs.load_profile();
        assert!(prefs.profile_loading);
        let Some(AppEvent::ProfileLoaded { seq, result }) = rx.recv().await else {
            panic!("expected profile event");
        };
        assert!(prefs.apply_profile(seq, result));
        assert!(prefs.profile.is_none());
        assert!(!prefs.has_preferences());
        assert_eq!(api.profile_calls(), 1);
    }

    #[tokio::test]
    async fn test_has_preferences_follows_genres() {
        let api = Arc::new(FakeApi::new());
        let mut profile = UserProfile::default();
        profile.profile.preferred_genres = vec!["Action".to_string()];
        *api.profile.lock().unwrap() = Some(profile);
        let (mut prefs, mut rx) = prefs_with(api);

        prefs.load_profile();
        let Some(AppEvent::ProfileLoaded { seq, result }) = rx.recv().await else {
            panic!("expected profile event");
        };
        prefs.apply_profile(seq, result);
        assert!(prefs.has_preferences());
    }

    #[tokio::test]
    async fn test_profile_failure_degrades_to_none() {
        let api = Arc::new(FakeApi::failing());
        let (mut prefs, _rx) = prefs_with(api);
        prefs.profile = Some(UserProfile::default());
        prefs.load_profile();

        let err = crate::error::ApiError::Status {
            status: 500,
            endpoint: "/user/x/profile".to_string(),
        };
        assert!(!prefs.apply_profile(0, Ok(None)));
        assert!(prefs.apply_profile(1, Err(err)));
        assert!(prefs.profile.is_none());
        assert!(!prefs.profile_loading);
    }

    #[tokio::test]
    async fn test_recommendation_request_shape() {
        let api = Arc::new(FakeApi::new());
        *api.recommendations.lock().unwrap() = vec![sample_item(3, "Dangal")];
        let (mut prefs, mut rx) = prefs_with(api.clone());

        prefs.request_recommendations(Some("happy".to_string()), None);
        assert!(prefs.recommendations_loading);
        let Some(AppEvent::RecommendationsLoaded { result }) = rx.recv().await else {
            panic!("expected recommendations event");
        };
        assert_eq!(prefs.apply_recommendations(result), 1);
        assert_eq!(prefs.personalization_level, "high");
        assert!(!prefs.recommendations_loading);

        assert_eq!(
            api.calls(),
            vec![Call::Recommendations(RecommendationRequest {
                user_id: "user_1_abc".to_string(),
                limit: 15,
                exclude_seen: true,
                mood: Some("happy".to_string()),
                specific_request: None,
            })]
        );
    }

    #[tokio::test]
    async fn test_recommendation_failure_is_empty() {
        let api = Arc::new(FakeApi::failing());
        let (mut prefs, mut rx) = prefs_with(api);
        prefs.personalized = vec![sample_item(1, "Old")];

        prefs.request_recommendations(None, None);
        let Some(AppEvent::RecommendationsLoaded { result }) = rx.recv().await else {
            panic!("expected recommendations event");
        };
        assert_eq!(prefs.apply_recommendations(result), 0);
        assert!(prefs.personalized.is_empty());
        assert_eq!(prefs.personalization_level, "none");
    }
}

use crate::api::types::{ChatReply, RecommendationResponse};
use crate::error::ApiResult;
use crate::models::{CompleteFilters, ContentItem, InteractionAction, UserProfile};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Results posted by background tasks back to the UI loop.
///
/// Tasks never touch application state directly; the loop drains these and
/// hands each one to the state slice that issued the request.
#[derive(Debug)]
pub enum AppEvent {
    /// Discover request finished for the given filter tuple
    ContentLoaded {
        filters: CompleteFilters,
        result: ApiResult<Vec<ContentItem>>,
    },

    /// Debounce timer elapsed and the search request is now outstanding
    SearchStarted { seq: u64, query: String },

    /// Search request finished
    SearchFinished {
        seq: u64,
        result: ApiResult<Vec<ContentItem>>,
    },

    /// Assistant turn finished
    ChatReplied {
        generation: u64,
        result: ApiResult<ChatReply>,
    },

    /// Profile fetch finished
    ProfileLoaded {
        seq: u64,
        result: ApiResult<Option<UserProfile>>,
    },

    /// Interaction write finished
    InteractionRecorded {
        action: InteractionAction,
        title: String,
        success: bool,
    },

    /// Quiet period after the last interaction write elapsed
    ProfileRefreshDue,

    /// Personalized recommendation request finished
    RecommendationsLoaded {
        result: ApiResult<RecommendationResponse>,
    },
}

pub type EventSender = UnboundedSender<AppEvent>;
pub type EventReceiver = UnboundedReceiver<AppEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

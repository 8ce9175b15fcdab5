//! Typed access to the recommendation backend.

mod http;
pub mod types;

pub use http::HttpApi;

use crate::error::ApiResult;
use crate::models::{CompleteFilters, ContentItem, UserProfile};
use types::{ChatReply, InteractionRecord, RecommendationRequest, RecommendationResponse};

pub mod endpoints {
    pub const DISCOVER: &str = "/discover";
    pub const SEARCH: &str = "/search";
    pub const AI_CHAT: &str = "/ai-chat";
    pub const INTERACTION: &str = "/user/interaction";
    pub const RECOMMENDATIONS: &str = "/user/recommendations";
    pub const HEALTH: &str = "/health";

    pub fn profile(user_id: &str) -> String {
        format!("/user/{}/profile", user_id)
    }
}

/// Backend operations used by the state slices.
///
/// Every call is a single JSON request/response. Non-2xx answers surface as
/// [`crate::error::ApiError`]; nothing is retried.
#[async_trait::async_trait]
pub trait RecommenderApi: Send + Sync {
    /// Filtered browse for the normal display mode.
    async fn discover(&self, filters: &CompleteFilters) -> ApiResult<Vec<ContentItem>>;

    /// Free-text search across all content.
    async fn search(&self, query: &str) -> ApiResult<Vec<ContentItem>>;

    /// One assistant turn. `context` is whatever the previous turn returned.
    async fn ai_chat(&self, message: &str, context: &serde_json::Value) -> ApiResult<ChatReply>;

    async fn record_interaction(&self, record: &InteractionRecord) -> ApiResult<()>;

    /// `Ok(None)` when the backend has no profile for the user.
    async fn user_profile(&self, user_id: &str) -> ApiResult<Option<UserProfile>>;

    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> ApiResult<RecommendationResponse>;

    async fn health(&self) -> ApiResult<()>;

    /// Base URL for display and logging
    fn base_url(&self) -> &str;
}

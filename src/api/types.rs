//! Request and response bodies for the backend endpoints.

use crate::models::{ContentItem, InteractionAction, MediaType};
use crate::options::{self, ContentKind, Genre, Language, ReleasePeriod};
use crate::models::CompleteFilters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoverRequest {
    pub prompt: String,
    pub genre: Genre,
    pub language: Language,
    pub content_type: ContentKind,
    pub release_period: ReleasePeriod,
}

impl From<&CompleteFilters> for DiscoverRequest {
    fn from(filters: &CompleteFilters) -> Self {
        Self {
            prompt: filters.prompt(),
            genre: filters.genre,
            language: filters.language,
            content_type: filters.content_type,
            release_period: filters.release_period,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

/// Response of both `/discover` and `/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub conversation_history: &'a serde_json::Value,
}

/// Response of `/ai-chat`. `conversation_context` is opaque and forwarded
/// verbatim on the next turn.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub ai_response: String,
    #[serde(default)]
    pub recommendations: Vec<ContentItem>,
    #[serde(default)]
    pub query_analysis: Option<serde_json::Value>,
    #[serde(default)]
    pub conversation_context: Option<serde_json::Value>,
}

/// Interaction enriched with the item metadata the backend aggregates on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionRecord {
    pub user_id: String,
    pub content_id: i64,
    pub content_type: MediaType,
    pub title: String,
    pub action: InteractionAction,
    pub rating: Option<f64>,
    pub genres: Vec<String>,
    pub language: String,
    pub release_date: String,
    pub tmdb_rating: f64,
    pub overview: String,
    pub popularity: f64,
    pub actors: Vec<String>,
    pub directors: Vec<String>,
}

impl InteractionRecord {
    pub fn new(
        user_id: &str,
        item: &ContentItem,
        action: InteractionAction,
        rating: Option<f64>,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            content_id: item.id,
            content_type: item.content_type,
            title: item.title.clone(),
            action,
            rating,
            genres: options::genre_names(&item.genre_ids, item.content_type == MediaType::Tv),
            language: item.original_language.clone().unwrap_or_else(|| "en".to_string()),
            release_date: item
                .release_date
                .clone()
                .or_else(|| item.first_air_date.clone())
                .unwrap_or_default(),
            tmdb_rating: item.rating,
            overview: item.overview.clone(),
            popularity: item.popularity,
            actors: Vec::new(),
            directors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRequest {
    pub user_id: String,
    pub limit: u32,
    pub exclude_seen: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_request: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub recommendations: Vec<ContentItem>,
    #[serde(default = "default_personalization_level")]
    pub personalization_level: String,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub total_found: Option<u64>,
}

fn default_personalization_level() -> String {
    "none".to_string()
}

impl Default for RecommendationResponse {
    fn default() -> Self {
        Self {
            recommendations: Vec::new(),
            personalization_level: default_personalization_level(),
            algorithm: None,
            total_found: None,
        }
    }
}

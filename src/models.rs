use crate::options::{ContentKind, Genre, Language, ReleasePeriod};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Media type discriminator sent by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Tv => "TV",
        }
    }
}

/// A streaming service an item is available on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingPlatform {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// A movie or show as returned by discover, search, chat and recommendation
/// endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i64,
    #[serde(default)]
    pub content_type: MediaType,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: f64,
    #[serde(default)]
    pub streaming_platforms: Vec<StreamingPlatform>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub popularity: f64,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub recommendation_reason: Option<String>,
}

impl ContentItem {
    pub fn key(&self) -> (i64, MediaType) {
        (self.id, self.content_type)
    }
}

// The backend sends year as a string but rating/popularity may arrive as
// null. Both deserializers accept the loose forms.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// A recorded user action against one content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAction {
    Liked,
    Disliked,
    Watchlisted,
    Watched,
}

impl InteractionAction {
    pub const ALL: [InteractionAction; 4] =
        [Self::Liked, Self::Disliked, Self::Watchlisted, Self::Watched];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Liked => "liked",
            Self::Disliked => "disliked",
            Self::Watchlisted => "watchlisted",
            Self::Watched => "watched",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Liked => "Like",
            Self::Disliked => "Dislike",
            Self::Watchlisted => "Watchlist",
            Self::Watched => "Watched",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Self::Liked => "♥",
            Self::Disliked => "✗",
            Self::Watchlisted => "★",
            Self::Watched => "✓",
        }
    }

    /// Only likes and watched marks carry a star rating.
    pub fn accepts_rating(self) -> bool {
        matches!(self, Self::Liked | Self::Watched)
    }
}

/// Four-field discover filter tuple. A field is `None` until chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Filters {
    pub language: Option<Language>,
    pub genre: Option<Genre>,
    pub content_type: Option<ContentKind>,
    pub release_period: Option<ReleasePeriod>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            language: Some(Language::Hindi),
            genre: Some(Genre::Action),
            content_type: Some(ContentKind::Both),
            release_period: Some(ReleasePeriod::SixMonths),
        }
    }
}

impl Filters {
    pub fn complete(&self) -> Option<CompleteFilters> {
        Some(CompleteFilters {
            language: self.language?,
            genre: self.genre?,
            content_type: self.content_type?,
            release_period: self.release_period?,
        })
    }
}

/// A filter tuple with every field set; the only form that may be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompleteFilters {
    pub language: Language,
    pub genre: Genre,
    pub content_type: ContentKind,
    pub release_period: ReleasePeriod,
}

impl CompleteFilters {
    pub fn prompt(&self) -> String {
        format!(
            "suggest {} {} in {}",
            self.genre.id(),
            self.content_type.description(),
            self.language.id()
        )
    }
}

/// Preference summary computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSummary {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub preferred_genres: Vec<String>,
    #[serde(default)]
    pub preferred_languages: Vec<String>,
    #[serde(default)]
    pub preferred_content_types: Vec<String>,
    #[serde(default)]
    pub liked_actors: Vec<String>,
    #[serde(default)]
    pub liked_directors: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    #[serde(default)]
    pub total_interactions: u64,
    #[serde(default)]
    pub liked_content: u64,
    #[serde(default)]
    pub watchlist_items: u64,
    #[serde(default)]
    pub watched_items: u64,
    #[serde(default)]
    pub genre_distribution: BTreeMap<String, u64>,
}

/// One entry of the profile's recent-activity list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub content_id: i64,
    #[serde(default)]
    pub content_type: MediaType,
    pub action: InteractionAction,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Read-only aggregate returned by `GET /user/{id}/profile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub profile: PreferenceSummary,
    #[serde(default)]
    pub stats: ProfileStats,
    #[serde(default)]
    pub recent_activity: Vec<ActivityEntry>,
    #[serde(default)]
    pub liked_content: Vec<ActivityEntry>,
}

impl UserProfile {
    /// The backend answers unknown users with an empty aggregate rather than 404.
    pub fn is_empty(&self) -> bool {
        self.profile == PreferenceSummary::default()
            && self.stats.total_interactions == 0
            && self.recent_activity.is_empty()
    }

    pub fn has_preferences(&self) -> bool {
        !self.profile.preferred_genres.is_empty()
    }

    /// Most recent recorded action for an item, if any.
    pub fn action_for(&self, item: &ContentItem) -> Option<InteractionAction> {
        self.recent_activity
            .iter()
            .find(|a| (a.content_id, a.content_type) == item.key())
            .map(|a| a.action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Ai,
}

/// One entry of the chat transcript.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Local>,
    pub recommendations: Vec<ContentItem>,
    pub query_analysis: Option<serde_json::Value>,
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Local::now(),
            recommendations: Vec::new(),
            query_analysis: None,
            is_error: false,
        }
    }

    pub fn ai(
        content: impl Into<String>,
        recommendations: Vec<ContentItem>,
        query_analysis: Option<serde_json::Value>,
    ) -> Self {
        Self {
            role: ChatRole::Ai,
            content: content.into(),
            timestamp: Local::now(),
            recommendations,
            query_analysis,
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::ai(content, Vec::new(), None)
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_item(id: i64, title: &str) -> ContentItem {
    ContentItem {
        id,
        content_type: MediaType::Movie,
        title: title.to_string(),
        year: "2024".to_string(),
        poster: None,
        rating: 7.5,
        streaming_platforms: Vec::new(),
        genre_ids: vec![28],
        overview: String::new(),
        release_date: Some("2024-05-01".to_string()),
        first_air_date: None,
        original_language: Some("hi".to_string()),
        popularity: 12.0,
        vote_count: None,
        recommendation_reason: None,
    }
}

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "MOVIEFLIX";

/// Discover language filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hindi,
    English,
    Tamil,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 4] = [Self::Hindi, Self::English, Self::Tamil, Self::Telugu];

    pub fn id(self) -> &'static str {
        match self {
            Self::Hindi => "hindi",
            Self::English => "english",
            Self::Tamil => "tamil",
            Self::Telugu => "telugu",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hindi => "Hindi",
            Self::English => "English",
            Self::Tamil => "Tamil",
            Self::Telugu => "Telugu",
        }
    }
}

/// Discover genre filter. Ids are the lowercased labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "action")]
    Action,
    #[serde(rename = "comedy")]
    Comedy,
    #[serde(rename = "drama")]
    Drama,
    #[serde(rename = "thriller")]
    Thriller,
    #[serde(rename = "romance")]
    Romance,
    #[serde(rename = "horror")]
    Horror,
    #[serde(rename = "sci-fi")]
    SciFi,
}

impl Genre {
    pub const ALL: [Genre; 7] = [
        Self::Action,
        Self::Comedy,
        Self::Drama,
        Self::Thriller,
        Self::Romance,
        Self::Horror,
        Self::SciFi,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Comedy => "comedy",
            Self::Drama => "drama",
            Self::Thriller => "thriller",
            Self::Romance => "romance",
            Self::Horror => "horror",
            Self::SciFi => "sci-fi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
            Self::Thriller => "Thriller",
            Self::Romance => "Romance",
            Self::Horror => "Horror",
            Self::SciFi => "Sci-Fi",
        }
    }
}

/// Discover content-type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Both,
    Movie,
    Tv,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [Self::Both, Self::Movie, Self::Tv];

    pub fn id(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Both => "All",
            Self::Movie => "Movies",
            Self::Tv => "TV Shows",
        }
    }

    /// Phrase used when building the discover prompt.
    pub fn description(self) -> &'static str {
        match self {
            Self::Both => "movies and shows",
            Self::Movie => "movies only",
            Self::Tv => "shows only",
        }
    }
}

/// Discover release-period filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleasePeriod {
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    OneYear,
    #[serde(rename = "2years")]
    TwoYears,
    #[serde(rename = "3years")]
    ThreeYears,
    #[serde(rename = "all")]
    AllTime,
}

impl ReleasePeriod {
    pub const ALL: [ReleasePeriod; 5] = [
        Self::SixMonths,
        Self::OneYear,
        Self::TwoYears,
        Self::ThreeYears,
        Self::AllTime,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::SixMonths => "6months",
            Self::OneYear => "1year",
            Self::TwoYears => "2years",
            Self::ThreeYears => "3years",
            Self::AllTime => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SixMonths => "Last 6 months",
            Self::OneYear => "Last 1 year",
            Self::TwoYears => "Last 2 years",
            Self::ThreeYears => "Last 3 years",
            Self::AllTime => "All time",
        }
    }
}

/// Step to the neighbouring entry of an option list, wrapping at both ends.
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    all[next]
}

/// Which of the four filter selectors has focus in the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Language,
    Genre,
    ContentType,
    ReleasePeriod,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        Self::Language,
        Self::Genre,
        Self::ContentType,
        Self::ReleasePeriod,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, true)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, false)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Language => "Language",
            Self::Genre => "Genre",
            Self::ContentType => "Type",
            Self::ReleasePeriod => "Released",
        }
    }
}

// TMDB genre tables. The backend sends ids, interaction records carry names.
const MOVIE_GENRES: &[(i64, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

const TV_GENRES: &[(i64, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

/// Map genre ids to names using the table for the given media type.
/// Unknown ids are dropped.
pub fn genre_names(ids: &[i64], tv: bool) -> Vec<String> {
    let table = if tv { TV_GENRES } else { MOVIE_GENRES };
    ids.iter()
        .filter_map(|id| table.iter().find(|(k, _)| k == id).map(|(_, name)| name.to_string()))
        .collect()
}

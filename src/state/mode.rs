use crate::models::ContentItem;

/// Which content source feeds the grid. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Normal,
    Search,
    Ai,
    Personalized,
}

impl DisplayMode {
    /// Collapse independent mode flags using the precedence
    /// personalized > ai > search > normal.
    pub fn from_flags(personalized: bool, ai: bool, search: bool) -> Self {
        if personalized {
            Self::Personalized
        } else if ai {
            Self::Ai
        } else if search {
            Self::Search
        } else {
            Self::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Search => "search",
            Self::Ai => "ai",
            Self::Personalized => "personalized",
        }
    }

    pub fn shows_filters(self) -> bool {
        self == Self::Normal
    }

    pub fn empty_message(self, query: &str) -> String {
        match self {
            Self::Search => format!(
                "No OTT content found for \"{}\". Try a different search term.",
                query
            ),
            Self::Ai => {
                "No AI recommendations found. Try asking the AI assistant something else."
                    .to_string()
            }
            Self::Personalized => "No personalized recommendations available. Like more content to improve recommendations.".to_string(),
            Self::Normal => "No content found. Try different filters.".to_string(),
        }
    }
}

/// One source's content and loading flag.
#[derive(Debug, Clone, Copy)]
pub struct Slice<'a> {
    pub items: &'a [ContentItem],
    pub loading: bool,
}

impl<'a> Slice<'a> {
    pub fn new(items: &'a [ContentItem], loading: bool) -> Self {
        Self { items, loading }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ModeSources<'a> {
    pub personalized: Slice<'a>,
    pub ai: Slice<'a>,
    pub search: Slice<'a>,
    pub normal: Slice<'a>,
}

/// What the grid renders.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub items: &'a [ContentItem],
    pub loading: bool,
    pub mode: DisplayMode,
}

pub fn resolve<'a>(mode: DisplayMode, sources: &ModeSources<'a>) -> Resolved<'a> {
    let slice = match mode {
        DisplayMode::Personalized => sources.personalized,
        DisplayMode::Ai => sources.ai,
        DisplayMode::Search => sources.search,
        DisplayMode::Normal => sources.normal,
    };
    Resolved {
        items: slice.items,
        loading: slice.loading,
        mode,
    }
}

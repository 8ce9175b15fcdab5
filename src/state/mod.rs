//! Asynchronous state slices owned by the UI loop.

pub mod chat;
pub mod content;
pub mod mode;
pub mod preferences;
pub mod search;

pub use chat::{AiPicks, ChatSession, SendOutcome};
pub use content::ContentFeed;
pub use mode::{DisplayMode, ModeSources, Resolved, Slice};
pub use preferences::UserPreferences;
pub use search::{GlobalSearch, QueryChange};

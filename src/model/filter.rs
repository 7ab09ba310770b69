//! Predicate deciding which bookmarks are displayed.

use crate::domain::Bookmark;

/// Which bookmarks the displayed list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookmarkFilter {
    #[default]
    All,
    /// Bookmarks whose name contains any of these words.
    Keywords(Vec<String>),
}

impl BookmarkFilter {
    /// Builds a keyword filter, dropping blank keywords.
    pub fn keywords(keywords: Vec<String>) -> Self {
        Self::Keywords(
            keywords
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        )
    }

    pub fn matches(&self, bookmark: &Bookmark) -> bool {
        match self {
            Self::All => true,
            Self::Keywords(keywords) => keywords.iter().any(|k| bookmark.name().contains_word(k)),
        }
    }
}

use serde::{Deserialize, Serialize};

/// A Wikipedia article as seen by the MediaWiki query API, redirects already
/// followed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Canonical title.
    pub title: String,
    /// Page source length in bytes, as reported by the `info` prop.
    pub length: u64,
    pub url: String,
    pub is_disambiguation: bool,
}

/// Viewership statistics for one resolved article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStats {
    pub title: String,
    pub views_last_year: u64,
    pub page_length: u64,
}

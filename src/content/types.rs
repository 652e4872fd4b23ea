use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Content Kind
// ============================================================================

/// Discriminant for the three content sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    News,
    Movie,
    Social,
}

impl ContentKind {
    /// Prefix used when building feed-wide item ids (`news-<id>`, ...).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Movie => "movie",
            Self::Social => "social",
        }
    }

    /// Parse a kind from its lowercase name.
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "news" => Some(Self::News),
            "movie" => Some(Self::Movie),
            "social" => Some(Self::Social),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

// ============================================================================
// Source Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSource {
    pub id: String,
    pub name: String,
}

/// A headline from the news source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub url_to_image: String,
    /// RFC 3339 publication timestamp.
    pub published_at: String,
    pub source: NewsSource,
    pub category: String,
}

/// A movie suggestion from the movie source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecommendation {
    pub id: String,
    pub title: String,
    pub overview: String,
    pub poster_path: String,
    pub release_date: String,
    pub vote_average: f64,
    pub genre_ids: Vec<u32>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialAuthor {
    pub name: String,
    pub avatar: String,
    pub handle: String,
}

/// A post from the social source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: String,
    pub content: String,
    pub author: SocialAuthor,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    pub likes: u64,
    pub shares: u64,
    pub hashtags: Vec<String>,
    pub category: String,
}

// ============================================================================
// Feed Items
// ============================================================================

/// Payload of a feed item, tagged by its source.
///
/// Serialized as `{"type": "news", "data": {...}}` so persisted favorites
/// carry an explicit discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ContentPayload {
    News(NewsArticle),
    Movie(MovieRecommendation),
    Social(SocialPost),
}

impl ContentPayload {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::News(_) => ContentKind::News,
            Self::Movie(_) => ContentKind::Movie,
            Self::Social(_) => ContentKind::Social,
        }
    }

    /// Id of the record within its own source (not unique across sources).
    pub fn source_id(&self) -> &str {
        match self {
            Self::News(a) => &a.id,
            Self::Movie(m) => &m.id,
            Self::Social(p) => &p.id,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            Self::News(a) => &a.category,
            Self::Movie(m) => &m.category,
            Self::Social(p) => &p.category,
        }
    }

    /// Headline text: article/movie title, or the post body for social posts.
    pub fn headline(&self) -> &str {
        match self {
            Self::News(a) => &a.title,
            Self::Movie(m) => &m.title,
            Self::Social(p) => &p.content,
        }
    }
}

/// One entry of the aggregated feed or the favorites list.
///
/// `id` is `<kind>-<source id>` and stays stable across reorders.
/// `order` always equals the item's index in its containing list once a
/// mutation has completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub payload: ContentPayload,
    pub order: usize,
}

impl ContentItem {
    /// Wrap a payload, deriving the feed id from its kind and source id.
    pub fn new(payload: ContentPayload, order: usize) -> Self {
        let id = format!("{}-{}", payload.kind().prefix(), payload.source_id());
        Self { id, payload, order }
    }

    pub fn kind(&self) -> ContentKind {
        self.payload.kind()
    }
}

// ============================================================================
// Search and Trending
// ============================================================================

/// Per-source search matches. Not merged into feed form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub news: Vec<NewsArticle>,
    pub movies: Vec<MovieRecommendation>,
    pub social: Vec<SocialPost>,
}

impl SearchResult {
    pub fn total(&self) -> usize {
        self.news.len() + self.movies.len() + self.social.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Derived popularity entry. Regenerated on every trending fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingItem {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Popularity score.
    pub count: u32,
    pub kind: ContentKind,
    pub url: Option<String>,
    pub poster_path: Option<String>,
    /// Set on the first entry of the sampled list.
    pub top: bool,
}

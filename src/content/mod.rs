//! Content records and the sources that supply them.
//!
//! - [`types`] - news, movie and social records plus the tagged feed item
//! - [`provider`] - the async [`ContentProvider`] trait and its error type
//! - [`catalog`] - built-in static provider
//! - [`search`] - substring matching used by provider search
//! - [`trending`] - seedable trending sampler

mod catalog;
mod provider;
mod search;
mod trending;
mod types;

pub use catalog::{CatalogProvider, SUGGESTED_CATEGORIES};
pub use provider::{filter_by_category, ContentProvider, ProviderError};
pub use search::search_pools;
pub use trending::{TrendingSampler, TRENDING_MOVIES, TRENDING_NEWS, TRENDING_SOCIAL};
pub use types::{
    ContentItem, ContentKind, ContentPayload, MovieRecommendation, NewsArticle, NewsSource,
    SearchResult, SocialAuthor, SocialPost, TrendingItem,
};

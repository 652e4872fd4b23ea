use async_trait::async_trait;
use thiserror::Error;

use super::search::search_pools;
use super::trending::TrendingSampler;
use super::types::{MovieRecommendation, NewsArticle, SearchResult, SocialPost, TrendingItem};

/// Errors a content source can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// One of the source lists could not be fetched.
    #[error("Failed to fetch {what}: {reason}")]
    Fetch { what: &'static str, reason: String },
    /// The search backend rejected the query.
    #[error("Failed to search content: {0}")]
    Search(String),
    /// The background task running the request panicked.
    #[error("Content request aborted: {0}")]
    Panicked(String),
}

impl ProviderError {
    pub fn fetch(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Fetch {
            what,
            reason: reason.into(),
        }
    }
}

/// Source of news, movie and social records.
///
/// An empty `categories` slice means "no category filter" and returns the
/// full pool. Implementations only need the three list fetches; search and
/// trending default to filtering and sampling the unfiltered pools.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch_news(&self, categories: &[String]) -> Result<Vec<NewsArticle>, ProviderError>;

    async fn fetch_movies(
        &self,
        categories: &[String],
    ) -> Result<Vec<MovieRecommendation>, ProviderError>;

    async fn fetch_social_posts(
        &self,
        categories: &[String],
    ) -> Result<Vec<SocialPost>, ProviderError>;

    /// Case-insensitive substring search over the unfiltered pools.
    async fn search_content(&self, query: &str) -> Result<SearchResult, ProviderError> {
        let (news, movies, social) = futures::try_join!(
            self.fetch_news(&[]),
            self.fetch_movies(&[]),
            self.fetch_social_posts(&[]),
        )?;
        Ok(search_pools(query, &news, &movies, &social))
    }

    /// Sample trending entries from the unfiltered pools.
    async fn fetch_trending(
        &self,
        mut sampler: TrendingSampler,
    ) -> Result<Vec<TrendingItem>, ProviderError> {
        let (news, movies, social) = futures::try_join!(
            self.fetch_news(&[]),
            self.fetch_movies(&[]),
            self.fetch_social_posts(&[]),
        )?;
        Ok(sampler.sample(&news, &movies, &social))
    }
}

/// Keep records whose category is in `categories`, or all of them when the
/// filter is empty.
pub fn filter_by_category<T, F>(records: &[T], categories: &[String], category_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    records
        .iter()
        .filter(|r| categories.is_empty() || categories.iter().any(|c| c == category_of(r)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message() {
        let err = ProviderError::fetch("movies", "connection reset");
        assert_eq!(err.to_string(), "Failed to fetch movies: connection reset");
    }

    #[test]
    fn test_filter_by_category_empty_means_all() {
        let records = vec!["a".to_string(), "b".to_string()];
        let all = filter_by_category(&records, &[], |s| s.as_str());
        assert_eq!(all.len(), 2);

        let only_b = filter_by_category(&records, &["b".to_string()], |s| s.as_str());
        assert_eq!(only_b, vec!["b".to_string()]);
    }
}

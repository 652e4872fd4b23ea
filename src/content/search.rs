//! Case-insensitive substring matching across the three content pools.
//!
//! Matched fields:
//! - news: title, description
//! - movies: title, overview
//! - social: content, author name
//!
//! The query is matched as given, whitespace included. An empty query
//! matches nothing; callers wanting the unfiltered feed clear the search
//! instead of searching for "".

use super::types::{MovieRecommendation, NewsArticle, SearchResult, SocialPost};

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl NewsArticle {
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle) || contains_folded(&self.description, needle)
    }
}

impl MovieRecommendation {
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle) || contains_folded(&self.overview, needle)
    }
}

impl SocialPost {
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.content, needle) || contains_folded(&self.author.name, needle)
    }
}

/// Filter each pool independently against `query`, preserving pool order.
pub fn search_pools(
    query: &str,
    news: &[NewsArticle],
    movies: &[MovieRecommendation],
    social: &[SocialPost],
) -> SearchResult {
    if query.is_empty() {
        return SearchResult::default();
    }
    let needle = query.to_lowercase();

    SearchResult {
        news: news.iter().filter(|a| a.matches(&needle)).cloned().collect(),
        movies: movies.iter().filter(|m| m.matches(&needle)).cloned().collect(),
        social: social.iter().filter(|p| p.matches(&needle)).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CatalogProvider;

    fn pools() -> (Vec<NewsArticle>, Vec<MovieRecommendation>, Vec<SocialPost>) {
        let catalog = CatalogProvider::new();
        (
            catalog.news().to_vec(),
            catalog.movies().to_vec(),
            catalog.social_posts().to_vec(),
        )
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let (news, movies, social) = pools();
        let result = search_pools("MARS", &news, &movies, &social);
        assert_eq!(result.news.len(), 1);
        assert_eq!(result.news[0].id, "5");
    }

    #[test]
    fn test_search_matches_description_and_overview() {
        let (news, movies, social) = pools();
        // "storytelling" only appears in a movie overview
        let result = search_pools("storytelling", &news, &movies, &social);
        assert!(result.news.is_empty());
        assert_eq!(result.movies.len(), 1);
        assert_eq!(result.movies[0].title, "The Future of Cinema");
    }

    #[test]
    fn test_search_matches_author_name() {
        let (news, movies, social) = pools();
        let result = search_pools("emma davis", &news, &movies, &social);
        assert_eq!(result.social.len(), 1);
        assert_eq!(result.social[0].author.handle, "@emma_finance");
    }

    #[test]
    fn test_search_no_matches_is_empty_not_error() {
        let (news, movies, social) = pools();
        let result = search_pools("nonexistent-zzz", &news, &movies, &social);
        assert_eq!(result, SearchResult::default());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let (news, movies, social) = pools();
        assert!(search_pools("", &news, &movies, &social).is_empty());
    }

    #[test]
    fn test_whitespace_is_part_of_the_query() {
        let (news, movies, social) = pools();
        let result = search_pools("mars ", &news, &movies, &social);
        assert_eq!(result.news.len(), 1);
        assert!(search_pools("mars  ", &news, &movies, &social).is_empty());
        // A lone space is an ordinary substring
        assert!(!search_pools(" ", &news, &movies, &social).is_empty());
    }

    #[test]
    fn test_search_spans_all_sources() {
        let (news, movies, social) = pools();
        // "startup" hits a news title, a movie title and a social post
        let result = search_pools("startup", &news, &movies, &social);
        assert_eq!(result.news.len(), 1);
        assert_eq!(result.movies.len(), 1);
        assert_eq!(result.social.len(), 1);
    }
}

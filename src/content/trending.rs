//! Trending sampler.
//!
//! Picks a small random mix from the unfiltered pools and attaches a
//! placeholder popularity score. The random source is owned by the sampler
//! so callers can seed it for reproducible output.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::types::{ContentKind, MovieRecommendation, NewsArticle, SocialPost, TrendingItem};

/// News entries per sample.
pub const TRENDING_NEWS: usize = 2;
/// Movie entries per sample.
pub const TRENDING_MOVIES: usize = 1;
/// Social entries per sample.
pub const TRENDING_SOCIAL: usize = 1;

const MIN_POPULARITY: u32 = 100;
const MAX_POPULARITY: u32 = 1099;

/// Social posts have no title; their entry shows this many leading chars.
const SOCIAL_TITLE_CHARS: usize = 40;

const MOVIE_PAGE_BASE: &str = "https://www.themoviedb.org/movie";

pub struct TrendingSampler {
    rng: StdRng,
}

impl TrendingSampler {
    /// Deterministic sampler: the same seed over the same pools yields the
    /// same output.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sampler seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Draw a seed for a child sampler. Lets a long-lived owner hand a fresh
    /// sampler to each background request while staying reproducible.
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.random())
    }

    /// Sample 2 news, 1 movie and 1 social entry without replacement, shuffle
    /// the combined list and mark its first entry as top.
    ///
    /// Pools smaller than their quota contribute everything they have.
    pub fn sample(
        &mut self,
        news: &[NewsArticle],
        movies: &[MovieRecommendation],
        social: &[SocialPost],
    ) -> Vec<TrendingItem> {
        let mut items = Vec::with_capacity(TRENDING_NEWS + TRENDING_MOVIES + TRENDING_SOCIAL);

        for article in self.pick(news, TRENDING_NEWS) {
            let count = self.popularity();
            items.push(TrendingItem {
                id: format!("{}-{}", ContentKind::News.prefix(), article.id),
                title: article.title.clone(),
                category: article.category.clone(),
                count,
                kind: ContentKind::News,
                url: Some(article.url.clone()),
                poster_path: None,
                top: false,
            });
        }

        for movie in self.pick(movies, TRENDING_MOVIES) {
            let count = self.popularity();
            items.push(TrendingItem {
                id: format!("{}-{}", ContentKind::Movie.prefix(), movie.id),
                title: movie.title.clone(),
                category: movie.category.clone(),
                count,
                kind: ContentKind::Movie,
                url: Some(format!("{}/{}", MOVIE_PAGE_BASE, movie.id)),
                poster_path: Some(movie.poster_path.clone()),
                top: false,
            });
        }

        for post in self.pick(social, TRENDING_SOCIAL) {
            let count = self.popularity();
            items.push(TrendingItem {
                id: format!("{}-{}", ContentKind::Social.prefix(), post.id),
                title: post.content.chars().take(SOCIAL_TITLE_CHARS).collect(),
                category: post.category.clone(),
                count,
                kind: ContentKind::Social,
                url: None,
                poster_path: None,
                top: false,
            });
        }

        items.shuffle(&mut self.rng);
        if let Some(first) = items.first_mut() {
            first.top = true;
        }
        items
    }

    /// Choose up to `n` distinct elements uniformly.
    fn pick<'a, T>(&mut self, pool: &'a [T], n: usize) -> Vec<&'a T> {
        let mut refs: Vec<&T> = pool.iter().collect();
        refs.shuffle(&mut self.rng);
        refs.truncate(n);
        refs
    }

    fn popularity(&mut self) -> u32 {
        self.rng.random_range(MIN_POPULARITY..=MAX_POPULARITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CatalogProvider;
    use std::collections::HashSet;

    fn sample_with(seed: u64) -> Vec<TrendingItem> {
        let catalog = CatalogProvider::new();
        TrendingSampler::from_seed(seed).sample(
            catalog.news(),
            catalog.movies(),
            catalog.social_posts(),
        )
    }

    #[test]
    fn test_sample_mix() {
        let items = sample_with(7);
        assert_eq!(items.len(), 4);

        let count = |kind| items.iter().filter(|i| i.kind == kind).count();
        assert_eq!(count(ContentKind::News), 2);
        assert_eq!(count(ContentKind::Movie), 1);
        assert_eq!(count(ContentKind::Social), 1);
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        for seed in 0..50 {
            let items = sample_with(seed);
            let ids: HashSet<_> = items.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(ids.len(), items.len(), "seed {} produced duplicates", seed);
        }
    }

    #[test]
    fn test_popularity_in_range() {
        for seed in 0..50 {
            for item in sample_with(seed) {
                assert!((MIN_POPULARITY..=MAX_POPULARITY).contains(&item.count));
            }
        }
    }

    #[test]
    fn test_exactly_one_top_and_it_is_first() {
        let items = sample_with(3);
        assert!(items[0].top);
        assert_eq!(items.iter().filter(|i| i.top).count(), 1);
    }

    #[test]
    fn test_same_seed_same_output() {
        assert_eq!(sample_with(42), sample_with(42));
    }

    #[test]
    fn test_social_title_truncated_to_40_chars() {
        let items = sample_with(11);
        let social = items
            .iter()
            .find(|i| i.kind == ContentKind::Social)
            .unwrap();
        assert!(social.title.chars().count() <= 40);
        assert!(social.url.is_none());
    }

    #[test]
    fn test_movie_links_to_movie_page() {
        let items = sample_with(5);
        let movie = items.iter().find(|i| i.kind == ContentKind::Movie).unwrap();
        let url = movie.url.as_deref().unwrap();
        assert!(url.starts_with("https://www.themoviedb.org/movie/"));
        assert!(movie.poster_path.is_some());
    }

    #[test]
    fn test_small_pools() {
        let catalog = CatalogProvider::new();
        let items = TrendingSampler::from_seed(1).sample(&catalog.news()[..1], &[], &[]);
        assert_eq!(items.len(), 1);
        assert!(items[0].top);

        let empty = TrendingSampler::from_seed(1).sample(&[], &[], &[]);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_fork_is_reproducible() {
        let mut a = TrendingSampler::from_seed(9);
        let mut b = TrendingSampler::from_seed(9);
        let catalog = CatalogProvider::new();
        let from_a = a
            .fork()
            .sample(catalog.news(), catalog.movies(), catalog.social_posts());
        let from_b = b
            .fork()
            .sample(catalog.news(), catalog.movies(), catalog.social_posts());
        assert_eq!(from_a, from_b);
    }
}

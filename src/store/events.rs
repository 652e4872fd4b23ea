//! Background request tasks and the events they report back.
//!
//! Each provider request runs on its own tokio task and reports a
//! [`StoreEvent`] over the store's channel. Every event carries the
//! generation it was spawned with so the store can drop responses that a
//! newer request has superseded.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::content::{
    ContentItem, ContentPayload, ContentProvider, MovieRecommendation, NewsArticle,
    ProviderError, SearchResult, SocialPost, TrendingItem, TrendingSampler,
};

/// Completion of a background provider request.
#[derive(Debug)]
pub enum StoreEvent {
    /// Personalized feed fetch finished.
    ContentLoaded {
        generation: u64,
        categories: Vec<String>,
        result: Result<Vec<ContentItem>, ProviderError>,
    },
    /// Search finished.
    SearchCompleted {
        generation: u64,
        query: String,
        result: Result<SearchResult, ProviderError>,
    },
    /// Trending sample finished.
    TrendingLoaded {
        generation: u64,
        result: Result<Vec<TrendingItem>, ProviderError>,
    },
}

impl StoreEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::ContentLoaded { generation, .. }
            | Self::SearchCompleted { generation, .. }
            | Self::TrendingLoaded { generation, .. } => *generation,
        }
    }
}

/// Concatenate news → movies → social into one feed with prefixed ids and a
/// running order across the whole list.
pub fn aggregate(
    news: Vec<NewsArticle>,
    movies: Vec<MovieRecommendation>,
    social: Vec<SocialPost>,
) -> Vec<ContentItem> {
    news.into_iter()
        .map(ContentPayload::News)
        .chain(movies.into_iter().map(ContentPayload::Movie))
        .chain(social.into_iter().map(ContentPayload::Social))
        .enumerate()
        .map(|(order, payload)| ContentItem::new(payload, order))
        .collect()
}

/// Fetch the three sources concurrently. The first rejection fails the group.
pub async fn fetch_feed(
    provider: &dyn ContentProvider,
    categories: &[String],
) -> Result<Vec<ContentItem>, ProviderError> {
    let (news, movies, social) = futures::try_join!(
        provider.fetch_news(categories),
        provider.fetch_movies(categories),
        provider.fetch_social_posts(categories),
    )?;
    Ok(aggregate(news, movies, social))
}

/// Run a future, converting a panic into its message.
async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            }
        })
}

async fn deliver(tx: &mpsc::Sender<StoreEvent>, event: StoreEvent, task: &'static str) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!(task, error = %e, "Failed to deliver store event (receiver dropped)");
    }
}

pub(super) fn spawn_content_fetch(
    provider: Arc<dyn ContentProvider>,
    categories: Vec<String>,
    generation: u64,
    tx: mpsc::Sender<StoreEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = catch_task_panic(fetch_feed(provider.as_ref(), &categories))
            .await
            .unwrap_or_else(|panic_msg| {
                tracing::error!(task = "content_fetch", error = %panic_msg, "Background task panicked");
                Err(ProviderError::Panicked(panic_msg))
            });
        let event = StoreEvent::ContentLoaded {
            generation,
            categories,
            result,
        };
        deliver(&tx, event, "content_fetch").await;
    })
}

pub(super) fn spawn_search(
    provider: Arc<dyn ContentProvider>,
    query: String,
    generation: u64,
    tx: mpsc::Sender<StoreEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = catch_task_panic(provider.search_content(&query))
            .await
            .unwrap_or_else(|panic_msg| {
                tracing::error!(task = "search", error = %panic_msg, "Background task panicked");
                Err(ProviderError::Panicked(panic_msg))
            });
        let event = StoreEvent::SearchCompleted {
            generation,
            query,
            result,
        };
        deliver(&tx, event, "search").await;
    })
}

pub(super) fn spawn_trending(
    provider: Arc<dyn ContentProvider>,
    sampler: TrendingSampler,
    generation: u64,
    tx: mpsc::Sender<StoreEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = catch_task_panic(provider.fetch_trending(sampler))
            .await
            .unwrap_or_else(|panic_msg| {
                tracing::error!(task = "trending", error = %panic_msg, "Background task panicked");
                Err(ProviderError::Panicked(panic_msg))
            });
        deliver(&tx, StoreEvent::TrendingLoaded { generation, result }, "trending").await;
    })
}

//! Built-in static catalog used when no live content backend is configured.

use async_trait::async_trait;

use super::provider::{filter_by_category, ContentProvider, ProviderError};
use super::types::{
    MovieRecommendation, NewsArticle, NewsSource, SocialAuthor, SocialPost,
};

/// Suggested categories offered by the preferences editor.
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "technology",
    "sports",
    "finance",
    "entertainment",
    "health",
    "science",
    "business",
    "world",
];

/// In-memory provider serving a fixed set of records.
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    news: Vec<NewsArticle>,
    movies: Vec<MovieRecommendation>,
    social: Vec<SocialPost>,
}

impl Default for CatalogProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider {
    pub fn new() -> Self {
        Self {
            news: seed_news(),
            movies: seed_movies(),
            social: seed_social(),
        }
    }

    pub fn news(&self) -> &[NewsArticle] {
        &self.news
    }

    pub fn movies(&self) -> &[MovieRecommendation] {
        &self.movies
    }

    pub fn social_posts(&self) -> &[SocialPost] {
        &self.social
    }
}

#[async_trait]
impl ContentProvider for CatalogProvider {
    async fn fetch_news(&self, categories: &[String]) -> Result<Vec<NewsArticle>, ProviderError> {
        Ok(filter_by_category(&self.news, categories, |a| a.category.as_str()))
    }

    async fn fetch_movies(
        &self,
        categories: &[String],
    ) -> Result<Vec<MovieRecommendation>, ProviderError> {
        Ok(filter_by_category(&self.movies, categories, |m| m.category.as_str()))
    }

    async fn fetch_social_posts(
        &self,
        categories: &[String],
    ) -> Result<Vec<SocialPost>, ProviderError> {
        Ok(filter_by_category(&self.social, categories, |p| p.category.as_str()))
    }
}

// ============================================================================
// Seed Data
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn article(
    id: &str,
    title: &str,
    description: &str,
    content: &str,
    slug: &str,
    image: &str,
    published_at: &str,
    source: (&str, &str),
    category: &str,
) -> NewsArticle {
    NewsArticle {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        content: content.to_string(),
        url: format!("https://example.com/{}", slug),
        url_to_image: format!("https://images.unsplash.com/{}?w=400", image),
        published_at: published_at.to_string(),
        source: NewsSource {
            id: source.0.to_string(),
            name: source.1.to_string(),
        },
        category: category.to_string(),
    }
}

fn seed_news() -> Vec<NewsArticle> {
    vec![
        article(
            "1",
            "Latest Technology Breakthroughs in 2024",
            "Discover the most innovative technologies that are shaping the future.",
            "The technology landscape is rapidly evolving with new breakthroughs in AI, quantum computing, and renewable energy...",
            "tech-breakthroughs",
            "photo-1518709268805-4e9042af2176",
            "2024-01-15T10:00:00Z",
            ("tech-news", "Tech News"),
            "technology",
        ),
        article(
            "2",
            "Sports: Championship Finals This Weekend",
            "The biggest sports event of the year is just around the corner.",
            "Fans around the world are eagerly anticipating this weekend's championship finals...",
            "sports-finals",
            "photo-1571019613454-1cb2f99b2d8b",
            "2024-01-14T15:30:00Z",
            ("sports-news", "Sports Central"),
            "sports",
        ),
        article(
            "3",
            "Financial Markets: New Investment Opportunities",
            "Expert analysis on emerging investment trends and market opportunities.",
            "The financial markets are presenting unique opportunities for investors...",
            "finance-opportunities",
            "photo-1551288049-bebda4e38f71",
            "2024-01-13T09:15:00Z",
            ("finance-news", "Financial Times"),
            "finance",
        ),
        article(
            "4",
            "Health: New Breakthrough in Cancer Research",
            "Scientists have made a significant discovery in the fight against cancer.",
            "A new treatment shows promise in early trials, offering hope to millions...",
            "health-cancer-research",
            "photo-1506744038136-46273834b3fb",
            "2024-01-12T11:00:00Z",
            ("health-news", "Health Daily"),
            "health",
        ),
        article(
            "5",
            "Science: Mars Rover Sends New Images",
            "Stunning new images from the surface of Mars have been released.",
            "The Mars rover continues its mission, sending back valuable data and breathtaking photos...",
            "science-mars-rover",
            "photo-1465101046530-73398c7f28ca",
            "2024-01-11T13:45:00Z",
            ("science-news", "Science World"),
            "science",
        ),
        article(
            "6",
            "Business: Startups to Watch in 2024",
            "A look at the most promising startups making waves this year.",
            "From fintech to healthtech, these startups are set to disrupt their industries...",
            "business-startups-2024",
            "photo-1461749280684-dccba630e2f6",
            "2024-01-10T16:20:00Z",
            ("business-news", "Business Insider"),
            "business",
        ),
        article(
            "7",
            "World: Global Leaders Meet for Climate Summit",
            "World leaders gather to discuss urgent climate action.",
            "The summit aims to set new targets for reducing emissions and promoting sustainability...",
            "world-climate-summit",
            "photo-1502082553048-f009c37129b9",
            "2024-01-09T18:10:00Z",
            ("world-news", "Global News"),
            "world",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn movie(
    id: &str,
    title: &str,
    overview: &str,
    image: &str,
    release_date: &str,
    vote_average: f64,
    genre_ids: &[u32],
    category: &str,
) -> MovieRecommendation {
    MovieRecommendation {
        id: id.to_string(),
        title: title.to_string(),
        overview: overview.to_string(),
        poster_path: format!("https://images.unsplash.com/{}?w=400", image),
        release_date: release_date.to_string(),
        vote_average,
        genre_ids: genre_ids.to_vec(),
        category: category.to_string(),
    }
}

fn seed_movies() -> Vec<MovieRecommendation> {
    vec![
        movie(
            "1",
            "The Future of Cinema",
            "A groundbreaking film that explores the intersection of technology and storytelling.",
            "photo-1489599849927-2ee91cede3ba",
            "2024-01-20",
            8.5,
            &[28, 12, 878],
            "entertainment",
        ),
        movie(
            "2",
            "Adventure Quest",
            "An epic adventure that takes viewers on a journey through uncharted territories.",
            "photo-1506905925346-21bda4d32df4",
            "2024-01-25",
            7.8,
            &[12, 14, 28],
            "adventure",
        ),
        movie(
            "3",
            "Mystery Manor",
            "A psychological thriller that keeps audiences guessing until the very end.",
            "photo-1518709268805-4e9042af2176",
            "2024-01-30",
            8.2,
            &[53, 27, 9648],
            "thriller",
        ),
        movie(
            "4",
            "Comedy Nights",
            "A hilarious comedy that will leave you in stitches.",
            "photo-1465101178521-c1a9136a3c5c",
            "2024-02-05",
            7.5,
            &[35],
            "entertainment",
        ),
        movie(
            "5",
            "Science Unveiled",
            "A documentary exploring the wonders of modern science.",
            "photo-1462331940025-496dfbfc7564",
            "2024-02-10",
            8.7,
            &[99],
            "science",
        ),
        movie(
            "6",
            "Startup Stories",
            "Inspiring tales from the world of startups and entrepreneurship.",
            "photo-1461749280684-dccba630e2f6",
            "2024-02-15",
            8.0,
            &[18],
            "business",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    content: &str,
    author: (&str, &str, &str),
    timestamp: &str,
    likes: u64,
    shares: u64,
    hashtags: &[&str],
    category: &str,
) -> SocialPost {
    SocialPost {
        id: id.to_string(),
        content: content.to_string(),
        author: SocialAuthor {
            name: author.0.to_string(),
            avatar: format!("https://images.unsplash.com/{}?w=100", author.1),
            handle: author.2.to_string(),
        },
        timestamp: timestamp.to_string(),
        likes,
        shares,
        hashtags: hashtags.iter().map(|h| h.to_string()).collect(),
        category: category.to_string(),
    }
}

fn seed_social() -> Vec<SocialPost> {
    vec![
        post(
            "1",
            "Just discovered an amazing new tech startup! The innovation is incredible. #TechNews #Innovation",
            ("Sarah Johnson", "photo-1494790108755-2616b612b786", "@sarah_tech"),
            "2024-01-15T08:30:00Z",
            245,
            67,
            &["#TechNews", "#Innovation", "#Startup"],
            "technology",
        ),
        post(
            "2",
            "What a game! The energy in the stadium was electric tonight. #Sports #Championship",
            ("Mike Chen", "photo-1507003211169-0a1dd7228f2d", "@mike_sports"),
            "2024-01-14T22:15:00Z",
            189,
            34,
            &["#Sports", "#Championship", "#GameDay"],
            "sports",
        ),
        post(
            "3",
            "Market analysis: The tech sector is showing strong growth potential. #Finance #Investing",
            ("Emma Davis", "photo-1438761681033-6461ffad8d80", "@emma_finance"),
            "2024-01-13T14:45:00Z",
            156,
            89,
            &["#Finance", "#Investing", "#TechStocks"],
            "finance",
        ),
        post(
            "4",
            "Excited to attend the Global Climate Summit. Important discussions ahead! #ClimateAction #World",
            ("Liam Smith", "photo-1511367461989-f85a21fda167", "@liam_world"),
            "2024-01-12T19:00:00Z",
            210,
            55,
            &["#ClimateAction", "#World", "#Summit"],
            "world",
        ),
        post(
            "5",
            "Breakthrough in cancer research gives hope to millions. #Health #Research",
            ("Olivia Brown", "photo-1517841905240-472988babdf9", "@olivia_health"),
            "2024-01-11T10:30:00Z",
            175,
            40,
            &["#Health", "#Research", "#Hope"],
            "health",
        ),
    ]
}

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use feedboard::config::Config;
use feedboard::content::{CatalogProvider, ContentItem, ContentPayload, SUGGESTED_CATEGORIES};
use feedboard::dashboard::Dashboard;
use feedboard::notifications::NotificationKind;
use feedboard::storage::{Database, DatabaseError};
use feedboard::theme::ThemeVariant;
use feedboard::util::{
    capitalize, category_icon, format_count, format_timestamp, initials, is_valid_email,
    strip_control_chars, truncate_to_width,
};

const HEADLINE_WIDTH: usize = 60;

/// Get the config directory path (~/.config/feedboard/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("feedboard"))
}

#[derive(Parser, Debug)]
#[command(
    name = "feedboard",
    about = "Personalized dashboard of news, movies and social posts"
)]
struct Args {
    /// Reset database (delete and recreate)
    #[arg(long, global = true)]
    reset_db: bool,

    /// Config file (default: ~/.config/feedboard/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the personalized feed
    Feed {
        /// Override the profile's categories (repeatable)
        #[arg(long = "category", short = 'c', value_name = "CATEGORY")]
        categories: Vec<String>,
    },
    /// Search news, movies and social posts
    Search { query: String },
    /// Show a trending sample
    Trending {
        /// Seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Manage favorites
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Show or edit preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
enum FavoriteAction {
    /// Favorite a feed item by id (e.g. news-1)
    Add { id: String },
    /// Remove a favorite by id
    Remove { id: String },
    /// Move a favorite from one position to another
    Move { from: usize, to: usize },
    /// List favorites in order
    List,
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Toggle,
    Set { variant: String },
    Show,
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    /// Replace the feed categories
    Categories {
        #[arg(required = true)]
        categories: Vec<String>,
    },
    /// Edit profile fields; omitted fields keep their value
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        notifications: Option<bool>,
    },
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Command::Trending { seed: Some(seed) } = &args.command {
        config.trending_seed = Some(*seed);
    }

    let db_path = config_dir.join("feedboard.db");
    if args.reset_db && db_path.exists() {
        std::fs::remove_file(&db_path).context("Failed to delete database")?;
        println!("Database reset.");
    }

    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!("Error: {}", DatabaseError::InstanceLocked);
            std::process::exit(1);
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to open database: {}", e)),
    };

    let mut dash = Dashboard::open(Arc::new(CatalogProvider::new()), &config, db).await;
    dash.bootstrap().await;
    dash.settle().await;

    run_command(&mut dash, args.command).await?;

    print_notifications(&dash);
    if let Some(error) = &dash.state().error {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run_command(dash: &mut Dashboard, command: Command) -> Result<()> {
    match command {
        Command::Feed { categories } => {
            if !categories.is_empty() {
                dash.preview_categories(&categories).await;
            }
            print_feed(dash);
        }
        Command::Search { query } => {
            dash.search_now(&query);
            dash.settle().await;
            print_search(dash, &query);
        }
        Command::Trending { .. } => print_trending(dash),
        Command::Favorite { action } => match action {
            FavoriteAction::Add { id } => {
                if !dash.add_favorite(&id).await? {
                    eprintln!("'{id}' is not in the feed or is already a favorite");
                }
            }
            FavoriteAction::Remove { id } => {
                if !dash.remove_favorite(&id).await? {
                    eprintln!("'{id}' is not a favorite");
                }
            }
            FavoriteAction::Move { from, to } => {
                dash.reorder_favorites(from, to).await?;
                print_items(&dash.state().favorites, dash);
            }
            FavoriteAction::List => {
                if dash.state().favorites.is_empty() {
                    println!("No favorites yet.");
                }
                print_items(&dash.state().favorites, dash);
            }
        },
        Command::Theme { action } => match action {
            ThemeAction::Toggle => {
                let variant = dash.toggle_theme().await?;
                println!("Theme: {}", variant.name());
            }
            ThemeAction::Set { variant } => {
                let variant = ThemeVariant::from_str_name(&variant)
                    .ok_or_else(|| anyhow::anyhow!("Unknown theme '{variant}' (use dark or light)"))?;
                dash.set_theme(variant).await?;
                println!("Theme: {}", variant.name());
            }
            ThemeAction::Show => println!("Theme: {}", dash.theme().name()),
        },
        Command::Prefs { action } => match action {
            PrefsAction::Categories { categories } => {
                for category in &categories {
                    if !SUGGESTED_CATEGORIES.contains(&category.as_str()) {
                        tracing::warn!(category = %category, "Category is not one of the suggested set");
                    }
                }
                dash.set_categories(categories).await?;
                print_feed(dash);
            }
            PrefsAction::Profile {
                name,
                email,
                avatar,
                language,
                notifications,
            } => {
                let mut profile = dash.user_profile();
                if let Some(email) = email {
                    if !is_valid_email(&email) {
                        anyhow::bail!("'{email}' is not a valid email address");
                    }
                    profile.email = email;
                }
                if let Some(name) = name {
                    profile.name = name;
                }
                if let Some(avatar) = avatar {
                    profile.avatar = (!avatar.is_empty()).then_some(avatar);
                }
                if let Some(language) = language {
                    profile.preferences.language = language;
                }
                if let Some(enabled) = notifications {
                    profile.preferences.notifications_enabled = enabled;
                }
                dash.save_preferences(profile).await?;
                print_profile(dash);
            }
            PrefsAction::Show => print_profile(dash),
        },
    }
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn headline(payload: &ContentPayload) -> String {
    let text = strip_control_chars(payload.headline());
    truncate_to_width(&text, HEADLINE_WIDTH).into_owned()
}

fn print_items(items: &[ContentItem], dash: &Dashboard) {
    for item in items {
        let star = if dash.store().is_favorite(&item.id) { "★" } else { " " };
        println!(
            "{:>3} {} {} {:<12} {}  [{}]",
            item.order,
            star,
            category_icon(item.payload.category()),
            item.id,
            headline(&item.payload),
            capitalize(item.payload.category()),
        );
    }
}

fn print_feed(dash: &Dashboard) {
    let state = dash.state();
    let user = dash.user_profile();
    println!(
        "{} ({})  {} items  theme: {}",
        user.name,
        initials(&user.name),
        state.content.len(),
        dash.theme().name()
    );
    print_items(&state.content, dash);
}

fn print_search(dash: &Dashboard, query: &str) {
    let Some(results) = &dash.state().search_results else {
        println!("Type something to search.");
        return;
    };
    if results.is_empty() {
        println!("No results for '{query}'.");
        return;
    }
    let now = Utc::now();
    println!("{} results for '{query}'", results.total());
    for article in &results.news {
        println!(
            "  news    {}  ({}, {})",
            truncate_to_width(&strip_control_chars(&article.title), HEADLINE_WIDTH),
            article.source.name,
            format_timestamp(&article.published_at, now)
        );
    }
    for movie in &results.movies {
        println!(
            "  movie   {}  ({:.1}★, {})",
            truncate_to_width(&strip_control_chars(&movie.title), HEADLINE_WIDTH),
            movie.vote_average,
            movie.release_date
        );
    }
    for post in &results.social {
        println!(
            "  social  {}  ({}, {} likes)",
            truncate_to_width(&strip_control_chars(&post.content), HEADLINE_WIDTH),
            post.author.handle,
            format_count(post.likes)
        );
    }
}

fn print_trending(dash: &Dashboard) {
    for item in &dash.state().trending {
        let marker = if item.top { "🔥" } else { "  " };
        println!(
            "{marker} {} {:<7} {}  {} views",
            category_icon(&item.category),
            item.kind.to_string(),
            truncate_to_width(&strip_control_chars(&item.title), HEADLINE_WIDTH),
            format_count(u64::from(item.count))
        );
    }
}

fn print_profile(dash: &Dashboard) {
    let user = dash.user_profile();
    println!("{} <{}>", user.name, user.email);
    println!("  categories:    {}", user.preferences.categories.join(", "));
    println!("  language:      {}", user.preferences.language);
    println!("  notifications: {}", user.preferences.notifications_enabled);
    println!("  theme:         {}", dash.theme().name());
}

fn print_notifications(dash: &Dashboard) {
    for toast in dash.notifications().active() {
        let prefix = match toast.kind {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
            NotificationKind::Warning => "!",
            NotificationKind::Info => "i",
        };
        println!("{prefix} {}", toast.message);
    }
}

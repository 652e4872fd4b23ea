//! Personalized content dashboard.
//!
//! Aggregates news, movie recommendations and social posts from a
//! [`ContentProvider`](content::ContentProvider) into one ordered feed, with
//! favorites, cross-source search and a trending sample. [`store`] owns the
//! state and sequences background requests; [`dashboard`] adds persistence,
//! theme, toasts and search debouncing on top.

pub mod config;
pub mod content;
pub mod dashboard;
pub mod debounce;
pub mod notifications;
pub mod preferences;
pub mod storage;
pub mod store;
pub mod theme;
pub mod util;

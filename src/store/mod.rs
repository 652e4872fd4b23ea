//! Aggregation and state store.
//!
//! [`DashboardStore`] owns the feed, favorites, search results, trending
//! list, loading/error flags and filters. Provider calls run as background
//! tasks that report back through [`StoreEvent`]s; each carries a generation
//! token so only the newest request of each kind can update state.

mod dashboard;
mod error;
mod events;
mod ordering;
mod state;

pub use dashboard::{DashboardStore, EventOutcome};
pub use error::StoreError;
pub use events::{aggregate, fetch_feed, StoreEvent};
pub use ordering::{move_item, renumber};
pub use state::{DashboardState, FilterPatch, Filters, UserPreferences, UserProfile};

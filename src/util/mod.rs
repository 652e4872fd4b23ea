//! Display helpers shared by the CLI and any front end.
//!
//! - **Text**: Unicode-aware width and truncation, control-char stripping,
//!   name/email helpers
//! - **Format**: compact counts, relative timestamps, category icons
//!
//! # Examples
//!
//! ```
//! use feedboard::util::{format_count, truncate_to_width};
//!
//! assert_eq!(format_count(15_200), "15.2K");
//! assert_eq!(truncate_to_width("Revolutionary AI Model", 10), "Revolut...");
//! ```

mod format;
mod text;

pub use format::{category_icon, format_count, format_relative_time, format_timestamp};
pub use text::{
    capitalize, display_width, initials, is_valid_email, strip_control_chars, truncate_to_width,
};

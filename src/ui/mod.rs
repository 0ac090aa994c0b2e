//! Terminal output.
//!
//! - [`OutputMode`] and [`Output`] decide what gets printed
//! - [`SyncTheme`] holds the `console` styles
//! - [`render_summary`] turns a run summary into lines

pub mod output;
pub mod summary;
pub mod theme;

pub use output::{Output, OutputMode};
pub use summary::{format_duration, render_summary};
pub use theme::{should_use_colors, SyncTheme};

//! Pure HTML rendering: layout, widgets, tables and inline SVG charts.
//!
//! Every function here maps already-fetched data to markup and never
//! touches the network. Empty inputs render a "No data available"
//! placeholder instead of an empty widget.

pub mod charts;
pub mod components;
pub mod html;
pub mod layout;
pub mod views;

pub use html::escape;

/// Placeholder text for empty charts and tables.
pub const NO_DATA: &str = "No data available";

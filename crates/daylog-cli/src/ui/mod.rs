//! UI primitives for the Daylog CLI.
//!
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges, status markers, color styles
//! - **Render**: Headers, sections, tables, receipts, hints
//! - **Format**: String utilities (truncate, ids, dates)

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{badge, header, hint, kv, print, receipt, section, simple_table, Column};

pub use format::{format_day, lineage, short_id, single_line, truncate};

//! Output formatting for journal days, entries, settings and inspiration.

mod json;
mod text;

pub use json::print_json;
pub use text::{render_day, render_inspiration, render_settings};

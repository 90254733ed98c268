//! Text and table output.

use daylog_core::inspiration::Inspiration;
use daylog_core::{DayView, Entry, Settings};

use crate::ui::theme::status_symbol;
use crate::ui::{
    format_day, header, hint, kv, lineage, section, short_id, simple_table, single_line, truncate,
    Column, UiContext,
};

const ENTRY_COLUMNS: [Column; 5] = [
    Column::new(""),
    Column::new("ID"),
    Column::new("TYPE"),
    Column::new("CONTENT"),
    Column::new("NOTE"),
];

/// Table rows for `entries`.
fn entry_rows(ctx: &UiContext, entries: &[&Entry]) -> Vec<Vec<String>> {
    let content_width = ctx.width.saturating_sub(40).max(20);
    entries
        .iter()
        .map(|entry| {
            vec![
                status_symbol(entry.status, ctx.unicode).to_string(),
                short_id(&entry.id),
                entry.kind.to_string(),
                truncate(&single_line(&entry.content), content_width),
                lineage(entry).unwrap_or_default(),
            ]
        })
        .collect()
}

/// Render a day: its own entries, then carried-over recurring entries.
///
/// Goals, priorities and habits created on the day appear only in the
/// carry-over section.
pub fn render_day(ctx: &UiContext, view: &DayView, is_today: bool) -> String {
    let mut out = Vec::new();
    let context = if is_today {
        format!("{}, today", view.date)
    } else {
        view.date.to_string()
    };
    out.push(header(ctx, "view", Some(context.as_str())));

    let daily: Vec<&Entry> = view
        .daily
        .iter()
        .filter(|entry| !entry.kind.is_recurring())
        .collect();
    let carry_over: Vec<&Entry> = view.carry_over.iter().collect();

    out.push(String::new());
    out.push(section(ctx, &format_day(view.date)));
    if daily.is_empty() {
        out.push(hint(ctx, "Nothing logged. Add one with `daylog add task <CONTENT>`."));
    } else {
        out.push(simple_table(ctx, &ENTRY_COLUMNS, &entry_rows(ctx, &daily)));
    }

    if !carry_over.is_empty() {
        out.push(String::new());
        out.push(section(ctx, "Carry-over"));
        out.push(simple_table(ctx, &ENTRY_COLUMNS, &entry_rows(ctx, &carry_over)));
    }

    out.join("\n")
}

pub fn render_settings(ctx: &UiContext, settings: &Settings) -> String {
    [
        kv(ctx, "Theme", &settings.theme.to_string()),
        kv(ctx, "Language", &settings.language.to_string()),
        kv(
            ctx,
            "Notifications",
            if settings.notifications { "on" } else { "off" },
        ),
    ]
    .join("\n")
}

pub fn render_inspiration(ctx: &UiContext, inspiration: &Inspiration) -> String {
    let mut lines = vec![inspiration.content.to_string()];
    if let Some(translation) = inspiration.translation {
        lines.push(translation.to_string());
    }
    lines.push(kv(ctx, "Source", inspiration.source));
    lines.join("\n")
}

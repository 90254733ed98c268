//! Commands that read or change one day of the journal.

use tracing::debug;
use uuid::Uuid;

use daylog_core::{Entry, EntryPatch, EntryStatus};

use crate::app::{AppContext, Session};
use crate::cli::{AddArgs, EditArgs, MigrateArgs, ReflectArgs, TargetArgs, ViewArgs};
use crate::errors::CliError;
use crate::helpers::{join_content, parse_day, parse_entry_kind, parse_output_format};
use crate::output::{print_json, render_day};
use crate::ui::{hint, print, receipt, short_id, single_line, truncate, UiContext};

pub async fn handle_view(ctx: &AppContext<'_>, args: &ViewArgs) -> anyhow::Result<()> {
    parse_output_format(args.format.as_deref())?;
    let ui = UiContext::from_env(args.json, args.format.as_deref());

    let session = ctx.open_session(&args.day).await?;
    let view = session.journal.day_view();
    let is_today = view.date == session.journal.today();

    if ui.mode.is_json() {
        print_json(&view)?;
    } else {
        print(&ui, &render_day(&ui, &view, is_today));
    }
    session.close()
}

pub async fn handle_add(ctx: &AppContext<'_>, args: &AddArgs) -> anyhow::Result<()> {
    let kind = parse_entry_kind(&args.entry_type)?;
    let content = join_content(&args.content)?;

    let mut session = ctx.open_session(&args.day).await?;
    let entry = session.journal.add(&content, kind).await?;
    if kind.is_recurring() && entry.date != session.journal.viewing_date() {
        debug!(kind = %kind, date = %entry.date, "recurring entry filed under today");
    }
    session.close()?;

    print_entry_receipt(ctx, "Entry added", &entry);
    Ok(())
}

pub async fn handle_done(ctx: &AppContext<'_>, args: &TargetArgs) -> anyhow::Result<()> {
    set_status(ctx, args, EntryStatus::Complete, "Marked complete").await
}

pub async fn handle_undo(ctx: &AppContext<'_>, args: &TargetArgs) -> anyhow::Result<()> {
    set_status(ctx, args, EntryStatus::Incomplete, "Marked incomplete").await
}

async fn set_status(
    ctx: &AppContext<'_>,
    args: &TargetArgs,
    status: EntryStatus,
    title: &str,
) -> anyhow::Result<()> {
    let mut session = ctx.open_session(&args.day).await?;
    let id = session.resolve(&args.id)?;
    let updated = session
        .journal
        .update(&id, EntryPatch::new().status(status))
        .await?
        .ok_or_else(|| unchangeable(&session, &id))?;
    session.close()?;

    print_entry_receipt(ctx, title, &updated);
    Ok(())
}

pub async fn handle_edit(ctx: &AppContext<'_>, args: &EditArgs) -> anyhow::Result<()> {
    let content = join_content(&args.content)?;

    let mut session = ctx.open_session(&args.target.day).await?;
    let id = session.resolve(&args.target.id)?;
    let updated = session
        .journal
        .update(&id, EntryPatch::new().content(content))
        .await?
        .ok_or_else(|| unchangeable(&session, &id))?;
    session.close()?;

    print_entry_receipt(ctx, "Entry updated", &updated);
    Ok(())
}

pub async fn handle_delete(ctx: &AppContext<'_>, args: &TargetArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session(&args.day).await?;
    let id = session.resolve(&args.id)?;
    session.journal.delete(&id).await?;
    session.close()?;

    if !ctx.quiet() {
        let ui = UiContext::from_env(false, None);
        let id_display = id.to_string();
        print(&ui, &receipt(&ui, "Entry deleted", &[("ID", id_display.as_str())]));
    }
    Ok(())
}

pub async fn handle_migrate(ctx: &AppContext<'_>, args: &MigrateArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session(&args.target.day).await?;
    let target = parse_day(&args.to, session.journal.today())?;
    let id = session.resolve(&args.target.id)?;
    let source = session.journal.viewing_date();

    let clone = match session.journal.migrate(&id, target).await? {
        Some(clone) => clone,
        None => {
            return Err(CliError::not_found(
                format!("No task {} to migrate on {}", short_id(&id), source),
                "Hint: Only tasks that were not already migrated can be moved.",
            )
            .into())
        }
    };
    session.close()?;

    if ctx.quiet() {
        println!("{}", clone.id);
        return Ok(());
    }
    let ui = UiContext::from_env(false, None);
    let original = id.to_string();
    let new_id = clone.id.to_string();
    let from = source.to_string();
    let to = target.to_string();
    print(
        &ui,
        &receipt(
            &ui,
            "Task migrated",
            &[
                ("Original", original.as_str()),
                ("New ID", new_id.as_str()),
                ("From", from.as_str()),
                ("To", to.as_str()),
            ],
        ),
    );
    Ok(())
}

pub async fn handle_reflect(ctx: &AppContext<'_>, args: &ReflectArgs) -> anyhow::Result<()> {
    let content = join_content(&args.content)?;

    let mut session = ctx.open_session(&args.day).await?;
    let entry = session.journal.reflect(args.kind.into(), &content).await?;
    session.close()?;

    print_entry_receipt(ctx, "Reflection saved", &entry);
    Ok(())
}

fn unchangeable(session: &Session, id: &Uuid) -> anyhow::Error {
    CliError::not_found(
        format!("Entry {} cannot be changed", short_id(id)),
        format!(
            "Hint: Migrated entries are read-only. Run `daylog view --date {}` to see open entries.",
            session.journal.viewing_date()
        ),
    )
    .into()
}

fn print_entry_receipt(ctx: &AppContext<'_>, title: &str, entry: &Entry) {
    if ctx.quiet() {
        println!("{}", entry.id);
        return;
    }
    let ui = UiContext::from_env(false, None);
    let id = entry.id.to_string();
    let kind = entry.kind.to_string();
    let date = entry.date.to_string();
    let status = entry.status.to_string();
    let content = truncate(&single_line(&entry.content), 60);
    print(
        &ui,
        &receipt(
            &ui,
            title,
            &[
                ("ID", id.as_str()),
                ("Type", kind.as_str()),
                ("Date", date.as_str()),
                ("State", status.as_str()),
                ("Content", content.as_str()),
            ],
        ),
    );
    if entry.kind.is_recurring() && entry.status == EntryStatus::Incomplete {
        print(
            &ui,
            &hint(&ui, "Shown under carry-over every day until completed."),
        );
    }
}

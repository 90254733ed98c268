//! Carry-over engine.
//!
//! Builds the two lists shown for a day. When the day being viewed is the
//! real today, incomplete tasks, notes and events left on earlier days are
//! cloned onto today and their originals retired as `migrated`.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::Result;
use crate::storage::{Entry, EntryKind, EntryStatus, EntryStore, Origin};

use super::DayView;

pub(crate) async fn load_day(
    store: &dyn EntryStore,
    clock: &dyn Clock,
    viewing_date: NaiveDate,
) -> Result<DayView> {
    let (dated, goals, important, habits, rolling) = tokio::try_join!(
        store.entries_on(viewing_date),
        store.entries_by_kind_and_status(EntryKind::Goal, EntryStatus::Incomplete),
        store.entries_by_kind_and_status(EntryKind::Important, EntryStatus::Incomplete),
        store.entries_by_kind_and_status(EntryKind::Habit, EntryStatus::Incomplete),
        store.entries_by_kinds_and_status(&EntryKind::ROLLING, EntryStatus::Incomplete),
    )?;

    let today = clock.today();
    let carried = if viewing_date == today {
        carry_into(store, clock, today, rolling).await?
    } else {
        Vec::new()
    };

    let mut carry_over: Vec<Entry> = goals.into_iter().chain(important).chain(habits).collect();
    carry_over.sort_by_key(|entry| entry.created_at);

    let mut daily: Vec<Entry> = dated
        .into_iter()
        .chain(carried)
        .filter(Entry::is_active)
        .collect();
    daily.sort_by_key(|entry| entry.created_at);

    Ok(DayView {
        date: viewing_date,
        daily,
        carry_over,
    })
}

/// Clone every overdue entry in `candidates` onto `today`, one pair at a time.
async fn carry_into(
    store: &dyn EntryStore,
    clock: &dyn Clock,
    today: NaiveDate,
    candidates: Vec<Entry>,
) -> Result<Vec<Entry>> {
    let mut carried = Vec::new();
    for original in candidates.iter().filter(|entry| entry.is_overdue(today)) {
        let clone = original.successor(
            today,
            Origin::CarriedOver {
                original_date: original.date,
            },
            clock.now(),
        );
        let flagged = original.superseded(today);

        if store.record_migration(&clone, &flagged).await? {
            debug!(original = %original.id, clone = %clone.id, from = %original.date, "carried over");
            carried.push(clone);
        } else {
            debug!(original = %original.id, "already carried over; skipped");
        }
    }

    if !carried.is_empty() {
        info!(count = carried.len(), %today, "carried overdue entries into today");
    }
    Ok(carried)
}

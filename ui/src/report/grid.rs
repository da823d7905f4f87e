//! Reconciliation of raw scan rows into a per-date, per-student, per-period
//! presence grid.
//!
//! The grid is rebuilt from scratch on every refresh from freshly fetched
//! inputs; reconciliation is a pure function, so overlapping refreshes are
//! harmless and re-running it over the same rows yields the same grid.

use std::cmp::Ordering;

use crate::core::timing;

pub const PERIODS_PER_DAY: usize = 8;

/// One recognized scan event as the backend reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRow {
    pub name: String,
    /// `"YYYY-MM-DD"`.
    pub date: String,
    /// `"HH:MM:SS"`.
    pub time: String,
}

impl AttendanceRow {
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            time: time.into(),
        }
    }
}

impl From<&api::types::ReportRow> for AttendanceRow {
    fn from(row: &api::types::ReportRow) -> Self {
        Self::new(row.name(), row.date(), row.time())
    }
}

/// Period slots for one student on one date; a slot holds the first recorded
/// scan time for that period, or `None` for absent.
pub type PeriodSlots = [Option<String>; PERIODS_PER_DAY];

fn empty_slots() -> PeriodSlots {
    std::array::from_fn(|_| None)
}

/// All students for one date, in insertion order: roster first, then any
/// ad-hoc names the rows introduced. Order is stable across re-renders of
/// the same grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGrid {
    pub date: String,
    entries: Vec<(String, PeriodSlots)>,
}

impl DayGrid {
    fn seeded(date: &str, roster: &[String]) -> Self {
        let mut day = Self {
            date: date.to_string(),
            entries: Vec::with_capacity(roster.len()),
        };
        for name in roster {
            day.ensure_entry(&name.to_uppercase());
        }
        day
    }

    /// Index of `canonical`, inserting an all-absent entry if missing.
    fn ensure_entry(&mut self, canonical: &str) -> usize {
        match self.entries.iter().position(|(name, _)| name == canonical) {
            Some(index) => index,
            None => {
                self.entries.push((canonical.to_string(), empty_slots()));
                self.entries.len() - 1
            }
        }
    }

    /// Resolves a raw row name against the existing keys: exact match first,
    /// then the first fuzzy-prefix match in key order.
    fn resolve(&self, raw: &str) -> Option<usize> {
        let upper = raw.to_uppercase();
        if let Some(index) = self.entries.iter().position(|(name, _)| *name == upper) {
            return Some(index);
        }
        self.entries
            .iter()
            .position(|(name, _)| names_match(name, &upper))
    }

    pub fn entries(&self) -> &[(String, PeriodSlots)] {
        &self.entries
    }

    pub fn slots_for(&self, name: &str) -> Option<&PeriodSlots> {
        let upper = name.to_uppercase();
        self.entries
            .iter()
            .find(|(entry_name, _)| *entry_name == upper)
            .map(|(_, slots)| slots)
    }
}

/// The reconciled output: one `DayGrid` per date seen in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateGrid {
    days: Vec<DayGrid>,
}

impl DateGrid {
    fn day_mut(&mut self, date: &str, roster: &[String]) -> &mut DayGrid {
        if let Some(index) = self.days.iter().position(|day| day.date == date) {
            return &mut self.days[index];
        }
        self.days.push(DayGrid::seeded(date, roster));
        let last = self.days.len() - 1;
        &mut self.days[last]
    }

    pub fn day(&self, date: &str) -> Option<&DayGrid> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Days in calendar-descending order (newest first), correct across
    /// month and year boundaries. Unparsable dates sort last; ties keep
    /// insertion order.
    pub fn ordered_days(&self) -> Vec<&DayGrid> {
        let mut days: Vec<&DayGrid> = self.days.iter().collect();
        days.sort_by(|a, b| {
            match (timing::parse_date(&a.date), timing::parse_date(&b.date)) {
                (Some(da), Some(db)) => db.cmp(&da),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => b.date.cmp(&a.date),
            }
        });
        days
    }
}

/// Fixed hour→period table: 08:xx is period 1 through 15:xx period 8. Any
/// other parsed hour, including nonsense like 25, falls back to
/// `(hour % 8) + 1`, which can collide with a real period; that ambiguity is
/// inherited behaviour, kept as-is. Unparsable hours yield `None`.
pub fn period_of(time: &str) -> Option<u8> {
    let hour: u32 = time.split(':').next()?.trim().parse().ok()?;
    Some(match hour {
        8..=15 => (hour - 7) as u8,
        _ => ((hour % 8) + 1) as u8,
    })
}

/// Two names match when they are equal or one is a space-separated prefix of
/// the other (covers missing middle initials). Callers pass uppercase.
fn names_match(a: &str, b: &str) -> bool {
    a == b
        || a.strip_prefix(b).is_some_and(|rest| rest.starts_with(' '))
        || b.strip_prefix(a).is_some_and(|rest| rest.starts_with(' '))
}

/// Merges raw rows into a grid keyed by date, with every date seeded from
/// the roster. First write wins per (date, student, period); later scans in
/// the same period are ignored. Row names missing from the roster become
/// ad-hoc entries scoped to their own date. A row whose time cannot be
/// parsed still seeds its date and resolves its name; only the slot write
/// is skipped.
pub fn reconcile(rows: &[AttendanceRow], roster: &[String], include_empty_today: bool) -> DateGrid {
    reconcile_at(
        rows,
        roster,
        include_empty_today,
        &timing::format_date(timing::today_local()),
    )
}

/// Same as [`reconcile`] with "today" injected, so the seeding behaviour is
/// testable on any calendar day.
pub fn reconcile_at(
    rows: &[AttendanceRow],
    roster: &[String],
    include_empty_today: bool,
    today: &str,
) -> DateGrid {
    let mut grid = DateGrid::default();

    if include_empty_today {
        grid.day_mut(today, roster);
    }

    for row in rows {
        let day = grid.day_mut(&row.date, roster);
        let index = match day.resolve(&row.name) {
            Some(index) => index,
            None => day.ensure_entry(&row.name.to_uppercase()),
        };

        let Some(period) = period_of(&row.time) else {
            continue;
        };

        let slot = &mut day.entries[index].1[usize::from(period - 1)];
        if slot.is_none() {
            *slot = Some(row.time.clone());
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn period_table_matches_timetable() {
        assert_eq!(period_of("08:15:00"), Some(1));
        assert_eq!(period_of("09:00:00"), Some(2));
        assert_eq!(period_of("13:30:00"), Some(6));
        assert_eq!(period_of("15:59:00"), Some(8));
    }

    #[test]
    fn off_timetable_hours_use_modulo_fallback() {
        // (23 % 8) + 1 = 8: collides with the real period 8 bucket.
        assert_eq!(period_of("23:10:00"), Some(8));
        assert_eq!(period_of("00:30:00"), Some(1));
        assert_eq!(period_of("07:59:59"), Some(8));
        // Even an impossible hour parses and takes the fallback.
        assert_eq!(period_of("25:00:00"), Some(2));
    }

    #[test]
    fn unparsable_times_resolve_to_none() {
        assert_eq!(period_of(""), None);
        assert_eq!(period_of("noon"), None);
        assert_eq!(period_of("-1:00:00"), None);
    }

    #[test]
    fn first_write_wins_within_a_period() {
        let rows = vec![
            AttendanceRow::new("SANJAY G", "2024-06-01", "08:10:00"),
            AttendanceRow::new("SANJAY G", "2024-06-01", "08:50:00"),
        ];
        let grid = reconcile_at(&rows, &roster(&["SANJAY G"]), false, "2024-06-02");

        let slots = grid
            .day("2024-06-01")
            .and_then(|day| day.slots_for("SANJAY G"))
            .expect("entry exists");
        assert_eq!(slots[0].as_deref(), Some("08:10:00"));
        assert!(slots[1..].iter().all(Option::is_none));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let rows = vec![
            AttendanceRow::new("SANJAY G", "2024-06-01", "08:10:00"),
            AttendanceRow::new("VIKRAM K", "2024-06-01", "09:12:00"),
            AttendanceRow::new("SANJAY", "2024-06-03", "10:00:00"),
        ];
        let names = roster(&["SANJAY G", "VIKRAM K"]);
        let first = reconcile_at(&rows, &names, true, "2024-06-04");
        let second = reconcile_at(&rows, &names, true, "2024-06-04");
        assert_eq!(first, second);
    }

    #[test]
    fn fuzzy_prefix_matches_both_directions() {
        let names = roster(&["SANJAY G", "VIKRAM K"]);
        let rows = vec![
            AttendanceRow::new("SANJAY", "2024-06-01", "08:00:00"),
            AttendanceRow::new("SANJAY G KUMAR", "2024-06-01", "09:00:00"),
        ];
        let grid = reconcile_at(&rows, &names, false, "2024-06-02");
        let day = grid.day("2024-06-01").expect("date present");

        // Both variants landed on the canonical roster entry.
        assert_eq!(day.entries().len(), 2);
        let slots = day.slots_for("SANJAY G").expect("canonical entry");
        assert_eq!(slots[0].as_deref(), Some("08:00:00"));
        assert_eq!(slots[1].as_deref(), Some("09:00:00"));
    }

    #[test]
    fn prefix_match_requires_a_word_boundary() {
        let names = roster(&["SANJAY G"]);
        let rows = vec![AttendanceRow::new("SANJAYA", "2024-06-01", "08:00:00")];
        let grid = reconcile_at(&rows, &names, false, "2024-06-02");
        let day = grid.day("2024-06-01").expect("date present");

        // "SANJAYA" is not a space-separated prefix of "SANJAY G".
        assert_eq!(day.entries().len(), 2);
        assert!(day.slots_for("SANJAYA").is_some());
    }

    #[test]
    fn unmatched_names_stay_scoped_to_their_date() {
        let names = roster(&["SANJAY G"]);
        let rows = vec![
            AttendanceRow::new("NEW STUDENT X", "2024-06-01", "08:00:00"),
            AttendanceRow::new("SANJAY G", "2024-06-02", "08:00:00"),
        ];
        let grid = reconcile_at(&rows, &names, false, "2024-06-03");

        assert!(grid
            .day("2024-06-01")
            .and_then(|day| day.slots_for("NEW STUDENT X"))
            .is_some());
        assert!(grid
            .day("2024-06-02")
            .and_then(|day| day.slots_for("NEW STUDENT X"))
            .is_none());
    }

    #[test]
    fn empty_rows_seed_today_when_asked() {
        let names = roster(&["A B", "C D", "E F"]);
        let grid = reconcile_at(&[], &names, true, "2024-06-01");

        assert_eq!(grid.day_count(), 1);
        let day = grid.day("2024-06-01").expect("today seeded");
        assert_eq!(day.entries().len(), 3);
        for (_, slots) in day.entries() {
            assert!(slots.iter().all(Option::is_none));
        }
    }

    #[test]
    fn month_filtered_view_does_not_seed_today() {
        let grid = reconcile_at(&[], &roster(&["A B"]), false, "2024-06-01");
        assert!(grid.is_empty());
    }

    #[test]
    fn every_new_date_is_seeded_with_the_full_roster() {
        let names = roster(&["A B", "C D"]);
        let rows = vec![AttendanceRow::new("A B", "2024-06-01", "08:00:00")];
        let grid = reconcile_at(&rows, &names, false, "2024-06-02");
        let day = grid.day("2024-06-01").expect("date present");

        assert_eq!(day.entries().len(), 2);
        assert!(day
            .slots_for("C D")
            .is_some_and(|slots| slots.iter().all(Option::is_none)));
    }

    #[test]
    fn duplicate_roster_names_do_not_corrupt_the_grid() {
        let names = roster(&["A B", "A B", "C D"]);
        let grid = reconcile_at(&[], &names, true, "2024-06-01");
        let day = grid.day("2024-06-01").expect("today seeded");
        assert_eq!(day.entries().len(), 2);
    }

    #[test]
    fn ordering_is_calendar_descending_across_boundaries() {
        let names = roster(&["A B"]);
        let rows = vec![
            AttendanceRow::new("A B", "2024-01-02", "08:00:00"),
            AttendanceRow::new("A B", "2023-12-31", "08:00:00"),
            AttendanceRow::new("A B", "2024-02-01", "08:00:00"),
            AttendanceRow::new("A B", "2024-01-10", "08:00:00"),
        ];
        let grid = reconcile_at(&rows, &names, false, "2024-02-02");
        let dates: Vec<&str> = grid
            .ordered_days()
            .iter()
            .map(|day| day.date.as_str())
            .collect();
        assert_eq!(dates, ["2024-02-01", "2024-01-10", "2024-01-02", "2023-12-31"]);
    }

    #[test]
    fn malformed_row_times_are_dropped_not_fatal() {
        let names = roster(&["A B"]);
        let rows = vec![
            AttendanceRow::new("A B", "2024-06-01", "garbage"),
            AttendanceRow::new("A B", "2024-06-01", "09:00:00"),
        ];
        let grid = reconcile_at(&rows, &names, false, "2024-06-02");
        let slots = grid
            .day("2024-06-01")
            .and_then(|day| day.slots_for("A B"))
            .expect("entry exists");
        assert!(slots[0].is_none());
        assert_eq!(slots[1].as_deref(), Some("09:00:00"));
    }

    #[test]
    fn unparsable_time_still_seeds_its_date() {
        let names = roster(&["A B", "C D"]);
        let rows = vec![AttendanceRow::new("NEW STUDENT X", "2024-06-01", "garbage")];
        let grid = reconcile_at(&rows, &names, false, "2024-06-02");

        // The date shows up as an all-absent roster grid, and the row's
        // name still resolved into an entry; only the slot write was skipped.
        let day = grid.day("2024-06-01").expect("date seeded");
        assert_eq!(day.entries().len(), 3);
        for (_, slots) in day.entries() {
            assert!(slots.iter().all(Option::is_none));
        }
    }
}

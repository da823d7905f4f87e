//! End-to-end reconciliation scenarios across the public report API.

use ui::report::grid::{reconcile_at, AttendanceRow};
use ui::report::roster::merge_roster;

fn row(name: &str, date: &str, time: &str) -> AttendanceRow {
    AttendanceRow::new(name, date, time)
}

#[test]
fn a_full_week_reconciles_into_a_stable_grid() {
    let roster = merge_roster(&["EXCHANGE VISITOR".to_string()]);
    let rows = vec![
        row("SANJAY G", "2024-06-03", "08:02:11"),
        row("SANJAY", "2024-06-03", "09:15:40"),
        row("SANJAY G KUMAR", "2024-06-03", "09:20:00"),
        row("VIKRAM K", "2024-06-03", "08:05:00"),
        row("EXCHANGE VISITOR", "2024-06-04", "10:00:00"),
        row("VIKRAM K", "2024-06-07", "13:30:00"),
        row("VIKRAM K", "2024-06-07", "15:59:59"),
    ];

    let grid = reconcile_at(&rows, &roster, false, "2024-06-08");
    assert_eq!(grid.day_count(), 3);

    // Newest day first, even though it was inserted last.
    let dates: Vec<&str> = grid
        .ordered_days()
        .iter()
        .map(|day| day.date.as_str())
        .collect();
    assert_eq!(dates, ["2024-06-07", "2024-06-04", "2024-06-03"]);

    // All three SANJAY spellings collapsed onto the roster entry; the later
    // scan in the same period lost to the first.
    let monday = grid.day("2024-06-03").expect("monday present");
    let sanjay = monday.slots_for("SANJAY G").expect("roster entry");
    assert_eq!(sanjay[0].as_deref(), Some("08:02:11"));
    assert_eq!(sanjay[1].as_deref(), Some("09:15:40"));

    // The merged roster name seeds every day, scans or not.
    assert!(monday
        .slots_for("EXCHANGE VISITOR")
        .is_some_and(|slots| slots.iter().all(Option::is_none)));
    let tuesday = grid.day("2024-06-04").expect("tuesday present");
    assert_eq!(
        tuesday
            .slots_for("EXCHANGE VISITOR")
            .and_then(|slots| slots[2].as_deref()),
        Some("10:00:00")
    );

    let friday = grid.day("2024-06-07").expect("friday present");
    let vikram = friday.slots_for("VIKRAM K").expect("roster entry");
    assert_eq!(vikram[5].as_deref(), Some("13:30:00"));
    assert_eq!(vikram[7].as_deref(), Some("15:59:59"));
}

#[test]
fn rerunning_the_same_input_changes_nothing() {
    let roster = merge_roster(&[]);
    let rows = vec![
        row("SANJAY G", "2024-05-31", "08:00:00"),
        row("DROP IN GUEST", "2024-06-01", "11:30:00"),
        row("SANJAY G", "2024-06-01", "bad-time"),
    ];

    let first = reconcile_at(&rows, &roster, true, "2024-06-02");
    let second = reconcile_at(&rows, &roster, true, "2024-06-02");
    assert_eq!(first, second);

    // The malformed row was dropped, not fatal; the guest stayed scoped.
    assert!(first
        .day("2024-06-01")
        .and_then(|day| day.slots_for("DROP IN GUEST"))
        .is_some());
    assert!(first
        .day("2024-05-31")
        .and_then(|day| day.slots_for("DROP IN GUEST"))
        .is_none());
}

#[test]
fn todays_empty_grid_lists_the_whole_class() {
    let roster = merge_roster(&[]);
    let grid = reconcile_at(&[], &roster, true, "2024-06-10");

    let today = grid.day("2024-06-10").expect("today seeded");
    assert_eq!(today.entries().len(), roster.len());
    for (_, slots) in today.entries() {
        assert_eq!(slots.len(), 8);
        assert!(slots.iter().all(Option::is_none));
    }
}

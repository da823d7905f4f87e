use dioxus::prelude::*;

use crate::core::format;

use super::grid::{DateGrid, PERIODS_PER_DAY};

/// The reconciled grid rendered as one table per date, newest first. Pure
/// function of its props; the dashboard owns fetching and refresh.
#[component]
pub fn ReportTable(grid: DateGrid) -> Element {
    if grid.is_empty() {
        return rsx! {
            p { class: "report-empty", "No attendance records yet." }
        };
    }

    // Flatten each day into plain display rows before rsx so the markup
    // below stays free of reconciliation logic.
    let days: Vec<(String, Vec<(String, Vec<Option<String>>)>)> = grid
        .ordered_days()
        .into_iter()
        .map(|day| {
            let rows = day
                .entries()
                .iter()
                .map(|(name, slots)| {
                    let cells: Vec<Option<String>> = slots
                        .iter()
                        .map(|slot| slot.as_deref().map(format::format_time_ampm))
                        .collect();
                    (name.clone(), cells)
                })
                .collect();
            (day.date.clone(), rows)
        })
        .collect();

    rsx! {
        div { class: "report",
            for (date, rows) in days {
                section { class: "report-day", key: "{date}",
                    h3 { class: "report-day__date", "{date}" }
                    table { class: "report-day__table",
                        thead {
                            tr {
                                th { "Student" }
                                for period in 1..=PERIODS_PER_DAY {
                                    th { "P{period}" }
                                }
                            }
                        }
                        tbody {
                            for (name, slots) in rows {
                                tr { key: "{name}",
                                    td { class: "report-day__name", "{name}" }
                                    for slot in slots {
                                        if let Some(time) = slot {
                                            td { class: "report-day__present", "✅ {time}" }
                                        } else {
                                            td { class: "report-day__absent", "-" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

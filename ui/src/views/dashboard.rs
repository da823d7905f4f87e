//! Admin dashboard: the reconciled report, month filter, analytics widgets,
//! and the assistant chat.
//!
//! The report refreshes every ten seconds while the page is mounted. Each
//! refresh rebuilds the whole grid from fresh fetches and swaps it in, so a
//! tick that overlaps a manual month change just renders whichever state
//! finished last.

use std::cell::RefCell;
use std::rc::Rc;

use api::types::{HeatmapCounts, IntelligenceStats};
use dioxus::prelude::*;

use crate::chat::ChatWidget;
use crate::components::{report_error, StatusMessage};
use crate::core::schedule::RepeatingTask;
use crate::core::session::Session;
use crate::report::analytics::{heatmap_cells, weekday_trend};
use crate::report::{roster, ReportState, ReportTable, PERIODS_PER_DAY};

const REFRESH_INTERVAL_MS: u64 = 10_000;
/// Consecutive refresh failures back off up to one minute.
const REFRESH_MAX_INTERVAL_MS: u64 = 60_000;

#[component]
pub fn Dashboard() -> Element {
    let session = use_context::<Signal<Session>>();
    let status = use_context::<Signal<StatusMessage>>();
    let report = use_signal(|| Option::<ReportState>::None);
    let selected_month = use_signal(String::new);
    let mut intelligence = use_signal(|| Option::<IntelligenceStats>::None);
    let mut heatmap = use_signal(|| Option::<HeatmapCounts>::None);

    let refresh_task = use_hook(|| Rc::new(RefCell::new(Option::<RepeatingTask>::None)));

    // Initial load plus the periodic refresh.
    use_effect({
        let refresh_task = Rc::clone(&refresh_task);
        move || {
            spawn(async move {
                refresh_report(session, selected_month, report, status).await;
            });

            let task = RepeatingTask::spawn_with_backoff(
                REFRESH_INTERVAL_MS,
                REFRESH_MAX_INTERVAL_MS,
                move || refresh_report(session, selected_month, report, status),
            );
            *refresh_task.borrow_mut() = Some(task);

            if session.read().is_authenticated() {
                spawn(async move {
                    let client = session.read().client();
                    if let Ok(stats) = client.analytics_intelligence().await {
                        intelligence.set(Some(stats));
                    }
                    if let Ok(reply) = client.analytics_heatmap().await {
                        heatmap.set(Some(reply.heatmap));
                    }
                });
            }
        }
    });

    use_drop({
        let refresh_task = Rc::clone(&refresh_task);
        move || {
            refresh_task.borrow_mut().take();
        }
    });

    let mut month_signal = selected_month;
    let change_month = move |event: FormEvent| {
        month_signal.set(event.value());
        spawn(async move {
            refresh_report(session, month_signal, report, status).await;
        });
    };

    let current = report.read().clone();
    let stats = intelligence.read().clone();
    let roster_size = roster::CLASS_ROSTER.len() as u32;

    // Flattened heatmap rows: (short weekday label, cells for its 8 periods).
    let heat_rows: Vec<(String, Vec<(String, String, String)>)> = heatmap
        .read()
        .as_ref()
        .map(|counts| {
            heatmap_cells(counts, roster_size)
                .chunks(PERIODS_PER_DAY)
                .map(|row| {
                    let label = row[0].weekday[..3].to_string();
                    let cells = row
                        .iter()
                        .map(|cell| {
                            (
                                format!("{}-{}", cell.weekday, cell.period),
                                cell.level.css_class().to_string(),
                                cell.tooltip(),
                            )
                        })
                        .collect();
                    (label, cells)
                })
                .collect()
        })
        .unwrap_or_default();

    let trend: Vec<(String, u32)> = heatmap
        .read()
        .as_ref()
        .map(|counts| {
            weekday_trend(counts)
                .into_iter()
                .map(|(weekday, average)| (weekday[..3].to_string(), average))
                .collect()
        })
        .unwrap_or_default();

    rsx! {
        section { class: "page page-dashboard",
            h1 { "Dashboard" }

            if let Some(stats) = stats {
                div { class: "dashboard-stats",
                    div { class: "dashboard-stats__card",
                        span { class: "dashboard-stats__label", "Occupancy today" }
                        span { class: "dashboard-stats__value", "{stats.occupancy}" }
                    }
                    div { class: "dashboard-stats__card",
                        span { class: "dashboard-stats__label", "Most skipped period" }
                        span { class: "dashboard-stats__value", "{stats.most_skipped_period}" }
                    }
                    if !stats.frequent_absentees.is_empty() {
                        div { class: "dashboard-stats__card dashboard-stats__card--wide",
                            span { class: "dashboard-stats__label", "Frequent absentees" }
                            ul {
                                for absentee in stats.frequent_absentees {
                                    li { key: "{absentee.name}",
                                        "{absentee.name} ({absentee.percentage}%)"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if !heat_rows.is_empty() {
                section { class: "dashboard-heatmap",
                    h2 { "Weekly presence" }
                    div { class: "dashboard-heatmap__grid",
                        div {}
                        for period in 1..=PERIODS_PER_DAY {
                            div { class: "dashboard-heatmap__period", "P{period}" }
                        }
                        for (label, cells) in heat_rows {
                            div { class: "dashboard-heatmap__day", "{label}" }
                            for (cell_key, css_class, tooltip) in cells {
                                div { key: "{cell_key}", class: "{css_class}", title: "{tooltip}" }
                            }
                        }
                    }
                    h2 { "Average daily attendance" }
                    table { class: "dashboard-trend",
                        thead {
                            tr {
                                for (label, _) in trend.iter() {
                                    th { "{label}" }
                                }
                            }
                        }
                        tbody {
                            tr {
                                for (label, average) in trend.iter() {
                                    td { key: "{label}", "{average}" }
                                }
                            }
                        }
                    }
                }
            }

            section { class: "dashboard-report",
                h2 { "Attendance report" }
                if let Some(state) = current {
                    select { class: "dashboard-report__month", onchange: change_month,
                        option { value: "", "All months" }
                        for month in state.months.iter() {
                            option {
                                key: "{month}",
                                value: "{month}",
                                selected: *month == *selected_month.read(),
                                "{month}"
                            }
                        }
                    }
                    if let Some(warning) = state.warning {
                        p { class: "dashboard-report__warning", "{warning}" }
                    }
                    ReportTable { grid: state.grid }
                } else {
                    p { class: "dashboard-report__loading", "Loading report…" }
                }
            }

            ChatWidget {}
        }
    }
}

/// One full report refresh. A fatal fetch error lands on the status banner;
/// the previous grid stays on screen until a refresh succeeds. The returned
/// flag feeds the refresh loop's backoff.
async fn refresh_report(
    session: Signal<Session>,
    selected_month: Signal<String>,
    mut report: Signal<Option<ReportState>>,
    status: Signal<StatusMessage>,
) -> bool {
    let client = session.read().client();
    let month = selected_month.read().clone();
    let month = (!month.is_empty()).then_some(month);

    match ReportState::fetch(&client, month.as_deref()).await {
        Ok(state) => {
            report.set(Some(state));
            true
        }
        Err(err) => {
            report_error(status, format!("Report unavailable: {err}"));
            false
        }
    }
}

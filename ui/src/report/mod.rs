//! The attendance report: reconciliation, roster, analytics view models,
//! and the rendered grid.

pub mod analytics;
pub mod grid;
pub mod roster;
mod view;

pub use grid::{reconcile, AttendanceRow, DateGrid, DayGrid, PeriodSlots, PERIODS_PER_DAY};
pub use view::ReportTable;

use api::{ApiClient, ApiError};

/// Everything one report refresh produced. Rebuilt whole on every tick; the
/// UI swaps in the new value, so a half-applied refresh can never render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportState {
    pub grid: DateGrid,
    /// Month keys (`"YYYY-MM"`) the backend has data for, for the filter.
    pub months: Vec<String>,
    /// Set when a secondary fetch failed and the report rendered anyway.
    pub warning: Option<String>,
}

impl ReportState {
    /// Fetches rows (and the live roster) and reconciles them. A failed rows
    /// fetch is fatal; a failed students or months fetch degrades to the
    /// static roster or an empty month list, with a warning attached.
    ///
    /// `month` filters to one `"YYYY-MM"`; the unfiltered view seeds an empty
    /// grid for today so the current day renders before the first scan.
    pub async fn fetch(client: &ApiClient, month: Option<&str>) -> Result<Self, ApiError> {
        let raw = match month {
            Some(month) => client.report_month(month).await?,
            None => client.report().await?,
        };
        let rows: Vec<AttendanceRow> = raw.iter().map(AttendanceRow::from).collect();

        let mut warning = None;

        let class_roster = match client.students().await {
            Ok(students) => {
                let names: Vec<String> =
                    students.into_iter().map(|student| student.name).collect();
                roster::merge_roster(&names)
            }
            Err(err) => {
                warning = Some(format!("student list unavailable ({err}); using built-in roster"));
                roster::static_roster()
            }
        };

        let months = match client.report_months().await {
            Ok(months) => months,
            Err(err) => {
                warning.get_or_insert_with(|| format!("month list unavailable ({err})"));
                Vec::new()
            }
        };

        let grid = reconcile(&rows, &class_roster, month.is_none());

        Ok(Self {
            grid,
            months,
            warning,
        })
    }
}

//! Pure view models for the dashboard analytics widgets.
//!
//! The backend ships raw weekday-by-period presence counts; everything
//! rendered from them (heatmap colour levels, the weekday trend line) is
//! computed here so the components stay declarative.

use api::types::HeatmapCounts;

use super::grid::PERIODS_PER_DAY;

/// Heatmap rows, in display order. Sunday is not a school day.
pub const WEEKDAYS: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Colour bucket for one heatmap cell, derived from presence percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceLevel {
    /// No scans at all for this weekday/period.
    Empty,
    Low,
    Mid,
    High,
}

impl PresenceLevel {
    pub fn from_count(count: u32, roster_size: u32) -> Self {
        if count == 0 || roster_size == 0 {
            return Self::Empty;
        }
        let pct = count as f64 / roster_size as f64 * 100.0;
        if pct >= 85.0 {
            Self::High
        } else if pct >= 75.0 {
            Self::Mid
        } else {
            Self::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Empty => "heatmap-cell heatmap-cell--empty",
            Self::Low => "heatmap-cell heatmap-cell--low",
            Self::Mid => "heatmap-cell heatmap-cell--mid",
            Self::High => "heatmap-cell heatmap-cell--high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapCell {
    pub weekday: &'static str,
    pub period: u8,
    pub count: u32,
    pub level: PresenceLevel,
}

impl HeatmapCell {
    pub fn tooltip(&self) -> String {
        format!("{} P{}: {} present", self.weekday, self.period, self.count)
    }
}

/// Flattens the counts into row-major cells, Monday P1 through Saturday P8.
/// Missing weekdays or periods in the payload read as zero.
pub fn heatmap_cells(counts: &HeatmapCounts, roster_size: u32) -> Vec<HeatmapCell> {
    let mut cells = Vec::with_capacity(WEEKDAYS.len() * PERIODS_PER_DAY);
    for weekday in WEEKDAYS {
        let by_period = counts.get(weekday);
        for period in 1..=PERIODS_PER_DAY as u8 {
            let count = by_period
                .and_then(|periods| periods.get(&period.to_string()))
                .copied()
                .unwrap_or(0);
            cells.push(HeatmapCell {
                weekday,
                period,
                count,
                level: PresenceLevel::from_count(count, roster_size),
            });
        }
    }
    cells
}

/// Average daily attendance per weekday: the period counts summed and
/// divided by eight, rounded to the nearest student.
pub fn weekday_trend(counts: &HeatmapCounts) -> Vec<(&'static str, u32)> {
    WEEKDAYS
        .iter()
        .map(|weekday| {
            let sum: u32 = counts
                .get(*weekday)
                .map(|periods| periods.values().sum())
                .unwrap_or(0);
            let avg = (sum as f64 / PERIODS_PER_DAY as f64).round() as u32;
            (*weekday, avg)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn counts_for(weekday: &str, per_period: &[(u8, u32)]) -> HeatmapCounts {
        let mut periods = BTreeMap::new();
        for (period, count) in per_period {
            periods.insert(period.to_string(), *count);
        }
        let mut counts = HeatmapCounts::new();
        counts.insert(weekday.to_string(), periods);
        counts
    }

    #[test]
    fn levels_follow_the_thresholds() {
        // 62-student roster: 85% is 52.7, 75% is 46.5.
        assert_eq!(PresenceLevel::from_count(0, 62), PresenceLevel::Empty);
        assert_eq!(PresenceLevel::from_count(40, 62), PresenceLevel::Low);
        assert_eq!(PresenceLevel::from_count(47, 62), PresenceLevel::Mid);
        assert_eq!(PresenceLevel::from_count(53, 62), PresenceLevel::High);
        assert_eq!(PresenceLevel::from_count(62, 62), PresenceLevel::High);
    }

    #[test]
    fn zero_roster_never_divides() {
        assert_eq!(PresenceLevel::from_count(10, 0), PresenceLevel::Empty);
    }

    #[test]
    fn cells_cover_six_days_by_eight_periods() {
        let counts = counts_for("Monday", &[(1, 60), (2, 10)]);
        let cells = heatmap_cells(&counts, 62);

        assert_eq!(cells.len(), 48);
        assert_eq!(cells[0].weekday, "Monday");
        assert_eq!(cells[0].period, 1);
        assert_eq!(cells[0].level, PresenceLevel::High);
        assert_eq!(cells[1].level, PresenceLevel::Low);
        // Tuesday has no data: every cell reads zero.
        assert!(cells[8..16]
            .iter()
            .all(|cell| cell.count == 0 && cell.level == PresenceLevel::Empty));
    }

    #[test]
    fn tooltip_names_the_slot() {
        let counts = counts_for("Friday", &[(3, 12)]);
        let cells = heatmap_cells(&counts, 62);
        let cell = cells
            .iter()
            .find(|cell| cell.weekday == "Friday" && cell.period == 3)
            .expect("friday P3 present");
        assert_eq!(cell.tooltip(), "Friday P3: 12 present");
    }

    #[test]
    fn trend_averages_over_eight_periods() {
        let counts = counts_for("Monday", &[(1, 10), (2, 10), (3, 10), (4, 10)]);
        let trend = weekday_trend(&counts);

        assert_eq!(trend.len(), 6);
        // 40 scans over 8 periods averages to 5.
        assert_eq!(trend[0], ("Monday", 5));
        assert_eq!(trend[1], ("Tuesday", 0));
    }
}

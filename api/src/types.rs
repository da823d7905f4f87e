//! Wire types for the attendance backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One raw scan event as the report endpoints deliver it: a bare
/// `[name, date, time]` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow(pub String, pub String, pub String);

impl ReportRow {
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn date(&self) -> &str {
        &self.1
    }

    pub fn time(&self) -> &str {
        &self.2
    }
}

/// The recognizer has returned both bare name strings and `{name}` objects
/// over its lifetime; tolerate either.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecognizedFace {
    Named { name: String },
    Bare(String),
}

impl RecognizedFace {
    pub fn name(&self) -> &str {
        match self {
            Self::Named { name } => name,
            Self::Bare(name) => name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub recognized: Vec<RecognizedFace>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RecognizeResponse {
    /// Distinct recognized names, with the recognizer's "Unknown" marker
    /// filtered out.
    pub fn known_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for face in &self.recognized {
            let name = face.name();
            if name == "Unknown" {
                continue;
            }
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

/// Generic `{status, message}` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudentName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyRecord {
    pub date: String,
    #[serde(default)]
    pub times: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub present: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub low_attendance: bool,
    #[serde(default)]
    pub leave_dates: Vec<String>,
    #[serde(default)]
    pub records: Vec<DailyRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_info: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn succeeded(&self) -> bool {
        self.status == "success" && self.token.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AbsenteeStat {
    pub name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntelligenceStats {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub occupancy: u32,
    #[serde(default)]
    pub most_skipped_period: String,
    #[serde(default)]
    pub frequent_absentees: Vec<AbsenteeStat>,
}

/// Weekday name → period (as a string key, `"1"`..`"8"`) → scan count.
pub type HeatmapCounts = BTreeMap<String, BTreeMap<String, u32>>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeatmapResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub heatmap: HeatmapCounts,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatReply {
    pub fn text(&self) -> &str {
        self.response
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("Error")
    }
}

/// One edit to a student's daily attendance record. `present = false` removes
/// the record (marks leave) instead of moving it.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEdit {
    pub name: String,
    pub date: String,
    pub time: String,
    pub new_date: String,
    pub new_time: String,
    pub present: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_rows_decode_from_bare_arrays() {
        let rows: Vec<ReportRow> = serde_json::from_str(
            r#"[["SANJAY G", "2024-06-01", "08:10:00"], ["VIKRAM K", "2024-06-01", "09:05:12"]]"#,
        )
        .expect("rows decode");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name(), "SANJAY G");
        assert_eq!(rows[1].date(), "2024-06-01");
        assert_eq!(rows[1].time(), "09:05:12");
    }

    #[test]
    fn recognized_faces_decode_both_shapes() {
        let resp: RecognizeResponse = serde_json::from_str(
            r#"{"status":"success","recognized":["VIKRAM K",{"name":"SANJAY G"},"Unknown","VIKRAM K"]}"#,
        )
        .expect("response decodes");
        assert_eq!(resp.known_names(), vec!["VIKRAM K", "SANJAY G"]);
    }

    #[test]
    fn heatmap_decodes_string_period_keys() {
        let resp: HeatmapResponse = serde_json::from_str(
            r#"{"status":"success","heatmap":{"Monday":{"1":12,"2":0},"Tuesday":{"1":3}}}"#,
        )
        .expect("heatmap decodes");
        assert_eq!(resp.heatmap["Monday"]["1"], 12);
        assert_eq!(resp.heatmap["Tuesday"]["1"], 3);
    }

    #[test]
    fn profile_tolerates_missing_optionals() {
        let profile: StudentProfile =
            serde_json::from_str(r#"{"name":"VIKRAM K"}"#).expect("profile decodes");
        assert_eq!(profile.name, "VIKRAM K");
        assert!(profile.records.is_empty());
        assert!(!profile.low_attendance);
    }
}

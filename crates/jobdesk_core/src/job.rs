use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type JobId = i64;

/// One translation work item as returned by the TMS list API.
///
/// The TMS schema is not under our control, so every field is optional and
/// the loosely typed ones (`wordCount`, the date candidates) are kept as raw
/// JSON values and coerced on access.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Job {
    pub id: Option<JobId>,
    pub job_name: Option<String>,
    pub status: Option<String>,
    pub tms_project: Option<TmsProject>,
    pub strings: Option<Vec<JobString>>,
    pub due_date: Option<Value>,
    pub deadline: Option<Value>,
    pub delivery_date: Option<Value>,
    pub created_at: Option<Value>,
    pub create_time: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TmsProject {
    pub name: Option<String>,
}

/// One translatable string inside a job. `wordCount` arrives either as a
/// number or as a numeric string depending on the TMS version.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobString {
    pub word_count: Option<Value>,
}

/// Normalized view of the free-form `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Waiting,
    InProgress,
    Completed,
    Other,
}

/// Month names for the hardcoded it-IT due-date display ("4 dicembre").
const IT_MONTHS: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

impl Job {
    /// Upper-cased raw status, empty when absent.
    pub fn status_upper(&self) -> String {
        self.status.as_deref().unwrap_or("").to_uppercase()
    }

    pub fn status_kind(&self) -> StatusKind {
        match self.status_upper().as_str() {
            "WAITING" => StatusKind::Waiting,
            "IN_PROGRESS" => StatusKind::InProgress,
            "COMPLETED" => StatusKind::Completed,
            _ => StatusKind::Other,
        }
    }

    pub fn project_name(&self) -> Option<&str> {
        self.tms_project.as_ref()?.name.as_deref()
    }

    /// Total word count over `strings[].wordCount`.
    ///
    /// Numeric strings are coerced; missing or non-numeric entries count as
    /// zero. Never fails on malformed data.
    pub fn word_count(&self) -> u64 {
        let Some(strings) = &self.strings else {
            return 0;
        };
        strings
            .iter()
            .map(|s| coerce_word_count(s.word_count.as_ref()))
            .sum()
    }

    /// The job's reference date: the first present-and-parseable candidate
    /// field, in a fixed preference order. `None` is a valid absence state,
    /// and an unparseable candidate is treated the same as a missing one.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        [
            &self.due_date,
            &self.deadline,
            &self.delivery_date,
            &self.created_at,
            &self.create_time,
        ]
        .into_iter()
        .flatten()
        .find_map(parse_date_value)
    }

    /// Due date formatted for display, or a placeholder when absent.
    pub fn display_due_date(&self) -> String {
        match self.date() {
            Some(date) => format!("{} {}", date.day(), IT_MONTHS[date.month0() as usize]),
            None => "-".to_string(),
        }
    }
}

fn coerce_word_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| as_nonnegative_int(n.as_f64()))
            .unwrap_or(0),
        Some(Value::String(s)) => as_nonnegative_int(s.trim().parse::<f64>().ok()).unwrap_or(0),
        _ => 0,
    }
}

fn as_nonnegative_int(value: Option<f64>) -> Option<u64> {
    value.filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64)
}

fn parse_date_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        // Numeric timestamps are epoch milliseconds on the wire.
        Value::Number(n) => Utc.timestamp_millis_opt(n.as_i64()?).single(),
        Value::String(raw) => parse_date_str(raw.trim()),
        _ => None,
    }
}

fn parse_date_str(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Naive timestamps from the TMS carry no offset; treat them as UTC.
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(chrono::NaiveTime::MIN).and_utc())
}

//! Tank data models
//!
//! Field names serialize in camelCase so persisted blobs keep the layout
//! `{id, text, completed, date, phaseId, isCustom, dueDate?, priority, category}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Priority level for tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority '{other}' (expected low, medium or high)")),
        }
    }
}

/// What kind of work a task is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Maintenance,
    Testing,
    Equipment,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Maintenance => "maintenance",
            Category::Testing => "testing",
            Category::Equipment => "equipment",
            Category::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maintenance" => Ok(Category::Maintenance),
            "testing" => Ok(Category::Testing),
            "equipment" => Ok(Category::Equipment),
            "other" => Ok(Category::Other),
            other => Err(format!(
                "unknown category '{other}' (expected maintenance, testing, equipment or other)"
            )),
        }
    }
}

/// Free-text guidance for what the test kit should show during a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpectedReadings {
    pub ammonia: &'static str,
    pub nitrite: &'static str,
    pub nitrate: &'static str,
}

/// One step of the cycling timeline.
///
/// `start_day..=end_day` is inclusive on both ends; consecutive phases share
/// their boundary day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub name: &'static str,
    pub description: &'static str,
    pub start_day: i64,
    pub end_day: i64,
    pub expected_readings: ExpectedReadings,
    /// Template task descriptions used to seed the task list
    pub tasks: &'static [&'static str],
}

impl Phase {
    pub fn contains_day(&self, day: i64) -> bool {
        day >= self.start_day && day <= self.end_day
    }

    pub fn duration_days(&self) -> i64 {
        self.end_day - self.start_day
    }
}

/// A single water test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterReading {
    pub date: DateTime<Utc>,
    pub ammonia: f64,
    pub nitrite: f64,
    pub nitrate: f64,
    pub ph: f64,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A setup task, either seeded from the timeline or added by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Creation time
    pub date: DateTime<Utc>,
    pub phase_id: usize,
    pub is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub category: Category,
}

/// A task that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub completed: bool,
    pub date: DateTime<Utc>,
    pub phase_id: usize,
    pub is_custom: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub category: Category,
}

impl NewTask {
    pub fn with_id(self, id: String) -> Task {
        Task {
            id,
            text: self.text,
            completed: self.completed,
            date: self.date,
            phase_id: self.phase_id,
            is_custom: self.is_custom,
            due_date: self.due_date,
            priority: self.priority,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_task() -> Task {
        Task {
            id: "3f1c".to_string(),
            text: "Check filter function".to_string(),
            completed: false,
            date: Utc.with_ymd_and_hms(2025, 3, 2, 9, 15, 0).unwrap(),
            phase_id: 1,
            is_custom: true,
            due_date: Some(Utc.with_ymd_and_hms(2025, 3, 9, 0, 0, 0).unwrap()),
            priority: Priority::High,
            category: Category::Equipment,
        }
    }

    #[test]
    fn task_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_task()).unwrap();
        assert_eq!(json["phaseId"], 1);
        assert_eq!(json["isCustom"], true);
        assert_eq!(json["priority"], "high");
        assert_eq!(json["category"], "equipment");
        assert!(json["dueDate"].is_string());
    }

    #[test]
    fn task_without_due_date_omits_key() {
        let mut task = sample_task();
        task.due_date = None;
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("dueDate").is_none());
    }

    #[test]
    fn task_round_trips_through_json() {
        let task = sample_task();
        let text = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&text).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn reading_parses_browser_style_timestamps() {
        let json = r#"{"date":"2025-03-01T18:30:00.000Z","ammonia":0.25,"nitrite":0,
            "nitrate":5,"ph":7.2,"temperature":78}"#;
        let reading: WaterReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.date, Utc.with_ymd_and_hms(2025, 3, 1, 18, 30, 0).unwrap());
        assert_eq!(reading.notes, None);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("Testing".parse::<Category>(), Ok(Category::Testing));
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Category::Equipment.as_str(), "equipment");
    }

    #[test]
    fn priority_orders_low_to_high() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }
}

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A single tracked work item, stored as one record of the task file.
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub(crate) id: u32,
    pub(crate) description: String,
    pub(crate) status: Status,
    #[serde(with = "timestamp")]
    pub(crate) created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub(crate) updated_at: NaiveDateTime,
}

#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Task {
    /// Creates a `todo` task stamped with the current time.
    pub fn new(id: u32, description: String) -> Self {
        let now = now();
        Self {
            id,
            description,
            status: Status::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
        self.touch();
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. [{}] {} (created {}, updated {})",
            self.id,
            self.status,
            self.description,
            self.created_at.format(timestamp::FORMAT),
            self.updated_at.format(timestamp::FORMAT),
        )
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        };
        f.write_str(label)
    }
}

/// Local wall-clock time at whole-second precision, the resolution the file keeps.
pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub(crate) mod timestamp {
    use chrono::NaiveDateTime;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    /// `YYYY/DD/MM hh:mm:ss`, day before month.
    pub const FORMAT: &str = "%Y/%d/%m %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 30)
            .unwrap()
    }

    #[test]
    fn test_new_task_starts_as_todo() {
        // Act
        let task = Task::new(1, "buy milk".to_string());

        // Assert
        assert_eq!(task.id(), 1);
        assert_eq!(task.description(), "buy milk");
        assert_eq!(task.status(), Status::Todo);
        assert_eq!(task.created_at(), task.updated_at());
    }

    #[test]
    fn test_serializes_with_camel_case_fields_and_fixed_timestamp_format() {
        // Arrange
        let task = Task {
            id: 4,
            description: "write report".to_string(),
            status: Status::InProgress,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };

        // Act
        let json = serde_json::to_string(&task).unwrap();

        // Assert
        assert_eq!(
            json,
            r#"{"id":4,"description":"write report","status":"in-progress","createdAt":"2024/07/03 09:05:30","updatedAt":"2024/07/03 09:05:30"}"#
        );
    }

    #[test]
    fn test_deserialize_reads_day_before_month() {
        // Arrange
        let json = r#"{"id":1,"description":"x","status":"done","createdAt":"2024/07/03 09:05:30","updatedAt":"2024/31/12 23:59:59"}"#;

        // Act
        let task: Task = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(task.created_at(), fixed_time());
        assert_eq!(
            task.updated_at(),
            NaiveDate::from_ymd_opt(2024, 12, 31)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap()
        );
        assert_eq!(task.status(), Status::Done);
    }

    #[test]
    fn test_deserialize_rejects_unknown_status() {
        let json = r#"{"id":1,"description":"x","status":"blocked","createdAt":"2024/07/03 09:05:30","updatedAt":"2024/07/03 09:05:30"}"#;

        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_malformed_timestamp() {
        let json = r#"{"id":1,"description":"x","status":"todo","createdAt":"2024-03-07T09:05:30","updatedAt":"2024/07/03 09:05:30"}"#;

        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_set_status_refreshes_updated_at_only() {
        // Arrange
        let mut task = Task {
            id: 1,
            description: "x".to_string(),
            status: Status::Todo,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };

        // Act
        task.set_status(Status::Done);

        // Assert
        assert_eq!(task.status(), Status::Done);
        assert_eq!(task.created_at(), fixed_time());
        assert!(task.updated_at() > task.created_at());
    }

    #[test]
    fn test_display_shows_all_fields() {
        let task = Task {
            id: 2,
            description: "call mom".to_string(),
            status: Status::Todo,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };

        assert_eq!(
            task.to_string(),
            "2. [todo] call mom (created 2024/07/03 09:05:30, updated 2024/07/03 09:05:30)"
        );
    }
}

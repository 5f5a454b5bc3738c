//! Wire DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates.
//!
//! `Status` is a two-variant enum everywhere inside the client and only
//! becomes a JSON boolean at the serde boundary. Due-dates are `NaiveDate`
//! and always leave the client as `YYYY-MM-DD`.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use chrono::NaiveDate;

/// Server-assigned todo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TodoId)
    }
}

/// Todo priority. Unknown values and `null` coerce to `Low` on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Map free-form input onto a priority, falling back to `Low`.
    pub fn coerce(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl From<Option<String>> for Priority {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Priority::coerce).unwrap_or_default()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion state of a todo. Serialized as a JSON boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Status {
    #[default]
    NotFinished,
    Finished,
}

impl Status {
    pub fn is_finished(&self) -> bool {
        matches!(self, Status::Finished)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Status::NotFinished => Status::Finished,
            Status::Finished => Status::NotFinished,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::NotFinished => "Not Finished",
            Status::Finished => "Finished",
        }
    }
}

impl From<bool> for Status {
    fn from(finished: bool) -> Self {
        if finished {
            Status::Finished
        } else {
            Status::NotFinished
        }
    }
}

impl From<Status> for bool {
    fn from(status: Status) -> Self {
        status.is_finished()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "duedate", with = "due_date")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    pub status: Status,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    #[serde(rename = "duedate", with = "due_date")]
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: Status,
}

/// Request payload for `PUT /todo/{id}`. Only the status is ever sent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateStatus {
    pub status: Status,
}

/// Calendar-date (de)serialization for the `duedate` field.
///
/// Outgoing dates are always `YYYY-MM-DD`. Incoming dates may also be
/// full timestamps, since backends that store the column as a timestamp
/// echo it back that way; the time of day is dropped.
pub mod due_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid due date: {raw:?}")))
    }

    /// Parse the date representations accepted from users and servers.
    pub fn parse(input: &str) -> Option<NaiveDate> {
        let input = input.trim();
        NaiveDate::parse_from_str(input, FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(input, "%Y/%m/%d"))
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
            .or_else(|| {
                NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|dt| dt.date())
            })
    }
}

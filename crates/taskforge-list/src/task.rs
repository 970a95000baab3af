//! Task and note records.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A note attached to a task; a comment for one's personal use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub created_date: NaiveDateTime,
    pub body: String,
}

impl Note {
    /// Creates a note with the given body, filling in id and timestamp.
    pub fn new(body: impl Into<String>) -> Self {
        Note {
            id: Uuid::new_v4().to_string(),
            created_date: Local::now().naive_local(),
            body: body.into(),
        }
    }
}

/// A unit of work.
///
/// Timestamps are naive local datetimes; `None` means unset (a task with
/// no `completed_date` is incomplete). This is what query evaluation runs
/// against — see the `field` module for the names a query can reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub body: String,

    /// Grouping context, e.g. "work" or "default".
    pub context: String,

    #[serde(default)]
    pub priority: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

impl Task {
    /// Creates a task with the given title, populating metadata fields.
    pub fn new(title: impl Into<String>) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            body: String::new(),
            context: "default".to_string(),
            priority: 0.0,
            created_date: Some(Local::now().naive_local()),
            completed_date: None,
            notes: Vec::new(),
        }
    }

    /// Marks this task completed now.
    pub fn complete(&mut self) {
        self.completed_date = Some(Local::now().naive_local());
    }

    /// Whether this task has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed_date.is_some()
    }
}

//! The shared table of task fields addressable from a query.
//!
//! Both evaluation back ends resolve field names through this module, so a
//! new field is added exactly once. Unknown field names are not errors:
//! they resolve to `None` and the evaluators lower them to "matches
//! nothing".

use chrono::NaiveDateTime;

use crate::task::Task;

/// A task field a query comparison can reference, with the literal type it
/// expects on the right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `title` — text.
    Title,
    /// `body` — text.
    Body,
    /// `context` — text.
    Context,
    /// `priority` — numeric.
    Priority,
    /// `created_date` / `createdDate` — timestamp.
    CreatedDate,
    /// `completed_date` / `completedDate` — timestamp.
    CompletedDate,
    /// `completed` — a derived boolean: whether the completion timestamp
    /// is set. Backends without derived fields lower this to a presence
    /// test on `completed_date` instead.
    Completed,
}

impl Field {
    /// Resolves a query-side field name. Both snake_case and camelCase
    /// spellings of the date fields are accepted.
    pub fn lookup(name: &str) -> Option<Field> {
        match name {
            "title" => Some(Field::Title),
            "body" => Some(Field::Body),
            "context" => Some(Field::Context),
            "priority" => Some(Field::Priority),
            "created_date" | "createdDate" => Some(Field::CreatedDate),
            "completed_date" | "completedDate" => Some(Field::CompletedDate),
            "completed" => Some(Field::Completed),
            _ => None,
        }
    }

    /// The canonical key used in structured filter documents.
    ///
    /// `Completed` maps onto the completion timestamp, its lowering target
    /// in document stores.
    pub fn key(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Body => "body",
            Field::Context => "context",
            Field::Priority => "priority",
            Field::CreatedDate => "created_date",
            Field::CompletedDate | Field::Completed => "completed_date",
        }
    }

    /// The text value of this field on a task, for the text fields.
    pub fn text(self, task: &Task) -> Option<&str> {
        match self {
            Field::Title => Some(&task.title),
            Field::Body => Some(&task.body),
            Field::Context => Some(&task.context),
            _ => None,
        }
    }

    /// The numeric value of this field on a task, for the numeric fields.
    pub fn number(self, task: &Task) -> Option<f64> {
        match self {
            Field::Priority => Some(task.priority),
            _ => None,
        }
    }

    /// The timestamp of this field on a task, for the date fields.
    /// Returns `None` both for non-date fields and for unset timestamps.
    pub fn date(self, task: &Task) -> Option<NaiveDateTime> {
        match self {
            Field::CreatedDate => task.created_date,
            Field::CompletedDate => task.completed_date,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_accepts_both_date_spellings() {
        assert_eq!(Field::lookup("created_date"), Some(Field::CreatedDate));
        assert_eq!(Field::lookup("createdDate"), Some(Field::CreatedDate));
        assert_eq!(Field::lookup("completed_date"), Some(Field::CompletedDate));
        assert_eq!(Field::lookup("completedDate"), Some(Field::CompletedDate));
    }

    #[test]
    fn test_lookup_unknown_field() {
        assert_eq!(Field::lookup("due_date"), None);
        assert_eq!(Field::lookup("Title"), None);
    }

    #[test]
    fn test_completed_lowers_to_completion_timestamp_key() {
        assert_eq!(Field::Completed.key(), "completed_date");
        assert_eq!(Field::CompletedDate.key(), "completed_date");
    }

    #[test]
    fn test_typed_accessors() {
        let mut task = Task::new("take out the trash");
        task.body = "before noon".to_string();
        task.priority = 5.0;

        assert_eq!(Field::Title.text(&task), Some("take out the trash"));
        assert_eq!(Field::Body.text(&task), Some("before noon"));
        assert_eq!(Field::Priority.text(&task), None);
        assert_eq!(Field::Priority.number(&task), Some(5.0));
        assert_eq!(Field::Title.number(&task), None);
        assert!(Field::CreatedDate.date(&task).is_some());
        assert!(Field::CompletedDate.date(&task).is_none());
    }
}

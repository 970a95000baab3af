//! In-memory task list, the execution target for compiled predicates.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use taskforge_ql_rs::Ast;
use thiserror::Error;

use crate::predicate;
use crate::task::{Note, Task};

/// Errors from task list operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// No task with the given id exists.
    #[error("no task with id {id} exists")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// Every task in the list is completed (or the list is empty).
    #[error("no current task: every task is completed")]
    NoCurrentTask,
}

/// A task list held in memory.
///
/// Queries run against it through [`MemoryList::search`], which compiles
/// the AST with the predicate backend and filters in place. External
/// persistence layers serialize the whole list; this type does no I/O.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryList {
    tasks: Vec<Task>,
}

impl MemoryList {
    /// Creates an empty list.
    pub fn new() -> Self {
        MemoryList::default()
    }

    /// Adds a task to the list.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Adds multiple tasks to the list.
    pub fn add_multiple(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.tasks.extend(tasks);
    }

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Finds a task by id.
    pub fn find_by_id(&self, id: &str) -> Result<&Task, ListError> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or_else(|| ListError::NotFound { id: id.to_string() })
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Task, ListError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| ListError::NotFound { id: id.to_string() })
    }

    /// Replaces the stored task matching `other`'s id with its fields.
    /// Notes are only taken when `other` has more of them, so a stale
    /// update cannot drop notes added in between.
    pub fn update(&mut self, other: Task) -> Result<(), ListError> {
        let task = self.get_mut(&other.id)?;
        task.title = other.title;
        task.body = other.body;
        task.context = other.context;
        task.priority = other.priority;
        task.completed_date = other.completed_date;
        if other.notes.len() > task.notes.len() {
            task.notes = other.notes;
        }
        Ok(())
    }

    /// Marks the task with the given id completed now.
    pub fn complete(&mut self, id: &str) -> Result<(), ListError> {
        self.get_mut(id)?.complete();
        Ok(())
    }

    /// Attaches a note to the task with the given id.
    pub fn add_note(&mut self, id: &str, note: Note) -> Result<(), ListError> {
        self.get_mut(id)?.notes.push(note);
        Ok(())
    }

    /// The current task: the highest-priority, oldest, uncompleted task.
    pub fn current(&self) -> Result<&Task, ListError> {
        let mut candidates: Vec<&Task> = self.tasks.iter().collect();
        candidates.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(Ordering::Equal)
                .then_with(|| match (a.created_date, b.created_date) {
                    (Some(a), Some(b)) => a.cmp(&b),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                })
        });

        candidates
            .into_iter()
            .find(|task| !task.is_completed())
            .ok_or(ListError::NoCurrentTask)
    }

    /// Returns the tasks matching a parsed query, preserving list order.
    ///
    /// Callers must have checked the parser's error state; see
    /// [`taskforge_ql_rs::parse`].
    pub fn search(&self, ast: &Ast) -> Vec<Task> {
        let matches = predicate::compile(ast);
        self.tasks
            .iter()
            .filter(|task| matches(task))
            .cloned()
            .collect()
    }
}

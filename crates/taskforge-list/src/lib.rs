//! Task records and query evaluation backends for taskforge.
//!
//! This crate owns the [`Task`] record, the shared [`Field`] table mapping
//! query field names onto typed accessors, and the two consumers of a
//! parsed query AST:
//!
//! - [`predicate`] compiles an AST into a boolean test over one task, used
//!   by [`MemoryList::search`] to filter an in-memory collection.
//! - [`document`] compiles the same AST into a nested key/operator filter
//!   document for a remote document store.
//!
//! The two backends lower every query identically except where the target
//! representation forces a divergence; the `document` module docs
//! enumerate those.
//!
//! # Example
//!
//! ```
//! use taskforge_list_rs::{MemoryList, Task};
//! use taskforge_ql_rs::parse;
//!
//! let mut list = MemoryList::new();
//! let mut task = Task::new("take out the trash");
//! task.priority = 7.0;
//! list.add(task);
//! list.add(Task::new("do the dishes"));
//!
//! let ast = parse("priority > 5 and title ~ \"trash\"").unwrap();
//! let found = list.search(&ast);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].title, "take out the trash");
//! ```

pub mod document;
pub mod field;
pub mod memory;
pub mod predicate;
pub mod task;

pub use field::Field;
pub use memory::{ListError, MemoryList};
pub use predicate::Predicate;
pub use task::{Note, Task};

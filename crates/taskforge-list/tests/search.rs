//! End-to-end query runs through [`MemoryList::search`].

use taskforge_list_rs::{MemoryList, Task};
use taskforge_ql_rs::parse;

fn numbered_list(count: usize) -> MemoryList {
    let mut list = MemoryList::new();
    list.add_multiple((1..=count).map(|n| Task::new(format!("task {n}"))));
    list
}

#[test]
fn test_grouped_query_selects_exactly_the_matching_tasks() {
    let mut list = numbered_list(4);
    let mut moved = Task::new("task 5");
    moved.context = "other".to_string();
    list.add(moved);

    let ast = parse("(title = \"task 1\" and context = \"default\") or (context = \"other\")")
        .expect("query should parse");
    let found = list.search(&ast);

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].title, "task 1");
    assert_eq!(found[1].title, "task 5");
}

#[test]
fn test_priority_boundaries_against_default_tasks() {
    let list = numbered_list(5);

    let above_one = list.search(&parse("priority > 1").unwrap());
    assert!(above_one.is_empty());

    let at_zero = list.search(&parse("priority = 0").unwrap());
    assert_eq!(at_zero.len(), 5);
}

#[test]
fn test_precedence_binds_comparisons_before_and() {
    let mut list = MemoryList::new();
    let mut urgent = Task::new("take out the trash");
    urgent.priority = 7.0;
    list.add(urgent);
    let mut calm = Task::new("trash the old drafts");
    calm.priority = 2.0;
    list.add(calm);
    list.add(Task::new("water the plants"));

    let found = list.search(&parse("priority > 5 and title ~ \"trash\"").unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "take out the trash");
}

#[test]
fn test_free_text_with_escaped_keyword() {
    let mut list = MemoryList::new();
    let mut task = Task::new("shopping");
    task.body = "milk and cookies".to_string();
    list.add(task);
    list.add(Task::new("milk the cows"));

    let found = list.search(&parse("milk -and cookies").unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "shopping");
}

#[test]
fn test_malformed_query_never_reaches_search() {
    // Search only accepts an Ast, and only the Ok arm of parse provides
    // one, so a malformed query cannot reach the list by accident.
    let errors = parse("priority >").unwrap_err();
    assert!(!errors.is_empty());
}

#[test]
fn test_search_preserves_insertion_order() {
    let mut list = MemoryList::new();
    for (title, priority) in [("c", 1.0), ("a", 3.0), ("b", 2.0)] {
        let mut task = Task::new(title);
        task.priority = priority;
        list.add(task);
    }

    let found = list.search(&parse("priority > 0").unwrap());
    let titles: Vec<&str> = found.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["c", "a", "b"]);
}

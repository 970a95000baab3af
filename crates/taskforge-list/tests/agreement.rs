//! Cross-backend agreement tests.
//!
//! The predicate backend and the filter-document backend must treat the
//! same AST identically wherever the target representation permits it. To
//! check that without a live document store, these tests run the compiled
//! filter document through a small interpreter implementing the handful of
//! operators the compiler emits, and compare against the predicate result
//! for every task in a fixture set.
//!
//! The enumerated divergences (see the `document` module docs) get their
//! own pinning tests at the bottom instead of being painted over.

use chrono::NaiveDate;
use serde_json::Value;
use taskforge_list_rs::{document, predicate, Task};
use taskforge_ql_rs::parse;

/// Interprets a compiled filter document against one task, with the
/// operator subset the compiler emits: implicit top-level AND, `$and`,
/// `$or`, `$ne`, `$gt`/`$gte`/`$lt`/`$lte`, `$exists`, `$regex` (treated
/// as substring containment, which is what the compiler produces), and
/// scalar equality.
fn interpret(doc: &Value, task: &Task) -> bool {
    let task_doc = serde_json::to_value(task).expect("task serializes");
    let object = doc.as_object().expect("filter documents are objects");
    object.iter().all(|(key, value)| match key.as_str() {
        "$and" => clauses(value).iter().all(|clause| interpret(clause, task)),
        "$or" => clauses(value).iter().any(|clause| interpret(clause, task)),
        field => field_matches(task_doc.get(field), value),
    })
}

fn clauses(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

fn field_matches(field: Option<&Value>, condition: &Value) -> bool {
    let Some(operators) = condition.as_object() else {
        // Scalar equality. An absent field equals nothing.
        return field == Some(condition);
    };
    if !operators.keys().any(|key| key.starts_with('$')) {
        return field == Some(condition);
    }

    operators.iter().all(|(op, operand)| match op.as_str() {
        "$exists" => operand.as_bool() == Some(field.is_some()),
        "$ne" => field != Some(operand),
        "$gt" => compare(field, operand).is_some_and(|ord| ord.is_gt()),
        "$gte" => compare(field, operand).is_some_and(|ord| ord.is_ge()),
        "$lt" => compare(field, operand).is_some_and(|ord| ord.is_lt()),
        "$lte" => compare(field, operand).is_some_and(|ord| ord.is_le()),
        "$regex" => regex_contains(field, operand, operators.get("$options")),
        "$options" => true, // consumed alongside $regex
        other => panic!("interpreter does not implement {other}"),
    })
}

fn compare(field: Option<&Value>, operand: &Value) -> Option<std::cmp::Ordering> {
    match (field?, operand) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        // ISO timestamps order lexicographically.
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

/// The compiler only emits two regex shapes: a literal substring, and the
/// negative-lookahead `((?!text).)*` form for `!~`.
fn regex_contains(field: Option<&Value>, pattern: &Value, options: Option<&Value>) -> bool {
    let pattern = pattern.as_str().expect("$regex pattern is a string");
    let insensitive = options
        .and_then(Value::as_str)
        .is_some_and(|opts| opts.contains('i'));

    let (needle, negated) = match pattern
        .strip_prefix("((?!")
        .and_then(|rest| rest.strip_suffix(").)*"))
    {
        Some(inner) => (inner.to_string(), true),
        None => (pattern.to_string(), false),
    };

    let contains = |text: &str| {
        if insensitive {
            text.to_lowercase().contains(&needle.to_lowercase())
        } else {
            text.contains(&needle)
        }
    };

    let matched = match field {
        Some(Value::String(text)) => contains(text),
        // Note arrays: match any note body.
        Some(Value::Array(notes)) => notes
            .iter()
            .filter_map(|note| note.get("body").and_then(Value::as_str))
            .any(contains),
        _ => false,
    };

    if negated {
        !matched
    } else {
        matched
    }
}

fn fixture() -> Vec<Task> {
    let date = |day: u32| {
        NaiveDate::from_ymd_opt(2018, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
    };

    let mut trash = Task::new("take out the trash");
    trash.priority = 7.0;
    trash.body = "before noon".to_string();
    trash.created_date = date(1);

    let mut dishes = Task::new("do the dishes");
    dishes.context = "home".to_string();
    dishes.created_date = date(2);

    let mut report = Task::new("write the report");
    report.context = "work".to_string();
    report.priority = 5.0;
    report.created_date = date(3);
    report.completed_date = date(4);

    let mut groceries = Task::new("buy groceries");
    groceries.body = "milk and cookies".to_string();
    groceries.priority = 2.0;
    groceries.created_date = date(5);

    let mut unset_dates = Task::new("task with no dates");
    unset_dates.created_date = None;

    vec![trash, dishes, report, groceries, unset_dates]
}

/// Queries where the two backends must agree for every fixture task.
/// Same-case inputs only: case sensitivity is an enumerated divergence.
const AGREEING_QUERIES: &[&str] = &[
    "trash",
    "milk -and cookies",
    "title = \"do the dishes\"",
    "title != \"do the dishes\"",
    "context = work",
    "context != home",
    "title ~ \"the\"",
    "title !~ \"trash\"",
    "body ~ \"noon\"",
    "priority = 5",
    "priority != 0",
    "priority > 2",
    "priority >= 5",
    "priority <= 2",
    "priority < 3",
    "priority > 1 and context = home",
    "priority > 4 or context = home",
    "(title = \"take out the trash\" and context = default) or (context = work)",
    "completed = true",
    "completed = false",
    "completed != true",
    "created_date > 2018-03-02",
    "created_date >= 2018-03-01",
    "createdDate <= 2018-03-04",
    "completed_date > 2018-03-01",
    "completedDate = 2018-03-04",
    "due_date = tomorrow",
    // Negated operators on unknown or mismatched fields match everything
    // in memory; $ne and the lookahead regex do the same on absent fields.
    "due_date != 5",
    "priority !~ \"high\"",
];

#[test]
fn backends_agree_on_fixture_set() {
    let tasks = fixture();
    for query in AGREEING_QUERIES {
        let ast = parse(query).expect("query should parse");
        let matches = predicate::compile(&ast);
        let doc = document::compile(&ast);

        for task in &tasks {
            assert_eq!(
                matches(task),
                interpret(&doc, task),
                "backends disagree on {query:?} for task {:?}",
                task.title
            );
        }
    }
}

// ==================== Enumerated Divergences ====================

#[test]
fn divergence_lt_boundary() {
    // The predicate backend defines `<` as "not >", admitting equality;
    // the document backend emits the store's strict $lt.
    let ast = parse("priority < 5").unwrap();
    let matches = predicate::compile(&ast);
    let doc = document::compile(&ast);

    let mut task = Task::new("boundary");
    task.priority = 5.0;

    assert!(matches(&task));
    assert!(!interpret(&doc, &task));

    // The same split on an unknown field: "not >" matches everything,
    // the store's strict $lt matches nothing.
    let ast = parse("due_date < 2018-01-01").unwrap();
    let matches = predicate::compile(&ast);
    let doc = document::compile(&ast);
    assert!(matches(&task));
    assert!(!interpret(&doc, &task));
}

#[test]
fn divergence_completed_is_representation_only() {
    // `completed` lowers to a derived boolean in one backend and a
    // presence test in the other; the observable results still agree.
    let mut done = Task::new("done");
    done.complete();
    let open = Task::new("open");

    for query in ["completed = true", "completed = false"] {
        let ast = parse(query).unwrap();
        let matches = predicate::compile(&ast);
        let doc = document::compile(&ast);

        // The document never mentions a boolean field.
        assert!(doc.get("completed").is_none(), "query: {query}");
        assert!(doc["completed_date"].get("$exists").is_some(), "query: {query}");

        for task in [&done, &open] {
            assert_eq!(matches(task), interpret(&doc, task), "query: {query}");
        }
    }
}

#[test]
fn divergence_bare_literal_query() {
    // A query that is just a non-string literal compiles to the empty
    // document, which a store reads as "match everything"; the predicate
    // backend matches nothing for the same tree.
    let task = Task::new("anything");

    for query in ["5", "true", "2018-01-02"] {
        let ast = parse(query).unwrap();
        assert!(!predicate::compile(&ast)(&task), "query: {query}");

        let doc = document::compile(&ast);
        assert_eq!(doc, serde_json::json!({}), "query: {query}");
        assert!(interpret(&doc, &task), "query: {query}");
    }
}

#[test]
fn divergence_case_sensitivity() {
    // Substring matching is case-sensitive in memory, case-insensitive
    // ($options "i"/"im") in the document backend.
    let mut task = Task::new("Take Out The Trash");

    let ast = parse("title ~ \"trash\"").unwrap();
    assert!(!predicate::compile(&ast)(&task));
    assert!(interpret(&document::compile(&ast), &task));

    task.title = "Trash day".to_string();
    let ast = parse("trash").unwrap();
    assert!(!predicate::compile(&ast)(&task));
    assert!(interpret(&document::compile(&ast), &task));
}

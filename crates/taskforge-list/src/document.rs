//! Structured filter document compiler: the query evaluation backend for
//! remote document stores.
//!
//! [`compile`] lowers an [`Ast`] into a nested key/operator document
//! (MongoDB query syntax) as a [`serde_json::Value`], suitable for handing
//! to a remote store's find API. Lowering mirrors the in-memory predicate
//! backend one-for-one except where the target representation forces a
//! divergence. Those divergences are exactly:
//!
//! 1. **`completed`** — document stores have no derived boolean, so
//!    `completed = true` lowers to a presence test on the completion
//!    timestamp: `{"completed_date": {"$exists": true}}` (and negated for
//!    `!=`).
//! 2. **`<`** — the in-memory backend defines `<` as "not >", which admits
//!    the equal case; this backend emits the store's strict `$lt`.
//! 3. **Text matching** — `~`/`!~` and free-text terms lower to regex
//!    matches with the `i` option (`im` for free text), while the
//!    in-memory backend uses case-sensitive substring containment; free
//!    text additionally searches note bodies here, which the in-memory
//!    backend does not reach.
//! 4. **Bare non-string literals** — a query that is just a number,
//!    boolean, or date compiles to the empty document `{}`, which a store
//!    treats as "match everything"; the in-memory backend matches nothing
//!    for the same tree.
//!
//! Known field names are canonicalized through [`Field::key`]; unknown
//! names pass through verbatim, where the remote store matches nothing
//! for them.

use serde_json::{json, Value};
use taskforge_ql_rs::{Ast, Expr, InfixExpr, TokenKind};

use crate::field::Field;

/// Compiles a parsed query into a filter document.
///
/// An empty AST compiles to the empty document `{}`, which a document
/// store treats as "match everything" — callers that want "match nothing"
/// for an empty query should check [`Ast::expression`] first, as the
/// in-memory backend's callers do.
pub fn compile(ast: &Ast) -> Value {
    match &ast.expression {
        Some(expr) => compile_expr(expr),
        None => json!({}),
    }
}

fn compile_expr(expr: &Expr) -> Value {
    match expr {
        Expr::Infix(infix) => compile_infix(infix),
        Expr::String(lit) => free_text(&lit.value),
        Expr::Number(_) | Expr::Boolean(_) | Expr::Date(_) => json!({}),
    }
}

/// A bare term searches title, body, and note bodies with a
/// case-insensitive multiline regex.
fn free_text(text: &str) -> Value {
    let regex = json!({ "$regex": text, "$options": "im" });
    json!({
        "$or": [
            { "title": regex },
            { "body": regex },
            { "notes": regex },
        ]
    })
}

fn compile_infix(infix: &InfixExpr) -> Value {
    match infix.operator.kind {
        TokenKind::And => json!({
            "$and": [compile_expr(&infix.left), compile_expr(&infix.right)]
        }),
        TokenKind::Or => json!({
            "$or": [compile_expr(&infix.left), compile_expr(&infix.right)]
        }),
        TokenKind::Like => keyed(
            field_key(&infix.left),
            json!({ "$regex": literal_value(&infix.right), "$options": "i" }),
        ),
        TokenKind::NotLike => {
            // Negative lookahead: match only strings not containing the text.
            let pattern = match infix.right.as_ref() {
                Expr::String(lit) => format!("((?!{}).)*", lit.value),
                _ => String::new(),
            };
            keyed(
                field_key(&infix.left),
                json!({ "$regex": pattern, "$options": "i" }),
            )
        }
        TokenKind::Eq => match completed_test(infix) {
            Some(value) => json!({ "completed_date": { "$exists": value } }),
            None => keyed(field_key(&infix.left), literal_value(&infix.right)),
        },
        TokenKind::Ne => match completed_test(infix) {
            Some(value) => json!({ "completed_date": { "$exists": !value } }),
            None => keyed(
                field_key(&infix.left),
                json!({ "$ne": literal_value(&infix.right) }),
            ),
        },
        TokenKind::Gt => operator_doc(infix, "$gt"),
        TokenKind::Gte => operator_doc(infix, "$gte"),
        // The store's $lt is strict; see the module docs for the
        // divergence from the in-memory backend.
        TokenKind::Lt => operator_doc(infix, "$lt"),
        TokenKind::Lte => operator_doc(infix, "$lte"),
        _ => json!({}),
    }
}

fn operator_doc(infix: &InfixExpr, operator: &str) -> Value {
    keyed(
        field_key(&infix.left),
        keyed(operator.to_string(), literal_value(&infix.right)),
    )
}

/// A single-entry object, for keys only known at runtime.
fn keyed(key: String, value: Value) -> Value {
    let mut map = serde_json::Map::new();
    map.insert(key, value);
    Value::Object(map)
}

/// Detects the `completed = <bool>` / `completed != <bool>` shape and
/// returns the boolean, triggering the presence-test lowering.
fn completed_test(infix: &InfixExpr) -> Option<bool> {
    if field_of(&infix.left) != Some(Field::Completed) {
        return None;
    }
    match infix.right.as_ref() {
        Expr::Boolean(lit) => Some(lit.value),
        _ => None,
    }
}

fn field_of(expr: &Expr) -> Option<Field> {
    expr.as_field_name().and_then(Field::lookup)
}

/// The document key for a comparison's left operand: the canonical key for
/// known fields, the raw name for unknown ones.
fn field_key(expr: &Expr) -> String {
    match field_of(expr) {
        Some(field) => field.key().to_string(),
        None => expr.as_field_name().unwrap_or_default().to_string(),
    }
}

/// Converts a literal node to its document value. Non-literal operands
/// (which only appear in malformed trees) become null.
fn literal_value(expr: &Expr) -> Value {
    match expr {
        Expr::String(lit) => json!(lit.value),
        Expr::Number(lit) => json!(lit.value),
        Expr::Boolean(lit) => json!(lit.value),
        Expr::Date(lit) => json!(lit.value),
        Expr::Infix(_) => Value::Null,
    }
}

//! # Interpreter: a tiny query language over JSON records
//!
//! Queries such as `(name = John AND age > 25) OR department = HR` are parsed
//! into an [`Expression`] tree, which is then interpreted against each record.
//!
//! Precedence, loosest first: `OR`, `AND`, `NOT`, comparisons (`=`, `>`, `<`).
//! Parentheses group. Operators inside parentheses are ignored when splitting.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

pub type Record = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("cannot parse empty query")]
    Empty,

    #[error("mismatched parentheses in query: {0}")]
    MismatchedParentheses(String),
}

// =============================================================================
// Expression tree
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(bool),
    Variable(String),
    Equals { variable: String, value: Value },
    GreaterThan { variable: String, value: Value },
    LessThan { variable: String, value: Value },
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
}

impl Expression {
    pub fn equals(variable: &str, value: impl Into<Value>) -> Self {
        Expression::Equals {
            variable: variable.to_string(),
            value: value.into(),
        }
    }

    pub fn greater_than(variable: &str, value: impl Into<Value>) -> Self {
        Expression::GreaterThan {
            variable: variable.to_string(),
            value: value.into(),
        }
    }

    pub fn less_than(variable: &str, value: impl Into<Value>) -> Self {
        Expression::LessThan {
            variable: variable.to_string(),
            value: value.into(),
        }
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::Or(Box::new(left), Box::new(right))
    }

    pub fn not(inner: Expression) -> Self {
        Expression::Not(Box::new(inner))
    }

    pub fn interpret(&self, context: &Record) -> bool {
        match self {
            Expression::Literal(value) => *value,
            Expression::Variable(name) => context.get(name).is_some_and(truthy),
            Expression::Equals { variable, value } => {
                loose_equals(context.get(variable).unwrap_or(&Value::Null), value)
            }
            Expression::GreaterThan { variable, value } => {
                compare_numbers(context.get(variable), value, |a, b| a > b)
            }
            Expression::LessThan { variable, value } => {
                compare_numbers(context.get(variable), value, |a, b| a < b)
            }
            Expression::And(left, right) => left.interpret(context) && right.interpret(context),
            Expression::Or(left, right) => left.interpret(context) || right.interpret(context),
            Expression::Not(inner) => !inner.interpret(context),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{value}"),
            Expression::Variable(name) => write!(f, "{name}"),
            Expression::Equals { variable, value } => write!(f, "{variable} = {value}"),
            Expression::GreaterThan { variable, value } => write!(f, "{variable} > {value}"),
            Expression::LessThan { variable, value } => write!(f, "{variable} < {value}"),
            Expression::And(left, right) => write!(f, "({left} AND {right})"),
            Expression::Or(left, right) => write!(f, "({left} OR {right})"),
            Expression::Not(inner) => write!(f, "NOT {inner}"),
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Display form used for the string fallback: strings lose their quotes.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Equality with light coercion: numbers compare numerically when the other
/// side parses as a number, booleans accept a case-insensitive `"true"`, and
/// everything else falls back to comparing display strings.
fn loose_equals(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Number(a), other) | (other, Value::Number(a)) if as_number(other).is_some() => {
            a.as_f64() == as_number(other)
        }
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Bool(a), Value::String(s)) => *a == s.eq_ignore_ascii_case("true"),
        _ => display(actual) == display(expected),
    }
}

fn compare_numbers(actual: Option<&Value>, expected: &Value, op: fn(f64, f64) -> bool) -> bool {
    match (actual.and_then(as_number), as_number(expected)) {
        (Some(a), Some(b)) => op(a, b),
        _ => false,
    }
}

// =============================================================================
// Parser
// =============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct QueryParser;

impl QueryParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, query: &str) -> Result<Expression, ParseError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ParseError::Empty);
        }

        if query.starts_with('(') && query.ends_with(')') {
            match outer_parentheses(query) {
                Parens::Enclosing => return self.parse(&query[1..query.len() - 1]),
                Parens::Unbalanced => {
                    return Err(ParseError::MismatchedParentheses(query.to_string()))
                }
                Parens::Separate => {}
            }
        }

        if let Some(index) = find_split_index(query, " OR ") {
            let left = self.parse(&query[..index])?;
            let right = self.parse(&query[index + 4..])?;
            return Ok(Expression::or(left, right));
        }

        if let Some(index) = find_split_index(query, " AND ") {
            let left = self.parse(&query[..index])?;
            let right = self.parse(&query[index + 5..])?;
            return Ok(Expression::and(left, right));
        }

        if let Some(rest) = query.strip_prefix("NOT ") {
            return Ok(Expression::not(self.parse(rest)?));
        }

        for op in [" = ", " > ", " < "] {
            if let Some(index) = find_split_index(query, op) {
                let variable = query[..index].trim();
                let value = convert_value(&query[index + op.len()..]);
                debug!(variable, op = op.trim(), %value, "parsed comparison");
                return Ok(match op {
                    " = " => Expression::equals(variable, value),
                    " > " => Expression::greater_than(variable, value),
                    _ => Expression::less_than(variable, value),
                });
            }
        }

        if query.eq_ignore_ascii_case("true") {
            return Ok(Expression::Literal(true));
        }
        if query.eq_ignore_ascii_case("false") {
            return Ok(Expression::Literal(false));
        }

        Ok(Expression::Variable(query.to_string()))
    }
}

enum Parens {
    /// The first `(` closes at the final `)`.
    Enclosing,
    /// The first group closes early, e.g. `(a) OR (b)`.
    Separate,
    Unbalanced,
}

fn outer_parentheses(query: &str) -> Parens {
    let bytes = query.as_bytes();
    let mut level: i32 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        match byte {
            b'(' => level += 1,
            b')' => level -= 1,
            _ => {}
        }
        if level == 0 && i < bytes.len() - 1 {
            return Parens::Separate;
        }
    }
    if level == 0 {
        Parens::Enclosing
    } else {
        Parens::Unbalanced
    }
}

/// Byte index of the first `operator` outside any parentheses.
fn find_split_index(query: &str, operator: &str) -> Option<usize> {
    let bytes = query.as_bytes();
    let op = operator.as_bytes();
    if bytes.len() < op.len() {
        return None;
    }

    let mut level: i32 = 0;
    for i in 0..=bytes.len() - op.len() {
        match bytes[i] {
            b'(' => level += 1,
            b')' => level -= 1,
            _ if level == 0 && &bytes[i..i + op.len()] == op => return Some(i),
            _ => {}
        }
    }
    None
}

fn convert_value(raw: &str) -> Value {
    let raw = raw.trim();

    let quoted = raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('\'') && raw.ends_with('\'')));
    if quoted {
        return Value::String(raw[1..raw.len() - 1].to_string());
    }

    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        return Value::from(float);
    }
    Value::String(raw.to_string())
}

// =============================================================================
// Engine
// =============================================================================

#[derive(Debug, Default)]
pub struct QueryEngine {
    parser: QueryParser,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records matching `query`, in their original order.
    pub fn filter(&self, data: &[Record], query: &str) -> Result<Vec<Record>, ParseError> {
        let expression = self.parser.parse(query)?;
        debug!(%expression, "filtering {} records", data.len());
        Ok(data
            .iter()
            .filter(|record| expression.interpret(record))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn context() -> Record {
        record(json!({"name": "John", "age": 30, "department": "Engineering", "active": true}))
    }

    fn people() -> Vec<Record> {
        vec![
            record(json!({"name": "John", "age": 30, "department": "Engineering"})),
            record(json!({"name": "Jane", "age": 25, "department": "Marketing"})),
            record(json!({"name": "Bob", "age": 35, "department": "Engineering"})),
            record(json!({"name": "Alice", "age": 28, "department": "HR"})),
        ]
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records
            .iter()
            .filter_map(|r| r.get("name").and_then(Value::as_str))
            .collect()
    }

    #[test]
    fn test_comparison_expressions() {
        let ctx = context();
        assert!(Expression::equals("name", "John").interpret(&ctx));
        assert!(!Expression::equals("name", "Jane").interpret(&ctx));
        assert!(Expression::greater_than("age", 25).interpret(&ctx));
        assert!(!Expression::greater_than("age", 30).interpret(&ctx));
        assert!(Expression::less_than("age", 35).interpret(&ctx));
        assert!(!Expression::less_than("age", 30).interpret(&ctx));
    }

    #[test]
    fn test_logical_expressions() {
        let ctx = context();
        let john = || Expression::equals("name", "John");
        let jane = || Expression::equals("name", "Jane");

        assert!(Expression::and(john(), Expression::greater_than("age", 25)).interpret(&ctx));
        assert!(!Expression::and(john(), Expression::greater_than("age", 35)).interpret(&ctx));
        assert!(Expression::or(jane(), Expression::greater_than("age", 25)).interpret(&ctx));
        assert!(!Expression::or(jane(), Expression::greater_than("age", 35)).interpret(&ctx));
        assert!(Expression::not(jane()).interpret(&ctx));
        assert!(!Expression::not(john()).interpret(&ctx));
    }

    #[test]
    fn test_equality_coercion() {
        let ctx = context();
        assert!(Expression::equals("age", "30").interpret(&ctx));
        assert!(Expression::equals("age", 30.0).interpret(&ctx));
        assert!(Expression::equals("active", "TRUE").interpret(&ctx));
        assert!(Expression::equals("active", true).interpret(&ctx));
        assert!(!Expression::equals("missing", "x").interpret(&ctx));
        assert!(Expression::equals("missing", Value::Null).interpret(&ctx));
    }

    #[test]
    fn test_numeric_comparison_on_non_numbers_is_false() {
        let ctx = context();
        assert!(!Expression::greater_than("name", 1).interpret(&ctx));
        assert!(!Expression::less_than("missing", 1).interpret(&ctx));
    }

    #[test]
    fn test_parse_simple_queries() {
        let parser = QueryParser::new();
        let ctx = context();
        for query in [
            "name = John",
            "age > 25",
            "age < 35",
            "name = John AND age > 25",
            "name = Jane OR age > 25",
            "NOT name = Jane",
            "(name = John AND age > 25) OR department = HR",
            "active",
            "true",
        ] {
            let expr = parser.parse(query).unwrap();
            assert!(expr.interpret(&ctx), "query should match: {query}");
        }
    }

    #[test]
    fn test_parse_precedence() {
        let expr = QueryParser::new().parse("a = 1 OR b = 2 AND c = 3").unwrap();
        assert_eq!(
            expr,
            Expression::or(
                Expression::equals("a", 1),
                Expression::and(Expression::equals("b", 2), Expression::equals("c", 3)),
            )
        );
    }

    #[test]
    fn test_parse_values() {
        let parser = QueryParser::new();
        assert_eq!(
            parser.parse("name = 'John Smith'").unwrap(),
            Expression::equals("name", "John Smith")
        );
        assert_eq!(
            parser.parse("score > 4.5").unwrap(),
            Expression::greater_than("score", 4.5)
        );
        assert_eq!(
            parser.parse("flag = False").unwrap(),
            Expression::equals("flag", false)
        );
        assert_eq!(parser.parse("FALSE").unwrap(), Expression::Literal(false));
    }

    #[test]
    fn test_parse_errors() {
        let parser = QueryParser::new();
        assert_eq!(parser.parse("   "), Err(ParseError::Empty));
        assert!(matches!(
            parser.parse("((a = 1)"),
            Err(ParseError::MismatchedParentheses(_))
        ));
        assert_eq!(parser.parse("a = 1 AND "), Ok(Expression::equals("a", "1 AND")));
    }

    #[test]
    fn test_engine_filter() {
        let engine = QueryEngine::new();
        let data = people();

        let result = engine.filter(&data, "department = Engineering").unwrap();
        assert_eq!(names(&result), vec!["John", "Bob"]);

        let result = engine.filter(&data, "age > 30").unwrap();
        assert_eq!(names(&result), vec!["Bob"]);

        let result = engine
            .filter(&data, "department = Engineering AND age > 30")
            .unwrap();
        assert_eq!(names(&result), vec!["Bob"]);

        let result = engine
            .filter(&data, "department = HR OR department = Marketing")
            .unwrap();
        assert_eq!(names(&result), vec!["Jane", "Alice"]);
    }

    #[test]
    fn test_engine_propagates_parse_error() {
        assert_eq!(QueryEngine::new().filter(&people(), ""), Err(ParseError::Empty));
    }
}

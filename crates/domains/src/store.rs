//! # Store Queries
//!
//! An abstract, not-yet-executed query over one document collection. The
//! repository builds these; a `DocumentStore` executes them. Matching and
//! ordering semantics live here so every store (and the in-process CMS
//! filter) agrees on them.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{Status, Visibility};

/// A stored document: its key plus its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self { id: id.into(), data }
    }

    pub fn data_to<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    List(Vec<FieldValue>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Status> for FieldValue {
    fn from(value: Status) -> Self {
        Self::Str(value.as_str().to_string())
    }
}

impl From<Visibility> for FieldValue {
    fn from(value: Visibility) -> Self {
        Self::Str(value.as_str().to_string())
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl FieldValue {
    /// Compares a document field against this value. `None` when the two
    /// are not comparable (missing field, mismatched types).
    fn compare(&self, field: &Value) -> Option<Ordering> {
        match self {
            Self::Str(s) => field.as_str().map(|f| f.cmp(s.as_str())),
            Self::Int(i) => field.as_i64().map(|f| f.cmp(i)),
            Self::Bool(b) => field.as_bool().map(|f| f.cmp(b)),
            Self::Timestamp(ts) => parse_timestamp(field).map(|f| f.cmp(ts)),
            Self::List(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gte,
    Lte,
    In,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub op: Operator,
    pub value: FieldValue,
}

impl Condition {
    pub fn matches(&self, doc: &Value) -> bool {
        let Some(field) = doc.get(&self.field) else {
            return false;
        };
        match (self.op, &self.value) {
            (Operator::In, FieldValue::List(values)) => {
                values.iter().any(|v| v.compare(field) == Some(Ordering::Equal))
            }
            (Operator::In, _) => false,
            (Operator::Eq, value) => value.compare(field) == Some(Ordering::Equal),
            (Operator::Gte, value) => matches!(value.compare(field), Some(Ordering::Greater | Ordering::Equal)),
            (Operator::Lte, value) => matches!(value.compare(field), Some(Ordering::Less | Ordering::Equal)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// `First(n)` keeps the first `n` ordered results, `Last(n)` the last `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    First(usize),
    Last(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub conditions: Vec<Condition>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Limit>,
}

impl Query {
    pub fn collection(path: impl Into<String>) -> Self {
        Self {
            collection: path.into(),
            conditions: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn filter(mut self, field: &str, op: Operator, value: impl Into<FieldValue>) -> Self {
        self.conditions.push(Condition {
            field: field.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by.push(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(Limit::First(n));
        self
    }

    pub fn limit_to_last(mut self, n: usize) -> Self {
        self.limit = Some(Limit::Last(n));
        self
    }

    /// True when the document satisfies every condition.
    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }

    /// Orders two documents by this query's `order_by` clauses.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for clause in &self.order_by {
            let ord = compare_fields(a.get(&clause.field), b.get(&clause.field));
            let ord = match clause.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Runs this query over an in-process set of documents: filter, order,
    /// then apply the limit.
    pub fn apply(&self, docs: impl IntoIterator<Item = Document>) -> Vec<Document> {
        let mut matched: Vec<Document> = docs.into_iter().filter(|d| self.matches(&d.data)).collect();
        matched.sort_by(|a, b| self.compare(&a.data, &b.data));
        match self.limit {
            Some(Limit::First(n)) => matched.truncate(n),
            Some(Limit::Last(n)) => {
                let skip = matched.len().saturating_sub(n);
                matched.drain(..skip);
            }
            None => {}
        }
        matched
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|ts| ts.with_timezone(&Utc))
}

/// Missing fields sort first. Timestamps compare chronologically, not as
/// strings, since RFC 3339 renderings vary in fractional digits.
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(ta), Some(tb)) = (parse_timestamp(a), parse_timestamp(b)) {
                return ta.cmp(&tb);
            }
            match (a, b) {
                (Value::String(x), Value::String(y)) => x.cmp(y),
                (Value::Number(x), Value::Number(y)) => x
                    .as_f64()
                    .partial_cmp(&y.as_f64())
                    .unwrap_or(Ordering::Equal),
                (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
                _ => Ordering::Equal,
            }
        }
    }
}

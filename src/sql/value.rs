use serde::Serialize;
use thiserror::Error;

/// A value bound to a positional `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// SQL fragment plus the values for its placeholders.
///
/// `values[i]` binds to `$(i + 1)` inside `clause`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClauseResult {
    clause: String,
    values: Vec<SqlValue>,
}

impl ClauseResult {
    pub(crate) fn new(clause: String, values: Vec<SqlValue>) -> Self {
        Self { clause, values }
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Index of the first placeholder a caller may append after this fragment
    pub fn next_index(&self) -> usize {
        self.values.len() + 1
    }

    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.clause, self.values)
    }
}

/// Caller-side error raised while building a clause.
///
/// Carries one message per offending condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join("; "))]
pub struct InvalidInput {
    messages: Vec<String>,
}

impl InvalidInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn from_messages(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

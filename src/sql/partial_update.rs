use serde_json::{Map, Value};

use super::value::{ClauseResult, InvalidInput, SqlValue};

/// Logical field name to physical column name.
///
/// Fields missing from the map are used as-is.
#[derive(Debug, Clone, Copy)]
pub struct FieldNameMap<'a> {
    pairs: &'a [(&'a str, &'a str)],
}

impl<'a> FieldNameMap<'a> {
    pub const fn new(pairs: &'a [(&'a str, &'a str)]) -> Self {
        Self { pairs }
    }

    pub fn column<'k>(&self, field: &'k str) -> &'k str
    where
        'a: 'k,
    {
        self.pairs
            .iter()
            .find(|(logical, _)| *logical == field)
            .map(|(_, physical)| *physical)
            .unwrap_or(field)
    }
}

/// Ordered set of field updates, kept in the order the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePayload {
    entries: Vec<(String, SqlValue)>,
}

impl UpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field`, replacing an earlier value in place
    pub fn with(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Build from a JSON object, preserving its key order.
    ///
    /// Nested arrays and objects are not column values and are rejected.
    pub fn from_json_object(object: Map<String, Value>) -> Result<Self, InvalidInput> {
        let mut entries = Vec::with_capacity(object.len());
        let mut errors = Vec::new();

        for (field, value) in object {
            let value = match value {
                Value::Null => SqlValue::Null,
                Value::Bool(b) => SqlValue::Bool(b),
                Value::String(s) => SqlValue::Text(s),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => SqlValue::Integer(i),
                    None => match n.as_f64() {
                        Some(f) => SqlValue::Float(f),
                        None => {
                            errors.push(format!("{field} is not a representable number"));
                            continue;
                        }
                    },
                },
                Value::Array(_) | Value::Object(_) => {
                    errors.push(format!("{field} must be a scalar value"));
                    continue;
                }
            };
            entries.push((field, value));
        }

        if !errors.is_empty() {
            return Err(InvalidInput::from_messages(errors));
        }

        Ok(Self { entries })
    }

    /// Reject the payload if it touches any of `fields`
    pub fn ensure_excludes(&self, fields: &[&str]) -> Result<(), InvalidInput> {
        let errors: Vec<String> = self
            .keys()
            .filter(|key| fields.contains(key))
            .map(|key| format!("Cannot update {key}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(InvalidInput::from_messages(errors))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build the body of an UPDATE ... SET clause (without the `SET` keyword).
///
/// `{firstName: "Aliya", age: 32}` with `firstName -> first_name` becomes
/// `"first_name"=$1, "age"=$2` with values `["Aliya", 32]`. The caller binds
/// its identity predicate at [`ClauseResult::next_index`].
pub fn build_set_clause(
    payload: &UpdatePayload,
    fields: &FieldNameMap<'_>,
) -> Result<ClauseResult, InvalidInput> {
    if payload.is_empty() {
        return Err(InvalidInput::new("No data"));
    }

    let clause = payload
        .keys()
        .enumerate()
        .map(|(idx, field)| format!("{}=${}", quote_ident(fields.column(field)), idx + 1))
        .collect::<Vec<_>>()
        .join(", ");

    let values = payload.iter().map(|(_, value)| value.clone()).collect();

    Ok(ClauseResult::new(clause, values))
}

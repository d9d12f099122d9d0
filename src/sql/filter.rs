use std::collections::BTreeMap;

use super::value::{ClauseResult, InvalidInput, SqlValue};

/// A typed filter value as it arrives from the query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl FilterValue {
    fn kind(&self) -> FilterKind {
        match self {
            Self::Text(_) => FilterKind::Text,
            Self::Integer(_) => FilterKind::Integer,
            Self::Bool(_) => FilterKind::Bool,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Integer,
    Bool,
}

impl FilterKind {
    fn describe(self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Integer => "an integer",
            Self::Bool => "a boolean",
        }
    }
}

/// SQL predicate template for one filter key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// `column ILIKE $n`, value wrapped in `%...%`
    Contains(&'static str),
    /// `column >= $n`
    AtLeast(&'static str),
    /// `column <= $n`
    AtMost(&'static str),
    /// `column > $n` bound to `threshold`, emitted only for `true`
    PresentAbove {
        column: &'static str,
        threshold: i64,
    },
}

impl Predicate {
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Contains(_) => FilterKind::Text,
            Self::AtLeast(_) | Self::AtMost(_) => FilterKind::Integer,
            Self::PresentAbove { .. } => FilterKind::Bool,
        }
    }

    /// Render against the next placeholder, or `None` if the value
    /// contributes nothing (e.g. a presence flag set to `false`)
    fn render(&self, value: &FilterValue, index: usize) -> Option<(String, SqlValue)> {
        match (self, value) {
            (Self::Contains(column), FilterValue::Text(text)) => Some((
                format!("{column} ILIKE ${index}"),
                SqlValue::Text(format!("%{text}%")),
            )),
            (Self::AtLeast(column), FilterValue::Integer(n)) => {
                Some((format!("{column} >= ${index}"), SqlValue::Integer(*n)))
            }
            (Self::AtMost(column), FilterValue::Integer(n)) => {
                Some((format!("{column} <= ${index}"), SqlValue::Integer(*n)))
            }
            (Self::PresentAbove { column, threshold }, FilterValue::Bool(true)) => Some((
                format!("{column} > ${index}"),
                SqlValue::Integer(*threshold),
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FilterRule {
    pub key: &'static str,
    pub predicate: Predicate,
}

/// A lower/upper bound pair that must not cross
#[derive(Debug, Clone, Copy)]
pub struct Bound {
    pub min: &'static str,
    pub max: &'static str,
}

/// Per-entity filter table.
///
/// `rules` is both the allow-list and the canonical emission order.
#[derive(Debug, Clone, Copy)]
pub struct FilterSchema {
    pub rules: &'static [FilterRule],
    pub bounds: &'static [Bound],
}

impl FilterSchema {
    pub fn rule(&self, key: &str) -> Option<&FilterRule> {
        self.rules.iter().find(|rule| rule.key == key)
    }

    pub fn allowed_keys(&self) -> String {
        self.rules
            .iter()
            .map(|rule| rule.key)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub const COMPANY_FILTERS: FilterSchema = FilterSchema {
    rules: &[
        FilterRule {
            key: "name",
            predicate: Predicate::Contains("name"),
        },
        FilterRule {
            key: "minEmployees",
            predicate: Predicate::AtLeast("num_employees"),
        },
        FilterRule {
            key: "maxEmployees",
            predicate: Predicate::AtMost("num_employees"),
        },
    ],
    bounds: &[Bound {
        min: "minEmployees",
        max: "maxEmployees",
    }],
};

pub const JOB_FILTERS: FilterSchema = FilterSchema {
    rules: &[
        FilterRule {
            key: "title",
            predicate: Predicate::Contains("title"),
        },
        FilterRule {
            key: "minSalary",
            predicate: Predicate::AtLeast("salary"),
        },
        FilterRule {
            key: "hasEquity",
            predicate: Predicate::PresentAbove {
                column: "equity",
                threshold: 0,
            },
        },
    ],
    bounds: &[],
};

/// Filter key/value pairs for a list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    entries: BTreeMap<String, FilterValue>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Coerce raw query-string pairs using the kinds declared in `schema`.
    ///
    /// Keys outside the allow-list are kept as text; the builder reports them.
    pub fn from_query<I, K, V>(pairs: I, schema: &FilterSchema) -> Result<Self, InvalidInput>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut entries = BTreeMap::new();
        let mut errors = Vec::new();

        for (key, raw) in pairs {
            let key = key.into();
            let raw = raw.as_ref();
            let kind = schema
                .rule(&key)
                .map(|rule| rule.predicate.kind())
                .unwrap_or(FilterKind::Text);

            let value = match kind {
                FilterKind::Text => Some(FilterValue::Text(raw.to_string())),
                FilterKind::Integer => raw.trim().parse::<i64>().ok().map(FilterValue::Integer),
                FilterKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                    "true" => Some(FilterValue::Bool(true)),
                    "false" => Some(FilterValue::Bool(false)),
                    _ => None,
                },
            };

            match value {
                Some(value) => {
                    entries.insert(key, value);
                }
                None => errors.push(format!("{key} must be {}", kind.describe())),
            }
        }

        if !errors.is_empty() {
            return Err(InvalidInput::from_messages(errors));
        }

        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(FilterValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(FilterValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(FilterValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn validate(params: &FilterParams, schema: &FilterSchema) -> Result<(), InvalidInput> {
    let unknown: Vec<&str> = params.keys().filter(|key| schema.rule(key).is_none()).collect();
    if !unknown.is_empty() {
        return Err(InvalidInput::new(format!(
            "Can only filter on {} (got: {})",
            schema.allowed_keys(),
            unknown.join(", ")
        )));
    }

    let mismatched: Vec<String> = schema
        .rules
        .iter()
        .filter_map(|rule| {
            let value = params.get(rule.key)?;
            let expected = rule.predicate.kind();
            (value.kind() != expected)
                .then(|| format!("{} must be {}", rule.key, expected.describe()))
        })
        .collect();
    if !mismatched.is_empty() {
        return Err(InvalidInput::from_messages(mismatched));
    }

    for bound in schema.bounds {
        if let (Some(min), Some(max)) = (params.integer(bound.min), params.integer(bound.max)) {
            if min > max {
                return Err(InvalidInput::new("Impossible min and max filters"));
            }
        }
    }

    Ok(())
}

/// Build a `WHERE ...` clause from `params` using the table in `schema`.
///
/// Returns `Ok(None)` when nothing should be filtered: either `params` is
/// empty or no present key produced a predicate. All validation happens
/// before any predicate is emitted.
pub fn build_filter_clause(
    params: &FilterParams,
    schema: &FilterSchema,
) -> Result<Option<ClauseResult>, InvalidInput> {
    if params.is_empty() {
        return Ok(None);
    }

    validate(params, schema)?;

    let mut predicates = Vec::new();
    let mut values = Vec::new();

    for rule in schema.rules {
        let Some(value) = params.get(rule.key) else {
            continue;
        };
        if let Some((predicate, bound)) = rule.predicate.render(value, values.len() + 1) {
            predicates.push(predicate);
            values.push(bound);
        }
    }

    if predicates.is_empty() {
        return Ok(None);
    }

    Ok(Some(ClauseResult::new(
        format!("WHERE {}", predicates.join(" AND ")),
        values,
    )))
}

pub fn build_company_filter(params: &FilterParams) -> Result<Option<ClauseResult>, InvalidInput> {
    build_filter_clause(params, &COMPANY_FILTERS)
}

pub fn build_job_filter(params: &FilterParams) -> Result<Option<ClauseResult>, InvalidInput> {
    build_filter_clause(params, &JOB_FILTERS)
}

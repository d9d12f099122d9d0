//! Property-based tests using proptest
//!
//! These generate random payloads and filter sets and check the invariants
//! every generated clause must satisfy.

use proptest::prelude::*;
use regex::Regex;

use jobly::sql::{
    build_company_filter, build_job_filter, build_set_clause, FieldNameMap, FilterParams,
    SqlValue, UpdatePayload,
};

const FIELDS: FieldNameMap<'static> =
    FieldNameMap::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")]);

/// Strategy for scalar column values
fn sql_value_strategy() -> impl Strategy<Value = SqlValue> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,16}".prop_map(SqlValue::Text),
        any::<i64>().prop_map(SqlValue::Integer),
        (-1.0e6f64..1.0e6).prop_map(SqlValue::Float),
        any::<bool>().prop_map(SqlValue::Bool),
        Just(SqlValue::Null),
    ]
}

/// Strategy for payloads with distinct field names
fn payload_strategy() -> impl Strategy<Value = UpdatePayload> {
    prop::collection::btree_map("[a-z][a-zA-Z]{0,10}", sql_value_strategy(), 1..12).prop_map(
        |fields| {
            fields
                .into_iter()
                .fold(UpdatePayload::new(), |payload, (field, value)| {
                    payload.with(field, value)
                })
        },
    )
}

/// Placeholder numbers in order of appearance
fn placeholders(clause: &str) -> Vec<usize> {
    let re = Regex::new(r"\$(\d+)").unwrap();
    re.captures_iter(clause)
        .map(|c| c[1].parse().unwrap())
        .collect()
}

proptest! {
    #[test]
    fn test_set_clause_placeholders_are_contiguous(payload in payload_strategy()) {
        let result = build_set_clause(&payload, &FIELDS).unwrap();
        let expected: Vec<usize> = (1..=payload.len()).collect();

        prop_assert_eq!(placeholders(result.clause()), expected);
        prop_assert_eq!(result.values().len(), payload.len());
        prop_assert_eq!(result.next_index(), payload.len() + 1);
    }

    #[test]
    fn test_set_clause_values_follow_payload_order(payload in payload_strategy()) {
        let result = build_set_clause(&payload, &FIELDS).unwrap();
        let supplied: Vec<&SqlValue> = payload.iter().map(|(_, v)| v).collect();
        let bound: Vec<&SqlValue> = result.values().iter().collect();

        prop_assert_eq!(bound, supplied);
    }

    #[test]
    fn test_set_clause_uses_mapped_columns(payload in payload_strategy()) {
        let result = build_set_clause(&payload, &FIELDS).unwrap();
        let assignments: Vec<&str> = result.clause().split(", ").collect();

        for ((field, _), assignment) in payload.iter().zip(assignments) {
            let prefix = format!("\"{}\"=$", FIELDS.column(field));
            prop_assert!(assignment.starts_with(&prefix), "{} vs {}", assignment, prefix);
        }
    }

    #[test]
    fn test_set_clause_is_deterministic(payload in payload_strategy()) {
        let first = build_set_clause(&payload, &FIELDS).unwrap();
        let second = build_set_clause(&payload, &FIELDS).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_company_filter_ignores_input_order(
        name in proptest::option::of("[a-z]{1,8}"),
        min in proptest::option::of(0i64..50),
        max in proptest::option::of(50i64..100),
        reversed in any::<bool>(),
    ) {
        let mut pairs: Vec<(String, String)> = Vec::new();
        if let Some(name) = &name {
            pairs.push(("name".to_string(), name.clone()));
        }
        if let Some(min) = min {
            pairs.push(("minEmployees".to_string(), min.to_string()));
        }
        if let Some(max) = max {
            pairs.push(("maxEmployees".to_string(), max.to_string()));
        }
        if reversed {
            pairs.reverse();
        }

        let params = FilterParams::from_query(pairs, &jobly::sql::COMPANY_FILTERS).unwrap();
        let canonical = FilterParams::new();
        let canonical = match &name { Some(n) => canonical.with("name", n.as_str()), None => canonical };
        let canonical = match min { Some(m) => canonical.with("minEmployees", m), None => canonical };
        let canonical = match max { Some(m) => canonical.with("maxEmployees", m), None => canonical };

        let result = build_company_filter(&params).unwrap();
        prop_assert_eq!(&result, &build_company_filter(&canonical).unwrap());

        let present = usize::from(name.is_some()) + usize::from(min.is_some()) + usize::from(max.is_some());
        match result {
            None => prop_assert_eq!(present, 0),
            Some(clause) => {
                let expected: Vec<usize> = (1..=present).collect();
                prop_assert_eq!(placeholders(clause.clause()), expected);
                prop_assert!(clause.clause().starts_with("WHERE "));
            }
        }
    }

    #[test]
    fn test_crossed_bounds_always_rejected(min in 1i64..1000, gap in 1i64..1000) {
        let params = FilterParams::new()
            .with("minEmployees", min)
            .with("maxEmployees", min - gap);

        let err = build_company_filter(&params).unwrap_err();
        prop_assert_eq!(err.to_string(), "Impossible min and max filters");
    }

    #[test]
    fn test_text_filters_are_wildcard_wrapped(title in "[a-zA-Z0-9 ]{1,20}") {
        let params = FilterParams::new().with("title", title.as_str());
        let result = build_job_filter(&params).unwrap().unwrap();

        prop_assert_eq!(result.values(), &[SqlValue::Text(format!("%{title}%"))]);
    }
}

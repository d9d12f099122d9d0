use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

use crate::sql::SqlValue;

/// Common SQL query fragments shared by the repositories
pub struct QueryBuilder;

impl QueryBuilder {
    /// Company columns aliased to their logical names
    pub const COMPANY_COLUMNS: &'static str = r#"handle,
               name,
               description,
               num_employees AS "numEmployees",
               logo_url AS "logoUrl""#;

    /// Job columns aliased to their logical names; NUMERIC equity is read as text
    pub const JOB_COLUMNS: &'static str = r#"id,
               title,
               salary,
               equity::TEXT AS equity,
               company_handle AS "companyHandle""#;

    /// Company SELECT with an optional `WHERE ...` fragment
    pub fn select_companies(where_clause: &str) -> String {
        format!(
            "SELECT {} FROM companies {} ORDER BY name",
            Self::COMPANY_COLUMNS,
            where_clause
        )
    }

    pub fn select_jobs(where_clause: &str) -> String {
        format!(
            "SELECT {} FROM jobs {} ORDER BY title",
            Self::JOB_COLUMNS,
            where_clause
        )
    }

    /// `UPDATE <table> SET <set_clause> WHERE <key> = $<key_index> RETURNING <columns>`
    pub fn update_returning(
        table: &str,
        set_clause: &str,
        key: &str,
        key_index: usize,
        columns: &str,
    ) -> String {
        format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            table, set_clause, key, key_index, columns
        )
    }
}

/// Bind clause values in placeholder order.
///
/// Nulls go out as INT4 so Postgres can assign them to any column type.
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: &[SqlValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            SqlValue::Text(text) => query.bind(text.clone()),
            SqlValue::Integer(number) => query.bind(*number),
            SqlValue::Float(number) => query.bind(*number),
            SqlValue::Bool(flag) => query.bind(*flag),
            SqlValue::Null => query.bind(None::<i32>),
        };
    }
    query
}

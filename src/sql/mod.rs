//! SQL fragment builders for partial updates and filtered listings.
//!
//! Everything here is pure: builders take structured input and return a
//! [`ClauseResult`] (fragment text plus positional values) or an
//! [`InvalidInput`] error. Executing the fragment is the caller's job.

mod filter;
mod partial_update;
mod value;

pub use filter::{
    build_company_filter, build_filter_clause, build_job_filter, Bound, FilterKind, FilterParams,
    FilterRule, FilterSchema, FilterValue, Predicate, COMPANY_FILTERS, JOB_FILTERS,
};
pub use partial_update::{build_set_clause, FieldNameMap, UpdatePayload};
pub use value::{ClauseResult, InvalidInput, SqlValue};

//! # Jobly - Company and Job Listings
//!
//! A REST backend for companies and the jobs they post, backed by
//! parameterized PostgreSQL queries and built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **SQL**: Pure builders for partial-update SET clauses and filter WHERE clauses
//! - **Domain**: Entities, value objects, domain errors
//! - **Application**: Use cases and ports (interfaces)
//! - **Infrastructure**: Postgres repositories
//! - **API**: HTTP handlers and middleware
//!
//! ## Example Usage
//!
//! ```
//! use jobly::sql::{build_company_filter, FilterParams};
//!
//! let filters = FilterParams::new().with("name", "net").with("minEmployees", 5);
//! let clause = build_company_filter(&filters).unwrap().unwrap();
//! assert_eq!(clause.clause(), "WHERE name ILIKE $1 AND num_employees >= $2");
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod sql;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};

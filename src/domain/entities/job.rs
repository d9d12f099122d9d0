use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CompanyHandle;

/// Job posting as stored.
///
/// `equity` is the exact NUMERIC text Postgres returns (e.g. "0.5").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
}

impl Job {
    pub const IMMUTABLE_FIELDS: &'static [&'static str] = &["id", "companyHandle"];

    pub fn has_equity(&self) -> bool {
        self.equity
            .as_deref()
            .and_then(|e| e.parse::<f64>().ok())
            .is_some_and(|e| e > 0.0)
    }
}

/// Data for inserting a job
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: CompanyHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(equity: Option<&str>) -> Job {
        Job {
            id: 1,
            title: "j1".to_string(),
            salary: Some(100),
            equity: equity.map(str::to_string),
            company_handle: "c1".to_string(),
        }
    }

    #[test]
    fn test_has_equity() {
        assert!(job(Some("0.1")).has_equity());
        assert!(!job(Some("0")).has_equity());
        assert!(!job(Some("0.000")).has_equity());
        assert!(!job(None).has_equity());
    }
}

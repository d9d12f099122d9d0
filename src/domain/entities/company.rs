use serde::{Deserialize, Serialize};

use super::job::Job;
use crate::domain::value_objects::CompanyHandle;

/// Company as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl Company {
    /// Fields a partial update may never touch
    pub const IMMUTABLE_FIELDS: &'static [&'static str] = &["handle"];
}

/// Company together with the jobs it posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    pub company: Company,
    pub jobs: Vec<Job>,
}

/// Data for inserting a company
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub handle: CompanyHandle,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

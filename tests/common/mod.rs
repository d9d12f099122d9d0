//! In-memory repositories and request helpers shared by the API tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;

use jobly::api::create_router;
use jobly::api::middleware::auth::JwtKeys;
use jobly::api::router::AppState;
use jobly::domain::entities::{Company, CompanyDetail, Job, NewCompany, NewJob};
use jobly::ports::{CompanyRepository, JobRepository, RepositoryError};
use jobly::sql::{
    build_company_filter, build_job_filter, build_set_clause, FieldNameMap, FilterParams,
    InvalidInput, SqlValue, UpdatePayload,
};

pub const TEST_SECRET: &str = "test-secret";

#[derive(Default)]
struct Store {
    companies: BTreeMap<String, Company>,
    jobs: Vec<Job>,
    next_job_id: i32,
}

/// Both repositories share one store so deletes cascade and details see jobs
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Store>>,
}

fn text(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Text(s) => Some(s.clone()),
        _ => None,
    }
}

fn integer(value: &SqlValue) -> Option<i32> {
    match value {
        SqlValue::Integer(n) => i32::try_from(*n).ok(),
        _ => None,
    }
}

fn decimal(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Integer(n) => Some(n.to_string()),
        SqlValue::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

impl InMemoryStore {
    pub fn seeded() -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().unwrap();
            for n in 1..=3 {
                let handle = format!("c{n}");
                inner.companies.insert(
                    handle.clone(),
                    Company {
                        handle,
                        name: format!("C{n}"),
                        description: format!("Desc{n}"),
                        num_employees: Some(n),
                        logo_url: Some(format!("http://c{n}.img")),
                    },
                );
            }
            for (title, salary, equity) in [
                ("Job1", Some(100), Some("0.1")),
                ("Job2", Some(200), Some("0.2")),
                ("Job3", Some(300), Some("0")),
                ("Job4", None, None),
            ] {
                inner.next_job_id += 1;
                let id = inner.next_job_id;
                inner.jobs.push(Job {
                    id,
                    title: title.to_string(),
                    salary,
                    equity: equity.map(str::to_string),
                    company_handle: "c1".to_string(),
                });
            }
        }
        store
    }

    pub fn app(&self) -> Router {
        let state = AppState::new(
            Arc::new(self.clone()) as Arc<dyn CompanyRepository>,
            Arc::new(self.clone()) as Arc<dyn JobRepository>,
            JwtKeys::new(TEST_SECRET),
        );
        create_router(state)
    }
}

const COMPANY_FIELDS: FieldNameMap<'static> =
    FieldNameMap::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")]);
const JOB_FIELDS: FieldNameMap<'static> = FieldNameMap::new(&[("companyHandle", "company_handle")]);

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn create(&self, company: &NewCompany) -> Result<Company, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.companies.contains_key(company.handle.as_str()) {
            return Err(RepositoryError::Duplicate(format!(
                "Duplicate company: {}",
                company.handle
            )));
        }
        let created = Company {
            handle: company.handle.to_string(),
            name: company.name.clone(),
            description: company.description.clone(),
            num_employees: company.num_employees,
            logo_url: company.logo_url.clone(),
        };
        inner
            .companies
            .insert(created.handle.clone(), created.clone());
        Ok(created)
    }

    async fn find_all(&self, filters: &FilterParams) -> Result<Vec<Company>, RepositoryError> {
        build_company_filter(filters)?;

        let inner = self.inner.lock().unwrap();
        let name = filters.text("name").map(str::to_lowercase);
        let min = filters.integer("minEmployees");
        let max = filters.integer("maxEmployees");

        let mut companies: Vec<Company> = inner
            .companies
            .values()
            .filter(|c| name.as_ref().map_or(true, |n| c.name.to_lowercase().contains(n)))
            .filter(|c| min.map_or(true, |m| c.num_employees.is_some_and(|e| i64::from(e) >= m)))
            .filter(|c| max.map_or(true, |m| c.num_employees.is_some_and(|e| i64::from(e) <= m)))
            .cloned()
            .collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn get(&self, handle: &str) -> Result<CompanyDetail, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        let company = inner
            .companies
            .get(handle)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("No company: {handle}")))?;
        let jobs = inner
            .jobs
            .iter()
            .filter(|j| j.company_handle == handle)
            .cloned()
            .collect();
        Ok(CompanyDetail { company, jobs })
    }

    async fn update(
        &self,
        handle: &str,
        payload: &UpdatePayload,
    ) -> Result<Company, RepositoryError> {
        payload.ensure_excludes(Company::IMMUTABLE_FIELDS)?;
        build_set_clause(payload, &COMPANY_FIELDS)?;

        let mut inner = self.inner.lock().unwrap();
        let company = inner
            .companies
            .get_mut(handle)
            .ok_or_else(|| RepositoryError::NotFound(format!("No company: {handle}")))?;

        for (field, value) in payload.iter() {
            match field {
                "name" => company.name = text(value).unwrap_or_default(),
                "description" => company.description = text(value).unwrap_or_default(),
                "numEmployees" => company.num_employees = integer(value),
                "logoUrl" => company.logo_url = text(value),
                _ => {}
            }
        }
        Ok(company.clone())
    }

    async fn remove(&self, handle: &str) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.companies.remove(handle).is_none() {
            return Err(RepositoryError::NotFound(format!("No company: {handle}")));
        }
        inner.jobs.retain(|j| j.company_handle != handle);
        Ok(())
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn create(&self, job: &NewJob) -> Result<Job, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.companies.contains_key(job.company_handle.as_str()) {
            return Err(RepositoryError::InvalidInput(InvalidInput::new(format!(
                "No company: {}",
                job.company_handle
            ))));
        }
        inner.next_job_id += 1;
        let created = Job {
            id: inner.next_job_id,
            title: job.title.clone(),
            salary: job.salary,
            equity: job.equity.map(|e| e.to_string()),
            company_handle: job.company_handle.to_string(),
        };
        inner.jobs.push(created.clone());
        Ok(created)
    }

    async fn find_all(&self, filters: &FilterParams) -> Result<Vec<Job>, RepositoryError> {
        build_job_filter(filters)?;

        let inner = self.inner.lock().unwrap();
        let title = filters.text("title").map(str::to_lowercase);
        let min_salary = filters.integer("minSalary");
        let has_equity = filters.flag("hasEquity").unwrap_or(false);

        let mut jobs: Vec<Job> = inner
            .jobs
            .iter()
            .filter(|j| title.as_ref().map_or(true, |t| j.title.to_lowercase().contains(t)))
            .filter(|j| min_salary.map_or(true, |m| j.salary.is_some_and(|s| i64::from(s) >= m)))
            .filter(|j| !has_equity || j.has_equity())
            .cloned()
            .collect();
        jobs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(jobs)
    }

    async fn get(&self, id: i32) -> Result<Job, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        inner
            .jobs
            .iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("No job: {id}")))
    }

    async fn update(&self, id: i32, payload: &UpdatePayload) -> Result<Job, RepositoryError> {
        payload.ensure_excludes(Job::IMMUTABLE_FIELDS)?;
        build_set_clause(payload, &JOB_FIELDS)?;

        let mut inner = self.inner.lock().unwrap();
        let job = inner
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("No job: {id}")))?;

        for (field, value) in payload.iter() {
            match field {
                "title" => job.title = text(value).unwrap_or_default(),
                "salary" => job.salary = integer(value),
                "equity" => job.equity = decimal(value),
                _ => {}
            }
        }
        Ok(job.clone())
    }

    async fn remove(&self, id: i32) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.jobs.len();
        inner.jobs.retain(|j| j.id != id);
        if inner.jobs.len() == before {
            return Err(RepositoryError::NotFound(format!("No job: {id}")));
        }
        Ok(())
    }
}

pub fn admin_token() -> String {
    JwtKeys::new(TEST_SECRET).create_token("admin", true).unwrap()
}

pub fn user_token() -> String {
    JwtKeys::new(TEST_SECRET).create_token("u1", false).unwrap()
}

/// Build a request, optionally with a bearer token and JSON body
pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    match body {
        Some(data) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&data).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Helper to extract JSON response
pub async fn extract_json_response(response: axum::response::Response) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

use std::sync::Arc;

use tracing::info;

use crate::application::{
    dto::{CompanyDetailDto, CompanyDto, NewCompanyRequest},
    errors::UseCaseError,
    ports::CompanyRepository,
};
use crate::domain::entities::NewCompany;
use crate::sql::{FilterParams, UpdatePayload};

/// Use case for creating companies
pub struct CreateCompanyUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl CreateCompanyUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: NewCompanyRequest) -> Result<CompanyDto, UseCaseError> {
        let new_company = NewCompany::try_from(request)?;
        let company = self.repository.create(&new_company).await?;
        info!(handle = %company.handle, "Company created");
        Ok(company.into())
    }
}

/// Use case for listing companies with optional filters
pub struct ListCompaniesUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl ListCompaniesUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, filters: FilterParams) -> Result<Vec<CompanyDto>, UseCaseError> {
        let companies = self.repository.find_all(&filters).await?;
        Ok(companies.into_iter().map(CompanyDto::from).collect())
    }
}

/// Use case for getting a single company with its jobs
pub struct GetCompanyUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl GetCompanyUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, handle: &str) -> Result<CompanyDetailDto, UseCaseError> {
        let detail = self.repository.get(handle).await?;
        Ok(detail.into())
    }
}

/// Use case for partially updating companies
pub struct UpdateCompanyUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl UpdateCompanyUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        handle: &str,
        payload: UpdatePayload,
    ) -> Result<CompanyDto, UseCaseError> {
        let company = self.repository.update(handle, &payload).await?;
        info!(handle = %company.handle, fields = payload.len(), "Company updated");
        Ok(company.into())
    }
}

/// Use case for deleting companies
pub struct DeleteCompanyUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl DeleteCompanyUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, handle: &str) -> Result<(), UseCaseError> {
        self.repository.remove(handle).await?;
        info!(handle, "Company deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockCompanyRepository, RepositoryError};
    use crate::domain::entities::{Company, CompanyDetail, Job};
    use crate::sql::InvalidInput;

    fn company(handle: &str) -> Company {
        Company {
            handle: handle.to_string(),
            name: handle.to_uppercase(),
            description: format!("Desc {handle}"),
            num_employees: Some(1),
            logo_url: Some(format!("http://{handle}.img")),
        }
    }

    fn new_company_request(handle: &str) -> NewCompanyRequest {
        NewCompanyRequest {
            handle: handle.to_string(),
            name: "New".to_string(),
            description: "DescNew".to_string(),
            num_employees: Some(10),
            logo_url: Some("http://new.img".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_company_happy_path() {
        // Arrange
        let mut mock_repo = MockCompanyRepository::new();
        mock_repo
            .expect_create()
            .withf(|c| c.handle.as_str() == "new" && c.num_employees == Some(10))
            .times(1)
            .returning(|_| Ok(company("new")));

        let use_case = CreateCompanyUseCase::new(Arc::new(mock_repo));

        // Act
        let result = use_case.execute(new_company_request("new")).await;

        // Assert
        let dto = result.unwrap();
        assert_eq!(dto.handle, "new");
    }

    #[tokio::test]
    async fn test_create_company_rejects_invalid_handle_before_repository() {
        let mut mock_repo = MockCompanyRepository::new();
        mock_repo.expect_create().never();

        let use_case = CreateCompanyUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute(new_company_request("Bad Handle")).await;

        assert!(matches!(result, Err(UseCaseError::Domain(_))));
    }

    #[tokio::test]
    async fn test_create_company_duplicate() {
        let mut mock_repo = MockCompanyRepository::new();
        mock_repo
            .expect_create()
            .returning(|c| Err(RepositoryError::Duplicate(format!("Duplicate company: {}", c.handle))));

        let use_case = CreateCompanyUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute(new_company_request("c1")).await;

        match result {
            Err(UseCaseError::Duplicate(msg)) => assert_eq!(msg, "Duplicate company: c1"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_companies_passes_filters() {
        let mut mock_repo = MockCompanyRepository::new();
        mock_repo
            .expect_find_all()
            .withf(|f| f.text("name") == Some("c") && f.integer("minEmployees") == Some(2))
            .times(1)
            .returning(|_| Ok(vec![company("c2"), company("c3")]));

        let use_case = ListCompaniesUseCase::new(Arc::new(mock_repo));
        let filters = FilterParams::new().with("name", "c").with("minEmployees", 2);

        let companies = use_case.execute(filters).await.unwrap();

        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].handle, "c2");
    }

    #[tokio::test]
    async fn test_list_companies_invalid_filter() {
        let mut mock_repo = MockCompanyRepository::new();
        mock_repo.expect_find_all().returning(|_| {
            Err(RepositoryError::InvalidInput(InvalidInput::new(
                "Impossible min and max filters",
            )))
        });

        let use_case = ListCompaniesUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute(FilterParams::new()).await;

        assert!(matches!(result, Err(UseCaseError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_get_company_includes_jobs() {
        let mut mock_repo = MockCompanyRepository::new();
        mock_repo
            .expect_get()
            .withf(|h| h == "c1")
            .returning(|_| {
                Ok(CompanyDetail {
                    company: company("c1"),
                    jobs: vec![Job {
                        id: 7,
                        title: "j1".to_string(),
                        salary: Some(100),
                        equity: Some("0.1".to_string()),
                        company_handle: "c1".to_string(),
                    }],
                })
            });

        let use_case = GetCompanyUseCase::new(Arc::new(mock_repo));
        let detail = use_case.execute("c1").await.unwrap();

        assert_eq!(detail.handle, "c1");
        assert_eq!(detail.jobs.len(), 1);
        assert_eq!(detail.jobs[0].id, 7);
    }

    #[tokio::test]
    async fn test_get_company_not_found() {
        let mut mock_repo = MockCompanyRepository::new();
        mock_repo
            .expect_get()
            .returning(|h| Err(RepositoryError::NotFound(format!("No company: {h}"))));

        let use_case = GetCompanyUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute("nope").await;

        assert!(matches!(result, Err(UseCaseError::NotFound(msg)) if msg == "No company: nope"));
    }

    #[tokio::test]
    async fn test_update_company_forwards_payload() {
        let mut mock_repo = MockCompanyRepository::new();
        mock_repo
            .expect_update()
            .withf(|h, p| h == "c1" && p.keys().collect::<Vec<_>>() == vec!["name"])
            .times(1)
            .returning(|_, _| Ok(company("c1")));

        let use_case = UpdateCompanyUseCase::new(Arc::new(mock_repo));
        let payload = UpdatePayload::new().with("name", "New");

        assert!(use_case.execute("c1", payload).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_company_not_found() {
        let mut mock_repo = MockCompanyRepository::new();
        mock_repo
            .expect_remove()
            .returning(|h| Err(RepositoryError::NotFound(format!("No company: {h}"))));

        let use_case = DeleteCompanyUseCase::new(Arc::new(mock_repo));

        assert!(matches!(
            use_case.execute("nope").await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}

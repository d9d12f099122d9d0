mod company_handle;

pub use company_handle::CompanyHandle;

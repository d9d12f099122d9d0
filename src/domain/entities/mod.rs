mod company;
mod job;

pub use company::{Company, CompanyDetail, NewCompany};
pub use job::{Job, NewJob};

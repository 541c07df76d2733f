// Domain Layer - Pure business logic and entities

pub mod company;
pub mod error;
pub mod job;

// Re-exports
pub use company::{Company, CompanyHandle};
pub use error::DomainError;
pub use job::{Job, JobDetail, JobFilter, JobId, JobPatch, JobSummary, NewJob, Patch};

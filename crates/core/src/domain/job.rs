// Job Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::company::{Company, CompanyHandle};
use crate::domain::error::DomainError;

/// Job ID (database-generated)
pub type JobId = i64;

/// Job Entity
///
/// `equity` is carried as a decimal string so the exact representation
/// survives the round trip through the store (e.g. "0.05" stays "0.05").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<String>,
    pub company_handle: CompanyHandle,
}

/// Input for job creation; the store generates the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<String>,
    pub company_handle: CompanyHandle,
}

impl NewJob {
    pub fn validate(&self) -> std::result::Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        if self.company_handle.trim().is_empty() {
            return Err(DomainError::EmptyCompanyHandle);
        }
        if let Some(salary) = self.salary {
            if salary < 0 {
                return Err(DomainError::NegativeSalary(salary));
            }
        }
        if let Some(equity) = &self.equity {
            validate_equity(equity)?;
        }
        Ok(())
    }
}

/// List row: job joined with its company's name (LEFT JOIN, so the name
/// is absent for an orphaned reference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<String>,
    pub company_handle: CompanyHandle,
    pub company_name: Option<String>,
}

/// Detail view: the bare handle is replaced by the embedded company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    pub id: JobId,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<String>,
    pub company: Option<Company>,
}

/// Search filters for listing jobs (all optional, combined with AND)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobFilter {
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
    /// Lower bound on salary (inclusive)
    pub min_salary: Option<i64>,
    /// When true, only jobs with equity strictly greater than zero.
    /// False imposes no filter (it does NOT mean "equity = 0").
    #[serde(default)]
    pub has_equity: bool,
}

/// Three-state patch field: distinguishes "leave unchanged" from
/// "set to NULL" from "set to this value".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }
}

// A present JSON null becomes `Null`; `Missing` only ever comes from
// `#[serde(default)]` when the key is absent.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

/// Partial update payload.
///
/// Only `title`, `salary` and `equity` exist here, so `id` and
/// `company_handle` are unrepresentable through the update path.
/// `title` is a plain Option because the column is NOT NULL; an explicit
/// null title is treated the same as an absent one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JobPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub salary: Patch<i64>,
    #[serde(default)]
    pub equity: Patch<String>,
}

impl JobPatch {
    /// True when the patch would touch nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.salary.is_missing() && self.equity.is_missing()
    }

    pub fn validate(&self) -> std::result::Result<(), DomainError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(DomainError::EmptyTitle);
            }
        }
        if let Patch::Value(salary) = &self.salary {
            if *salary < 0 {
                return Err(DomainError::NegativeSalary(*salary));
            }
        }
        if let Patch::Value(equity) = &self.equity {
            validate_equity(equity)?;
        }
        Ok(())
    }
}

fn validate_equity(equity: &str) -> std::result::Result<(), DomainError> {
    match equity.parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => Ok(()),
        _ => Err(DomainError::InvalidEquity(equity.to_string())),
    }
}

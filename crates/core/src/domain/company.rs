// Company Read Model
//
// Companies are owned by an external collaborator; this crate only reads
// them (existence checks on job creation, embedding on job detail reads).

use serde::{Deserialize, Serialize};

/// Company handle (primary key of companies)
pub type CompanyHandle = String;

/// Public company fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub handle: CompanyHandle,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i64>,
    pub logo_url: Option<String>,
}

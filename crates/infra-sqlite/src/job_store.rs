// SQLite JobStore Implementation

use async_trait::async_trait;
use joblist_core::domain::{
    Company, Job, JobDetail, JobFilter, JobId, JobPatch, JobSummary, NewJob, Patch,
};
use joblist_core::error::{AppError, Result};
use joblist_core::port::JobStore;
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::sql::{build_partial_update, SqlArg};

// Helper to convert sqlx::Error to AppError with structured information
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => {
                        // UNIQUE constraint failed
                        AppError::Duplicate(format!(
                            "Unique constraint violation: {}",
                            db_err.message()
                        ))
                    }
                    "787" | "3850" => {
                        // FOREIGN KEY constraint failed
                        AppError::Validation(format!(
                            "Foreign key constraint violation: {}",
                            db_err.message()
                        ))
                    }
                    "275" | "531" | "1043" => {
                        // CHECK constraint failed
                        AppError::Validation(format!(
                            "Check constraint violation: {}",
                            db_err.message()
                        ))
                    }
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        _ => AppError::Database(err.to_string()),
    }
}

pub struct SqliteJobStore {
    pool: SqlitePool,
}

impl SqliteJobStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for SqliteJobStore {
    async fn create(&self, input: &NewJob) -> Result<Job> {
        // Duplicate check, company check and insert share one transaction;
        // UNIQUE(title) backstops the check so a concurrent create still
        // surfaces as Duplicate instead of a second row.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let duplicate: Option<String> =
            sqlx::query_scalar("SELECT title FROM jobs WHERE title = $1")
                .bind(&input.title)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;

        if duplicate.is_some() {
            return Err(AppError::Duplicate(format!(
                "Duplicate job: {}",
                input.title
            )));
        }

        let company: Option<String> =
            sqlx::query_scalar("SELECT handle FROM companies WHERE handle = $1")
                .bind(&input.company_handle)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;

        if company.is_none() {
            return Err(AppError::Validation(format!(
                "Cannot make a request for a non-existing company: {}",
                input.company_handle
            )));
        }

        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, salary, equity, company_handle
            "#,
        )
        .bind(&input.title)
        .bind(input.salary)
        .bind(&input.equity)
        .bind(&input.company_handle)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        tracing::info!(id = row.id, title = %row.title, "job created");
        Ok(row.into_job())
    }

    async fn find_all(&self, filter: &JobFilter) -> Result<Vec<JobSummary>> {
        // LEFT JOIN keeps jobs whose company has since disappeared
        let mut sql = String::from(
            "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, \
                    c.name AS company_name \
             FROM jobs j \
             LEFT JOIN companies c ON c.handle = j.company_handle",
        );

        let mut args: Vec<SqlArg> = Vec::new();
        let mut predicates: Vec<String> = Vec::new();

        // Parameter positions are assigned incrementally for the filters
        // actually present, in fixed order: title, then min_salary.
        // has_equity contributes no parameter. SQLite's LIKE is
        // case-insensitive for ASCII.
        if let Some(title) = &filter.title {
            args.push(SqlArg::Text(format!("%{}%", title)));
            predicates.push(format!("j.title LIKE ${}", args.len()));
        }
        if let Some(min_salary) = filter.min_salary {
            args.push(SqlArg::Int(min_salary));
            predicates.push(format!("j.salary >= ${}", args.len()));
        }
        if filter.has_equity {
            predicates.push("CAST(j.equity AS REAL) > 0".to_string());
        }

        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }
        sql.push_str(" ORDER BY j.title");

        // Bind in the same order the placeholder positions were assigned
        let mut query = sqlx::query_as::<_, SummaryRow>(&sql);
        for arg in &args {
            query = match arg {
                SqlArg::Text(s) => query.bind(s.as_str()),
                SqlArg::Int(i) => query.bind(*i),
                SqlArg::Null => query.bind(Option::<String>::None),
            };
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(SummaryRow::into_summary).collect())
    }

    async fn get(&self, id: JobId) -> Result<JobDetail> {
        let job = sqlx::query_as::<_, JobRow>(
            "SELECT id, title, salary, equity, company_handle FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| AppError::NotFound(format!("No job: {}", id)))?;

        // An orphaned company_handle yields company = None, not an error
        let company = sqlx::query_as::<_, CompanyRow>(
            "SELECT handle, name, description, num_employees, logo_url \
             FROM companies WHERE handle = $1",
        )
        .bind(&job.company_handle)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company: company.map(CompanyRow::into_company),
        })
    }

    async fn update(&self, id: JobId, patch: &JobPatch) -> Result<Job> {
        // Only the allow-listed fields exist on JobPatch, and the logical
        // names already match the physical columns, hence the empty map.
        let mut fields: Vec<(&str, SqlArg)> = Vec::new();
        if let Some(title) = &patch.title {
            fields.push(("title", SqlArg::Text(title.clone())));
        }
        match &patch.salary {
            Patch::Value(salary) => fields.push(("salary", SqlArg::Int(*salary))),
            Patch::Null => fields.push(("salary", SqlArg::Null)),
            Patch::Missing => {}
        }
        match &patch.equity {
            Patch::Value(equity) => fields.push(("equity", SqlArg::Text(equity.clone()))),
            Patch::Null => fields.push(("equity", SqlArg::Null)),
            Patch::Missing => {}
        }

        let clause = build_partial_update(&fields, &HashMap::new())?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} \
             RETURNING id, title, salary, equity, company_handle",
            clause.set_clause,
            clause.next_position(),
        );

        // Set-clause values first, then the id at next_position()
        let mut query = sqlx::query_as::<_, JobRow>(&sql);
        for arg in &clause.args {
            query = match arg {
                SqlArg::Text(s) => query.bind(s.as_str()),
                SqlArg::Int(i) => query.bind(*i),
                SqlArg::Null => query.bind(Option::<String>::None),
            };
        }

        let row = query
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| AppError::NotFound(format!("No job: {}", id)))?;

        Ok(row.into_job())
    }

    async fn remove(&self, id: JobId) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No job: {}", id)));
        }

        tracing::info!(id, "job removed");
        Ok(())
    }
}

/// Job row as stored
#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: i64,
    title: String,
    salary: Option<i64>,
    equity: Option<String>,
    company_handle: String,
}

impl JobRow {
    fn into_job(self) -> Job {
        Job {
            id: self.id,
            title: self.title,
            salary: self.salary,
            equity: self.equity,
            company_handle: self.company_handle,
        }
    }
}

/// List row including the joined company name
#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    title: String,
    salary: Option<i64>,
    equity: Option<String>,
    company_handle: String,
    company_name: Option<String>,
}

impl SummaryRow {
    fn into_summary(self) -> JobSummary {
        JobSummary {
            id: self.id,
            title: self.title,
            salary: self.salary,
            equity: self.equity,
            company_handle: self.company_handle,
            company_name: self.company_name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    handle: String,
    name: String,
    description: String,
    num_employees: Option<i64>,
    logo_url: Option<String>,
}

impl CompanyRow {
    fn into_company(self) -> Company {
        Company {
            handle: self.handle,
            name: self.name,
            description: self.description,
            num_employees: self.num_employees,
            logo_url: self.logo_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool_with, run_migrations, StoreConfig};

    async fn setup_test_db() -> SqlitePool {
        // Single connection keeps the in-memory database shared across
        // all statements in the test
        let config = StoreConfig {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..StoreConfig::default()
        };
        let pool = create_pool_with(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();

        sqlx::query(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ('c1', 'C1', 'Desc1', 1, 'http://c1.img'), \
                    ('c2', 'C2', 'Desc2', 2, NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            salary: Some(5000),
            equity: Some("0".to_string()),
            company_handle: "c1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SqliteJobStore::new(setup_test_db().await);

        let created = store.create(&new_job("new job at c1")).await.unwrap();
        assert_eq!(created.title, "new job at c1");
        assert_eq!(created.salary, Some(5000));
        assert_eq!(created.equity.as_deref(), Some("0"));
        assert_eq!(created.company_handle, "c1");

        let detail = store.get(created.id).await.unwrap();
        assert_eq!(detail.title, "new job at c1");
        let company = detail.company.unwrap();
        assert_eq!(company.handle, "c1");
        assert_eq!(company.name, "C1");
        assert_eq!(company.num_employees, Some(1));
    }

    #[tokio::test]
    async fn test_create_duplicate_title() {
        let store = SqliteJobStore::new(setup_test_db().await);

        store.create(&new_job("only one")).await.unwrap();
        let err = store.create(&new_job("only one")).await.unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
        assert!(err.to_string().contains("only one"));
    }

    #[tokio::test]
    async fn test_create_unknown_company() {
        let store = SqliteJobStore::new(setup_test_db().await);

        let mut job = new_job("homeless job");
        job.company_handle = "nope".to_string();
        let err = store.create(&job).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let store = SqliteJobStore::new(setup_test_db().await);
        let err = store.get(-1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_partial_and_explicit_null() {
        let store = SqliteJobStore::new(setup_test_db().await);
        let created = store.create(&new_job("patch me")).await.unwrap();

        // Only the title changes
        let patch = JobPatch {
            title: Some("patched".to_string()),
            ..JobPatch::default()
        };
        let updated = store.update(created.id, &patch).await.unwrap();
        assert_eq!(updated.title, "patched");
        assert_eq!(updated.salary, Some(5000));
        assert_eq!(updated.company_handle, "c1");

        // Explicit nulls clear salary and equity
        let patch = JobPatch {
            salary: Patch::Null,
            equity: Patch::Null,
            ..JobPatch::default()
        };
        let updated = store.update(created.id, &patch).await.unwrap();
        assert_eq!(updated.salary, None);
        assert_eq!(updated.equity, None);

        let detail = store.get(created.id).await.unwrap();
        assert_eq!(detail.salary, None);
        assert_eq!(detail.equity, None);
    }

    #[tokio::test]
    async fn test_update_empty_patch() {
        let store = SqliteJobStore::new(setup_test_db().await);
        let created = store.create(&new_job("untouched")).await.unwrap();

        let err = store
            .update(created.id, &JobPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let store = SqliteJobStore::new(setup_test_db().await);
        let patch = JobPatch {
            title: Some("x".to_string()),
            ..JobPatch::default()
        };
        let err = store.update(-1, &patch).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SqliteJobStore::new(setup_test_db().await);
        let created = store.create(&new_job("short lived")).await.unwrap();

        store.remove(created.id).await.unwrap();
        let err = store.get(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = store.remove(-1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

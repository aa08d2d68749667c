use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use crate::core::AnalysisResult;
use crate::models::{ExpenseCategory, HistoryEntry};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Flat record handed to the history store after an analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: uuid::Uuid,
    pub username: String,
    pub income: f64,
    pub total_expense: f64,
    pub predicted_savings: f64,
    pub expense_burden: Option<f64>,
    pub ratios: BTreeMap<ExpenseCategory, f64>,
}

impl AnalysisRecord {
    pub fn from_result(id: uuid::Uuid, username: &str, result: &AnalysisResult) -> Self {
        Self {
            id,
            username: username.to_string(),
            income: result.income,
            total_expense: result.total_expense,
            predicted_savings: result.predicted_savings,
            expense_burden: result.ratios.as_ref().map(|r| r.expense_burden),
            ratios: result
                .ratios
                .as_ref()
                .map(|r| r.by_category.clone())
                .unwrap_or_default(),
        }
    }
}

/// PostgreSQL client for the per-user analysis history
///
/// The history is a side record of completed analyses; the analysis itself
/// never depends on it succeeding.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL for analysis history");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Store one completed analysis
    pub async fn record_analysis(&self, record: &AnalysisRecord) -> Result<(), PostgresError> {
        if record.username.is_empty() {
            return Err(PostgresError::InvalidInput("username must not be empty".to_string()));
        }

        let query = r#"
            INSERT INTO analysis_history
                (id, username, income, total_expense, predicted_savings, expense_burden, ratios, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
        "#;

        sqlx::query(query)
            .bind(record.id)
            .bind(&record.username)
            .bind(record.income)
            .bind(record.total_expense)
            .bind(record.predicted_savings)
            .bind(record.expense_burden)
            .bind(Json(&record.ratios))
            .execute(&self.pool)
            .await?;

        tracing::debug!("Recorded analysis {} for {}", record.id, record.username);

        Ok(())
    }

    /// Most recent analyses for a user, newest first
    pub async fn get_history(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, PostgresError> {
        let query = r#"
            SELECT id, username, income, total_expense, predicted_savings, expense_burden, ratios, created_at
            FROM analysis_history
            WHERE username = $1
            ORDER BY created_at DESC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(username)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let entries: Vec<HistoryEntry> = rows
            .iter()
            .map(|row| {
                let ratios: Json<BTreeMap<ExpenseCategory, f64>> = row.get("ratios");
                HistoryEntry {
                    id: row.get("id"),
                    username: row.get("username"),
                    income: row.get("income"),
                    total_expense: row.get("total_expense"),
                    predicted_savings: row.get("predicted_savings"),
                    expense_burden: row.get("expense_burden"),
                    ratios: ratios.0,
                    created_at: row.get("created_at"),
                }
            })
            .collect();

        tracing::debug!("User {} has {} stored analyses", username, entries.len());

        Ok(entries)
    }

    /// Delete every stored analysis for a user
    pub async fn clear_history(&self, username: &str) -> Result<u64, PostgresError> {
        let query = r#"
            DELETE FROM analysis_history
            WHERE username = $1
        "#;

        let result = sqlx::query(query).bind(username).execute(&self.pool).await?;

        tracing::info!(
            "Cleared {} stored analyses for user {}",
            result.rows_affected(),
            username
        );

        Ok(result.rows_affected())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Analyzer, LinearRegressionModel, ModelHandle, FEATURE_COUNT};
    use crate::models::ExpenseRecord;
    use std::sync::Arc;

    fn analyze(income: f64) -> AnalysisResult {
        let model = LinearRegressionModel::new("flat", "1", 10.0, [0.0; FEATURE_COUNT]);
        let analyzer = Analyzer::new(Arc::new(ModelHandle::preloaded(Arc::new(model))));
        let expenses = ExpenseRecord::new().with(ExpenseCategory::Rent, 300.0);
        analyzer.analyze(&expenses, income).unwrap()
    }

    #[test]
    fn test_record_from_result() {
        let id = uuid::Uuid::new_v4();
        let record = AnalysisRecord::from_result(id, "asha", &analyze(1000.0));

        assert_eq!(record.id, id);
        assert_eq!(record.predicted_savings, 10.0);
        assert_eq!(record.expense_burden, Some(0.3));
        assert_eq!(record.ratios.get(&ExpenseCategory::Rent), Some(&0.3));
        assert_eq!(record.ratios.len(), 8);
    }

    #[test]
    fn test_record_without_income_has_no_ratios() {
        let record = AnalysisRecord::from_result(uuid::Uuid::new_v4(), "asha", &analyze(0.0));

        assert!(record.ratios.is_empty());
        assert_eq!(record.expense_burden, None);
        assert_eq!(record.total_expense, 300.0);
    }
}

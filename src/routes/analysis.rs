use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{assemble_features, Analyzer};
use crate::models::{
    AnalysisResponse, AnalyzeRequest, ErrorResponse, FeaturesResponse, HealthResponse,
    HistoryQuery, HistoryResponse,
};
use crate::services::{AnalysisRecord, PostgresClient};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    /// `None` when no database is configured
    pub history: Option<Arc<PostgresClient>>,
}

/// Configure all analysis-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/analyze", web::post().to(analyze))
        .route("/features", web::post().to(features))
        .route("/history", web::get().to(get_history))
        .route("/history", web::delete().to(clear_history));
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let history_healthy = match &state.history {
        Some(history) => history.health_check().await.unwrap_or(false),
        None => true,
    };
    let model_loaded = state.analyzer.model().is_loaded();

    let status = if history_healthy && model_loaded { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded,
        history_enabled: state.history.is_some(),
        timestamp: chrono::Utc::now(),
    })
}

/// Analyze a household budget
///
/// POST /api/v1/analyze
///
/// Request body:
/// ```json
/// {
///   "username": "string",
///   "income": 50000,
///   "expenses": { "Rent": 20000, "Groceries": 3000 }
/// }
/// ```
async fn analyze(
    state: web::Data<AppState>,
    req: web::Json<AnalyzeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for analyze request: {:?}", errors);
        return validation_error(errors);
    }

    let result = match state.analyzer.ensure_model_loaded().await {
        Ok(()) => state.analyzer.analyze(&req.expenses, req.income),
        Err(e) => Err(e),
    };
    let result = match result {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Savings prediction failed: {}", e);
            return HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "Prediction failed".to_string(),
                message: e.to_string(),
                status_code: 503,
            });
        }
    };

    let analysis_id = uuid::Uuid::new_v4();

    // History is best-effort: log failures, never fail the analysis
    if let (Some(history), Some(username)) = (&state.history, &req.username) {
        let record = AnalysisRecord::from_result(analysis_id, username, &result);
        if let Err(e) = history.record_analysis(&record).await {
            tracing::warn!("Failed to store analysis {} for {}: {}", analysis_id, username, e);
        }
    }

    tracing::info!(
        "Analysis {}: income {:.2}, expenses {:.2}, predicted savings {:.2}, {} recommendations",
        analysis_id,
        result.income,
        result.total_expense,
        result.predicted_savings,
        result.advisories.len()
    );

    HttpResponse::Ok().json(AnalysisResponse::from_result(analysis_id, result))
}

/// Return the model input for a request without predicting
///
/// POST /api/v1/features
async fn features(req: web::Json<AnalyzeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let vector = assemble_features(&req.expenses, req.income);

    HttpResponse::Ok().json(FeaturesResponse {
        names: vector.names().iter().map(|name| name.to_string()).collect(),
        values: vector.values().to_vec(),
    })
}

fn history_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "History unavailable".to_string(),
        message: "No database is configured for analysis history".to_string(),
        status_code: 503,
    })
}

/// Stored analyses for a user, newest first
///
/// GET /api/v1/history?username={username}&limit={limit}
async fn get_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let history = match &state.history {
        Some(history) => history,
        None => return history_unavailable(),
    };

    // Cap limit at 100 to prevent excessive queries
    let limit = query.limit.min(100) as usize;

    match history.get_history(&query.username, limit).await {
        Ok(entries) => HttpResponse::Ok().json(HistoryResponse {
            username: query.username.clone(),
            count: entries.len(),
            entries,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch history for {}: {}", query.username, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch history".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Delete every stored analysis for a user
///
/// DELETE /api/v1/history?username={username}
async fn clear_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let history = match &state.history {
        Some(history) => history,
        None => return history_unavailable(),
    };

    match history.clear_history(&query.username).await {
        Ok(deleted) => HttpResponse::Ok().json(serde_json::json!({
            "username": query.username,
            "deleted": deleted,
        })),
        Err(e) => {
            tracing::error!("Failed to clear history for {}: {}", query.username, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to clear history".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

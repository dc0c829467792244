// Axum API server module
//
// Purpose: form and JSON endpoints for the three prediction operations,
// plus the page routes the original application served. Prediction
// requests always answer HTTP 200 with a result or a formatted error;
// transport-level faults are reserved for malformed requests.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
    Form, Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::error::PredictError;
use crate::format;
use crate::predict::{
    CropPrediction, CropPredictor, FertilizerPrediction, FertilizerPredictor, YieldPrediction,
    YieldPredictor,
};
use crate::registry::{Domain, ModelRegistry};
use crate::request::{CropForm, FertilizerForm, YieldForm};
use crate::web::handlers::pages;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Build state by loading the registry from a models directory. Never
    /// fails: whatever cannot be loaded is served as absent.
    pub fn new(models_dir: &std::path::Path) -> Self {
        tracing::info!("Initializing model registry...");
        let registry = Arc::new(ModelRegistry::load(models_dir));
        Self {
            registry,
            started_at: chrono::Utc::now(),
        }
    }

    /// State around an already-built registry.
    pub fn with_registry(registry: ModelRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            started_at: chrono::Utc::now(),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages (HTML)
        .route("/", get(pages::home_page))
        .route("/index.html", get(pages::home_page))
        .route("/crop.html", get(pages::crop_page))
        .route("/fertilizer.html", get(pages::fertilizer_page))
        .route("/yield.html", get(pages::yield_page))
        .route("/about.html", get(pages::about_page))
        .route("/contact.html", get(pages::contact_page))
        .route("/dashboard.html", get(pages::dashboard_page))
        .route("/help.html", get(pages::help_page))
        .route("/login.html", get(pages::login_page))
        .route("/profile.html", get(pages::profile_page))
        .route("/register.html", get(pages::register_page))
        // Form endpoints (re-render the form page with the outcome)
        .route("/predict_crop", post(predict_crop_form))
        .route("/predict_fertilizer", post(predict_fertilizer_form))
        .route("/predict_yield", post(predict_yield_form))
        // JSON API
        .route("/health", get(health_check))
        .route("/api/models", get(list_models))
        .route("/api/predict/crop", post(predict_crop_json))
        .route("/api/predict/fertilizer", post(predict_fertilizer_json))
        .route("/api/predict/yield", post(predict_yield_json))
        // Static assets
        .nest_service("/static", ServeDir::new("static"))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Prediction plumbing shared by form and JSON handlers
// ============================================================================

/// One log line per failed prediction, severity per failure kind. Absence
/// and inference faults are operator problems; bad input is routine.
fn log_prediction_error(domain: Domain, err: &PredictError) {
    match err {
        PredictError::Validation(inner) => {
            tracing::debug!("{} request rejected: {}", domain, inner)
        }
        PredictError::Encoding(inner) => tracing::warn!("{} encoding failed: {}", domain, inner),
        PredictError::ModelUnavailable { .. } => {
            tracing::error!("{} prediction requested but model unavailable", domain)
        }
        PredictError::Inference { reason, .. } => {
            tracing::error!("{} inference failed: {}", domain, reason)
        }
    }
}

fn run_crop(state: &AppState, form: &CropForm) -> Result<CropPrediction, PredictError> {
    let outcome = form
        .parse()
        .map_err(PredictError::from)
        .and_then(|request| CropPredictor::new(&state.registry).predict(&request));
    if let Err(err) = &outcome {
        log_prediction_error(Domain::Crop, err);
    }
    outcome
}

fn run_fertilizer(
    state: &AppState,
    form: &FertilizerForm,
) -> Result<FertilizerPrediction, PredictError> {
    let outcome = form
        .parse()
        .map_err(PredictError::from)
        .and_then(|request| FertilizerPredictor::new(&state.registry).predict(&request));
    if let Err(err) = &outcome {
        log_prediction_error(Domain::Fertilizer, err);
    }
    outcome
}

fn run_yield(state: &AppState, form: &YieldForm) -> Result<YieldPrediction, PredictError> {
    let outcome = form
        .parse()
        .map_err(PredictError::from)
        .and_then(|request| YieldPredictor::new(&state.registry).predict(&request));
    if let Err(err) = &outcome {
        log_prediction_error(Domain::Yield, err);
    }
    outcome
}

// ============================================================================
// Form handlers (HTML)
// ============================================================================

async fn predict_crop_form(
    State(state): State<AppState>,
    Form(form): Form<CropForm>,
) -> impl IntoResponse {
    let result = format::page_result(run_crop(&state, &form), |p| p.label);
    pages::render_crop(Some(result))
}

async fn predict_fertilizer_form(
    State(state): State<AppState>,
    Form(form): Form<FertilizerForm>,
) -> impl IntoResponse {
    let result = format::page_result(run_fertilizer(&state, &form), |p| p.label);
    pages::render_fertilizer(Some(result))
}

async fn predict_yield_form(
    State(state): State<AppState>,
    Form(form): Form<YieldForm>,
) -> impl IntoResponse {
    let result = format::page_result(run_yield(&state, &form), |p| format::yield_text(p.value));
    pages::render_yield(Some(result))
}

// ============================================================================
// JSON handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (present, total) = state.registry.presence_counts();
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "models_present": present,
        "models_total": total
    }))
}

async fn list_models(State(state): State<AppState>) -> impl IntoResponse {
    let models: Vec<serde_json::Value> = state
        .registry
        .summary()
        .into_iter()
        .map(|status| {
            serde_json::json!({
                "name": status.name,
                "present": status.present,
                "reason": status.reason
            })
        })
        .collect();
    Json(serde_json::json!({
        "started_at": state.started_at.to_rfc3339(),
        "models": models
    }))
}

fn error_body(err: &PredictError) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "ok": false,
        "error": format::error_text(err),
        "kind": err.kind()
    }))
}

async fn predict_crop_json(
    State(state): State<AppState>,
    Json(form): Json<CropForm>,
) -> impl IntoResponse {
    match run_crop(&state, &form) {
        Ok(prediction) => Json(serde_json::json!({
            "ok": true,
            "prediction": prediction.label
        })),
        Err(err) => error_body(&err),
    }
}

async fn predict_fertilizer_json(
    State(state): State<AppState>,
    Json(form): Json<FertilizerForm>,
) -> impl IntoResponse {
    match run_fertilizer(&state, &form) {
        Ok(prediction) => Json(serde_json::json!({
            "ok": true,
            "prediction": prediction.label
        })),
        Err(err) => error_body(&err),
    }
}

async fn predict_yield_json(
    State(state): State<AppState>,
    Json(form): Json<YieldForm>,
) -> impl IntoResponse {
    match run_yield(&state, &form) {
        Ok(prediction) => Json(serde_json::json!({
            "ok": true,
            "value": prediction.value,
            "source": prediction.source.as_str()
        })),
        Err(err) => error_body(&err),
    }
}

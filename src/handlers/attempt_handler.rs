use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{RevisionQuery, ScoreAttemptRequest},
    services::revision_selector::DEFAULT_REVISION_LIMIT,
};

#[post("/api/quiz/attempts")]
async fn score_attempt(
    state: web::Data<AppState>,
    request: web::Json<ScoreAttemptRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .attempt_service
        .score_attempt(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/materials/{material_id}/revision")]
async fn revision_set(
    state: web::Data<AppState>,
    material_id: web::Path<String>,
    query: web::Query<RevisionQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_REVISION_LIMIT);
    let response = state
        .attempt_service
        .revision_set(&material_id, limit)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError};

#[get("/api/dashboard/overview/{user_id}")]
async fn dashboard_overview(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let report = state.dashboard_service.overview(&user_id).await?;
    Ok(HttpResponse::Ok().json(report))
}

#[get("/api/dashboard/material/{material_id}/{user_id}")]
async fn dashboard_material(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (material_id, user_id) = path.into_inner();
    let response = state
        .dashboard_service
        .material(&material_id, &user_id)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/dashboard/user/{user_id}")]
async fn dashboard_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let report = state.dashboard_service.user(&user_id).await?;
    Ok(HttpResponse::Ok().json(report))
}

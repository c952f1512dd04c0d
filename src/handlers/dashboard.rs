// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentUser,
    // Importamos os models para referenciar no Swagger
    models::dashboard::{DashboardCharts, DashboardStats},
};

// GET /api/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais, vendas, conversão e leads ativos do escopo do usuário", body = DashboardStats),
        (status = 401, description = "Nenhuma sessão ativa")
    )
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.leads()?.get_dashboard_stats();

    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/dashboard/charts
#[utoipa::path(
    get,
    path = "/api/dashboard/charts",
    tag = "Dashboard",
    responses(
        (status = 200, description = "As seis quebras dos gráficos", body = DashboardCharts),
        (status = 401, description = "Nenhuma sessão ativa")
    )
)]
pub async fn get_charts(
    State(app_state): State<AppState>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.leads()?.get_dashboard_stats();
    let charts = app_state.dashboard_service.charts(&stats);

    Ok((StatusCode::OK, Json(charts)))
}

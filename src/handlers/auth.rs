// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentUser,
    models::auth::{LoginPayload, User},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sessão iniciada (gerente se o e-mail contém \"admin\")", body = User),
        (status = 400, description = "E-mail vazio")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;

    let user = app_state.leads()?.login(&payload.email);

    Ok(Json(user))
}

// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 204, description = "Sessão encerrada")
    )
)]
pub async fn logout(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    app_state.leads()?.logout();

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário logado", body = User),
        (status = 401, description = "Nenhuma sessão ativa")
    )
)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

// src/middleware/auth.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{common::error::AppError, config::AppState, models::auth::User};

// Extrator para obter o usuário logado diretamente nos handlers.
// Não é controle de acesso: só garante que existe uma sessão ativa no store.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let user = app_state.leads()?.current_user().cloned();

        user.map(CurrentUser).ok_or(AppError::Unauthenticated)
    }
}

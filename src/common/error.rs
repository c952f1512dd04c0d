// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Nenhum usuário logado no momento
    #[error("Usuário não autenticado")]
    Unauthenticated,

    #[error("Lead não encontrado: {0}")]
    LeadNotFound(Uuid),

    #[error("Status desconhecido: {0}")]
    UnknownStatus(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Faça login para continuar.".to_string()),
            AppError::LeadNotFound(id) => (StatusCode::NOT_FOUND, format!("Lead {} não encontrado.", id)),
            AppError::UnknownStatus(s) => (StatusCode::BAD_REQUEST, format!("Status '{}' não existe.", s)),

            // O `tracing` loga a mensagem detalhada; o cliente recebe só a genérica.
            AppError::InternalServerError(e) => {
                tracing::error!("Erro Interno do Servidor: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

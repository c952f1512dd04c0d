// src/handlers/leads.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentUser,
    models::lead::{Lead, LeadFilter, LeadStatus, LeadUpdate, NewLead},
};

// Parâmetros da listagem. "ALL" (ou vazio) no status significa sem filtro.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListLeadsQuery {
    /// Parte do nome (sem diferenciar maiúsculas) ou do telefone
    pub search: Option<String>,
    /// Rótulo do status ("Novo", "Em Negociação", "Venda", "Perdido") ou "ALL"
    pub status: Option<String>,
}

impl ListLeadsQuery {
    fn into_filter(self) -> Result<LeadFilter, AppError> {
        let status = match self.status.as_deref() {
            None | Some("") | Some("ALL") => None,
            Some(s) => Some(
                s.parse::<LeadStatus>()
                    .map_err(|e| AppError::UnknownStatus(e.0))?,
            ),
        };

        Ok(LeadFilter {
            search: self.search,
            status,
        })
    }
}

// GET /api/leads
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Leads",
    params(ListLeadsQuery),
    responses(
        (status = 200, description = "Leads visíveis, mais recentes primeiro", body = Vec<Lead>),
        (status = 400, description = "Status desconhecido"),
        (status = 401, description = "Nenhuma sessão ativa")
    )
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<ListLeadsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.into_filter()?;

    let leads = app_state.leads()?.list_leads(&filter);

    Ok((StatusCode::OK, Json(leads)))
}

// POST /api/leads
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = NewLead,
    responses(
        (status = 201, description = "Lead cadastrado com status calculado", body = Lead),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Nenhuma sessão ativa")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<NewLead>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state.leads()?.add_lead(payload)?;

    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/leads/{id}
#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    tag = "Leads",
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 200, description = "Lead encontrado", body = Lead),
        (status = 401, description = "Nenhuma sessão ativa"),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state.leads()?.get_lead(id)?.clone();

    Ok((StatusCode::OK, Json(lead)))
}

// PUT /api/leads/{id}
#[utoipa::path(
    put,
    path = "/api/leads/{id}",
    tag = "Leads",
    params(("id" = Uuid, Path, description = "ID do lead")),
    request_body = LeadUpdate,
    responses(
        (status = 200, description = "Lead atualizado com status recalculado", body = Lead),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Nenhuma sessão ativa"),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<LeadUpdate>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state.leads()?.update_lead(id, payload)?;

    Ok((StatusCode::OK, Json(lead)))
}

// DELETE /api/leads/{id}
#[utoipa::path(
    delete,
    path = "/api/leads/{id}",
    tag = "Leads",
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 204, description = "Lead removido"),
        (status = 401, description = "Nenhuma sessão ativa"),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn delete_lead(
    State(app_state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.leads()?.delete_lead(id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_means_no_status_filter() {
        let query = ListLeadsQuery { search: None, status: Some("ALL".into()) };
        assert!(query.into_filter().unwrap().status.is_none());
    }

    #[test]
    fn status_filter_uses_labels() {
        let query = ListLeadsQuery { search: Some("ana".into()), status: Some("Perdido".into()) };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.status, Some(LeadStatus::Lost));
        assert_eq!(filter.search.as_deref(), Some("ana"));

        let bad = ListLeadsQuery { search: None, status: Some("Fechado".into()) };
        assert!(matches!(bad.into_filter(), Err(AppError::UnknownStatus(s)) if s == "Fechado"));
    }
}

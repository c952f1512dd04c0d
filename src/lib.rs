// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use common::error::AppError;
pub use config::{AppState, Config};

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;

/// Monta o router completo da API (usado pelo binário e pelos testes HTTP).
pub fn app(state: AppState) -> Router {
    // Sessão (pública)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::get_me));

    // Leads: o extrator CurrentUser exige alguém logado
    let lead_routes = Router::new()
        .route(
            "/",
            post(handlers::leads::create_lead).get(handlers::leads::list_leads),
        )
        .route(
            "/{id}",
            get(handlers::leads::get_lead)
                .put(handlers::leads::update_lead)
                .delete(handlers::leads::delete_lead),
        );

    let dashboard_routes = Router::new()
        .route("/stats", get(handlers::dashboard::get_stats))
        .route("/charts", get(handlers::dashboard::get_charts));

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/leads", lead_routes)
        .nest("/api/dashboard", dashboard_routes)
        .with_state(state)
}

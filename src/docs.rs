// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Leads ---
        handlers::leads::list_leads,
        handlers::leads::create_lead,
        handlers::leads::get_lead,
        handlers::leads::update_lead,
        handlers::leads::delete_lead,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
        handlers::dashboard::get_charts,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::LoginPayload,

            // --- Leads ---
            models::lead::OpportunitySource,
            models::lead::ModalityInterest,
            models::lead::TimeInterest,
            models::lead::FirstContactResult,
            models::lead::FinalResult,
            models::lead::LeadStatus,
            models::lead::ActionCategory,
            models::lead::Lead,
            models::lead::NewLead,
            models::lead::LeadUpdate,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::ChartEntry,
            models::dashboard::DashboardCharts,
        )
    ),
    tags(
        (name = "Auth", description = "Sessão simulada (consultor ou gerente)"),
        (name = "Leads", description = "Cadastro, edição e funil de leads"),
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais")
    )
)]
pub struct ApiDoc;

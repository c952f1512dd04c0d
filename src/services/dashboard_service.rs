// src/services/dashboard_service.rs

use crate::{
    models::dashboard::{DashboardCharts, DashboardStats},
    services::derivation::{aggregate_by_field, categorize_action},
};

#[derive(Clone, Default)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Monta as seis quebras do painel a partir dos leads visíveis nas estatísticas.
    pub fn charts(&self, stats: &DashboardStats) -> DashboardCharts {
        let leads = &stats.raw_data;

        DashboardCharts {
            // 1. Modalidade de interesse
            modality: aggregate_by_field(leads, |l| l.modality.as_str()),
            // 2. Horário de interesse
            time: aggregate_by_field(leads, |l| l.time.as_str()),
            // 3. Ação (oportunidade agrupada: visita, ligação, ...)
            action: aggregate_by_field(leads, |l| categorize_action(l.source).as_str()),
            // 4. Oportunidade detalhada
            opportunity: aggregate_by_field(leads, |l| l.source.as_str()),
            // 5. Resultado do primeiro contato
            first_contact: aggregate_by_field(leads, |l| l.first_contact_result.as_str()),
            // 6. Resultado final
            final_result: aggregate_by_field(leads, |l| l.final_result.as_str()),
        }
    }
}

// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::lead::Lead;

// 1. Números do topo (os cards)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_leads: usize,
    pub total_sales: usize,
    #[schema(value_type = f64, example = 33.3)]
    pub conversion_rate: Decimal, // Percentual, uma casa decimal
    pub active_leads: usize,
    pub raw_data: Vec<Lead>, // Leads visíveis usados no cálculo
}

// 2. Uma fatia/barra de gráfico
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChartEntry {
    pub name: String,
    pub value: usize,
}

// 3. As seis quebras do painel
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub modality: Vec<ChartEntry>,
    pub time: Vec<ChartEntry>,
    pub action: Vec<ChartEntry>,
    pub opportunity: Vec<ChartEntry>,
    pub first_contact: Vec<ChartEntry>,
    pub final_result: Vec<ChartEntry>,
}

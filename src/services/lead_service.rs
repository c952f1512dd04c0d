// src/services/lead_service.rs

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LeadRepository,
    models::{
        auth::User,
        dashboard::DashboardStats,
        lead::{FinalResult, Lead, LeadFilter, LeadUpdate, NewLead},
    },
    services::derivation::derive_status,
};

/// Estado da aplicação: a lista de leads e o usuário logado.
///
/// É o único lugar que altera qualquer um dos dois. Todas as operações são
/// síncronas; o status de um lead é sempre recalculado a cada escrita.
#[derive(Debug, Default)]
pub struct LeadService {
    repo: LeadRepository,
    current_user: Option<User>,
}

impl LeadService {
    pub fn new(repo: LeadRepository) -> Self {
        Self { repo, current_user: None }
    }

    pub fn with_leads(leads: Vec<Lead>) -> Self {
        Self::new(LeadRepository::with_leads(leads))
    }

    // =========================================================================
    //  1. SESSÃO
    // =========================================================================

    /// Login de demonstração: e-mails contendo "admin" entram como gerente,
    /// qualquer outro como consultor. Não há senha.
    pub fn login(&mut self, email: &str) -> User {
        let user = if email.contains("admin") {
            User::mock_admin()
        } else {
            User::mock_consultant()
        };

        tracing::info!("🔑 Login de {} como {:?}", user.name, user.role);
        self.current_user = Some(user.clone());
        user
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            tracing::info!("👋 Logout de {}", user.name);
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    // =========================================================================
    //  2. LEADS
    // =========================================================================

    pub fn add_lead(&mut self, data: NewLead) -> Result<Lead, AppError> {
        let user = self.current_user.as_ref().ok_or(AppError::Unauthenticated)?;

        let lead = Lead {
            id: Uuid::new_v4(),
            consultant_id: user.id.clone(),
            consultant_name: user.name.clone(),
            date: data.date,
            name: data.name,
            phone: data.phone,
            email: data.email,
            source: data.source,
            modality: data.modality,
            time: data.time,
            first_contact_result: data.first_contact_result,
            final_result: data.final_result,
            next_contact_date: data.next_contact_date,
            comments: data.comments,
            status: derive_status(data.first_contact_result, data.final_result),
        };

        tracing::info!("➕ Lead {} cadastrado por {} ({})", lead.id, lead.consultant_name, lead.status);
        self.repo.insert_front(lead.clone());
        Ok(lead)
    }

    /// Aplica os campos presentes em `updates` e recalcula o status com a mesma
    /// regra do cadastro. Os demais leads não são tocados.
    pub fn update_lead(&mut self, id: Uuid, updates: LeadUpdate) -> Result<Lead, AppError> {
        let Some(lead) = self.repo.find_by_id_mut(id) else {
            tracing::warn!("Tentativa de atualizar lead inexistente {}", id);
            return Err(AppError::LeadNotFound(id));
        };

        updates.apply_to(lead);
        lead.status = derive_status(lead.first_contact_result, lead.final_result);

        tracing::debug!("✏️ Lead {} atualizado ({})", id, lead.status);
        Ok(lead.clone())
    }

    pub fn delete_lead(&mut self, id: Uuid) -> Result<(), AppError> {
        match self.repo.remove(id) {
            Some(_) => {
                tracing::info!("🗑️ Lead {} removido", id);
                Ok(())
            }
            None => {
                tracing::warn!("Tentativa de remover lead inexistente {}", id);
                Err(AppError::LeadNotFound(id))
            }
        }
    }

    pub fn get_lead(&self, id: Uuid) -> Result<&Lead, AppError> {
        self.repo.find_by_id(id).ok_or(AppError::LeadNotFound(id))
    }

    // =========================================================================
    //  3. CONSULTAS
    // =========================================================================

    /// Leads visíveis para o usuário atual: gerente vê todos, consultor vê os
    /// próprios, sem login não vê nada.
    pub fn visible_leads(&self) -> impl Iterator<Item = &Lead> + '_ {
        let user = self.current_user.as_ref();
        self.repo.all().iter().filter(move |lead| match user {
            Some(u) if u.is_admin() => true,
            Some(u) => lead.consultant_id == u.id,
            None => false,
        })
    }

    /// Listagem da tela de leads: escopo do usuário + filtros, mais recentes primeiro.
    pub fn list_leads(&self, filter: &LeadFilter) -> Vec<Lead> {
        let mut leads: Vec<Lead> = self
            .visible_leads()
            .filter(|lead| filter.matches(lead))
            .cloned()
            .collect();

        leads.sort_by(|a, b| b.date.cmp(&a.date));
        leads
    }

    pub fn get_dashboard_stats(&self) -> DashboardStats {
        let raw_data: Vec<Lead> = self.visible_leads().cloned().collect();

        let total_leads = raw_data.len();
        let total_sales = raw_data
            .iter()
            .filter(|l| l.final_result == FinalResult::Vendeu)
            .count();
        let active_leads = raw_data.iter().filter(|l| l.status.is_active()).count();

        DashboardStats {
            total_leads,
            total_sales,
            conversion_rate: conversion_rate(total_sales, total_leads),
            active_leads,
            raw_data,
        }
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }

    pub fn all_leads(&self) -> &[Lead] {
        self.repo.all()
    }
}

/// Percentual de vendas com uma casa decimal; zero quando não há leads.
pub fn conversion_rate(total_sales: usize, total_leads: usize) -> Decimal {
    if total_leads == 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(total_sales) * Decimal::ONE_HUNDRED / Decimal::from(total_leads))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

// src/db/lead_repo.rs

// Armazenamento em memória dos leads. Não existe banco: o repositório é
// dono do Vec e só oferece as operações básicas; as regras ficam no serviço.

use uuid::Uuid;

use crate::models::lead::Lead;

#[derive(Debug, Clone, Default)]
pub struct LeadRepository {
    leads: Vec<Lead>,
}

impl LeadRepository {
    pub fn with_leads(leads: Vec<Lead>) -> Self {
        Self { leads }
    }

    // Novos cadastros entram no início da lista
    pub fn insert_front(&mut self, lead: Lead) {
        self.leads.insert(0, lead);
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: Uuid) -> Option<&mut Lead> {
        self.leads.iter_mut().find(|l| l.id == id)
    }

    /// Remove e devolve o lead, se existir.
    pub fn remove(&mut self, id: Uuid) -> Option<Lead> {
        let pos = self.leads.iter().position(|l| l.id == id)?;
        Some(self.leads.remove(pos))
    }

    pub fn all(&self) -> &[Lead] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}

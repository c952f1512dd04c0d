// src/db/mock_data.rs

// Gerador de leads de demonstração. Com a mesma semente gera sempre os
// mesmos dados, o que permite usá-lo também como fixture nos testes.

use chrono::{NaiveDate, TimeDelta};
use rand::{rngs::StdRng, Rng, SeedableRng};
use uuid::Builder;

use crate::{
    models::lead::{
        FinalResult, FirstContactResult, Lead, ModalityInterest, OpportunitySource, TimeInterest,
    },
    services::derivation::derive_status,
};

pub const MOCK_CONSULTANTS: [(&str, &str); 3] = [
    ("u1", "Carlos Silva"),
    ("u2", "Ana Souza"),
    ("u3", "Roberto Santos"),
];

// Motivos de perda usados para quem não atende ou não tem interesse
const LOSS_REASONS: [FinalResult; 4] = [
    FinalResult::Valor,
    FinalResult::OutraAcademia,
    FinalResult::NaoCompareceu,
    FinalResult::Pesquisa,
];

// Desfechos possíveis de um agendamento que não virou venda
const SCHEDULED_OUTCOMES: [FinalResult; 3] = [
    FinalResult::Pendente,
    FinalResult::NaoCompareceu,
    FinalResult::Adesao,
];

pub struct MockLeadGenerator {
    rng: StdRng,
}

impl MockLeadGenerator {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Gera `count` leads distribuídos entre os consultores, com datas nos
    /// últimos 30 dias a partir de `today`.
    pub fn generate(&mut self, count: usize, today: NaiveDate) -> Vec<Lead> {
        (0..count).map(|i| self.lead(i, today)).collect()
    }

    fn lead(&mut self, index: usize, today: NaiveDate) -> Lead {
        let (consultant_id, consultant_name) = self.pick(&MOCK_CONSULTANTS);
        let source = self.pick(&OpportunitySource::ALL);
        let modality = self.pick(&ModalityInterest::ALL);
        let time = self.pick(&TimeInterest::ALL);
        let first_contact = self.pick(&FirstContactResult::ALL);
        let final_result = self.simulate_outcome(first_contact);

        let days_ago = self.rng.gen_range(0..30);
        let next_contact_date = if self.rng.gen_bool(0.3) { Some(today) } else { None };
        let phone = format!(
            "(11) 9{}-{}",
            self.rng.gen_range(0..10_000),
            self.rng.gen_range(0..10_000)
        );

        Lead {
            id: Builder::from_random_bytes(self.rng.r#gen()).into_uuid(),
            consultant_id: consultant_id.to_string(),
            consultant_name: consultant_name.to_string(),
            date: today - TimeDelta::days(days_ago),
            name: format!("Cliente {}", index + 1),
            phone,
            email: None,
            source,
            modality,
            time,
            first_contact_result: first_contact,
            final_result,
            next_contact_date,
            comments: None,
            status: derive_status(first_contact, final_result),
        }
    }

    // Simula um funil realista a partir do primeiro contato
    fn simulate_outcome(&mut self, first_contact: FirstContactResult) -> FinalResult {
        match first_contact {
            FirstContactResult::Vendeu => FinalResult::Vendeu,
            FirstContactResult::SemInteresse | FirstContactResult::NaoAtende => {
                self.pick(&LOSS_REASONS)
            }
            // Metade dos agendamentos fecha
            FirstContactResult::Agendamento => {
                if self.rng.gen_bool(0.5) {
                    FinalResult::Vendeu
                } else {
                    self.pick(&SCHEDULED_OUTCOMES)
                }
            }
            _ => FinalResult::Pendente,
        }
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }
}

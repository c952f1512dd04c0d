// src/services/derivation.rs

// Regras puras do funil: status do lead, agrupamento dos canais
// e contagem das séries dos gráficos.

use std::collections::HashMap;

use crate::models::{
    dashboard::ChartEntry,
    lead::{ActionCategory, FinalResult, FirstContactResult, Lead, LeadStatus, OpportunitySource},
};

/// Status derivado dos dois resultados.
///
/// 1. Resultado final VENDEU: venda.
/// 2. Qualquer outro resultado final que não seja Pendente: perdido.
/// 3. Pendente com primeiro contato AGENDAMENTO: em negociação.
/// 4. Caso contrário: novo.
pub fn derive_status(first_contact: FirstContactResult, final_result: FinalResult) -> LeadStatus {
    match (first_contact, final_result) {
        (_, FinalResult::Vendeu) => LeadStatus::Won,
        (FirstContactResult::Agendamento, FinalResult::Pendente) => LeadStatus::Negotiation,
        (_, FinalResult::Pendente) => LeadStatus::New,
        (
            _,
            FinalResult::Adesao
            | FinalResult::Cartao
            | FinalResult::Modalidade
            | FinalResult::NaoCompareceu
            | FinalResult::OutraAcademia
            | FinalResult::Pesquisa
            | FinalResult::Valor
            | FinalResult::Outros,
        ) => LeadStatus::Lost,
    }
}

/// Classifica um rótulo de oportunidade pela ação ("AÇÃO" da planilha).
/// Aceita as grafias com e sem acento; o que não casar vira OUTROS.
pub fn categorize_action_label(label: &str) -> ActionCategory {
    if label.starts_with("VISITA") {
        ActionCategory::Visita
    } else if label.starts_with("RECEPTIVO") {
        ActionCategory::Receptivo
    } else if label.starts_with("LIGAÇÃO") || label.starts_with("LIGACAO") {
        ActionCategory::Ligacao
    } else if label.starts_with("MENSAGEM") {
        ActionCategory::Mensagem
    } else if label.starts_with("INDICAÇÃO") || label.starts_with("INDICACAO") {
        ActionCategory::Indicacao
    } else {
        ActionCategory::Outros
    }
}

pub fn categorize_action(source: OpportunitySource) -> ActionCategory {
    categorize_action_label(source.as_str())
}

/// Conta os leads por rótulo. A ordem é decrescente pela contagem; em caso de
/// empate vale a ordem em que o rótulo apareceu primeiro (`sort_by` é estável).
pub fn aggregate_by_field<'a, I, F, K>(leads: I, selector: F) -> Vec<ChartEntry>
where
    I: IntoIterator<Item = &'a Lead>,
    F: Fn(&Lead) -> K,
    K: AsRef<str>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<ChartEntry> = Vec::new();

    for lead in leads {
        let key = selector(lead);
        let label = key.as_ref();

        match positions.get(label) {
            Some(&pos) => entries[pos].value += 1,
            None => {
                positions.insert(label.to_string(), entries.len());
                entries.push(ChartEntry {
                    name: label.to_string(),
                    value: 1,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mock_data::MockLeadGenerator;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
    }

    #[test]
    fn sale_always_wins() {
        for first in FirstContactResult::ALL {
            assert_eq!(derive_status(first, FinalResult::Vendeu), LeadStatus::Won);
        }
    }

    #[test]
    fn any_closed_result_other_than_sale_is_lost() {
        for fin in FinalResult::ALL {
            if fin == FinalResult::Vendeu || fin == FinalResult::Pendente {
                continue;
            }
            for first in FirstContactResult::ALL {
                assert_eq!(derive_status(first, fin), LeadStatus::Lost, "{:?}/{:?}", first, fin);
            }
        }
    }

    #[test]
    fn pending_leads_are_new_unless_scheduled() {
        assert_eq!(
            derive_status(FirstContactResult::Agendamento, FinalResult::Pendente),
            LeadStatus::Negotiation
        );
        for first in FirstContactResult::ALL {
            if first == FirstContactResult::Agendamento {
                continue;
            }
            assert_eq!(derive_status(first, FinalResult::Pendente), LeadStatus::New);
        }
    }

    #[test]
    fn action_categories_follow_label_prefix() {
        assert_eq!(categorize_action_label("VISITA INDICAÇÃO"), ActionCategory::Visita);
        assert_eq!(categorize_action_label("INDICAÇÃO"), ActionCategory::Indicacao);
        assert_eq!(categorize_action_label("INDICACAO AMIGO"), ActionCategory::Indicacao);
        assert_eq!(categorize_action_label("LIGACAO RETORNO"), ActionCategory::Ligacao);
        assert_eq!(categorize_action_label("PANFLETO"), ActionCategory::Outros);
        assert_eq!(categorize_action_label(""), ActionCategory::Outros);

        assert_eq!(categorize_action(OpportunitySource::ReceptivoGoogleSite), ActionCategory::Receptivo);
        assert_eq!(categorize_action(OpportunitySource::LigacaoPosVisita), ActionCategory::Ligacao);
        assert_eq!(categorize_action(OpportunitySource::MensagemRenovacao), ActionCategory::Mensagem);
    }

    #[test]
    fn every_known_source_lands_in_a_named_bucket() {
        for source in OpportunitySource::ALL {
            assert_ne!(categorize_action(source), ActionCategory::Outros, "{}", source.as_str());
        }
    }

    #[test]
    fn aggregation_is_sorted_and_complete() {
        let leads = MockLeadGenerator::new(7).generate(120, today());
        let entries = aggregate_by_field(&leads, |l| l.source.as_str());

        let total: usize = entries.iter().map(|e| e.value).sum();
        assert_eq!(total, leads.len());

        let labels: HashSet<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(labels.len(), entries.len());

        assert!(entries.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn aggregation_ties_keep_first_seen_order() {
        let mut leads = MockLeadGenerator::new(1).generate(4, today());
        leads[0].time = crate::models::lead::TimeInterest::Noite;
        leads[1].time = crate::models::lead::TimeInterest::Manha;
        leads[2].time = crate::models::lead::TimeInterest::Manha;
        leads[3].time = crate::models::lead::TimeInterest::Noite;

        let entries = aggregate_by_field(&leads, |l| l.time.as_str());
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Noite", "Manhã"]);
    }

    #[test]
    fn aggregation_of_nothing_is_empty() {
        let leads: Vec<Lead> = Vec::new();
        assert!(aggregate_by_field(&leads, |l| l.modality.as_str()).is_empty());
    }
}

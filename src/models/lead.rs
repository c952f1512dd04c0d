// src/models/lead.rs

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::common::forms::{clearable, empty_string_as_none};

// --- ENUMS ---
// Os valores serializados são exatamente os rótulos da planilha de vendas.

/// Coluna "OPORTUNIDADE": de onde veio o contato.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OpportunitySource {
    // Visitas
    #[serde(rename = "VISITA MORA PRÓXIMO")]
    VisitaMoraProximo,
    #[serde(rename = "VISITA TRABALHA PRÓXIMO")]
    VisitaTrabalhaProximo,
    #[serde(rename = "VISITA PASSAGEM")]
    VisitaPassagem,
    #[serde(rename = "VISITA INDICAÇÃO")]
    VisitaIndicacao,
    #[serde(rename = "VISITA REMATRÍCULA")]
    VisitaRematricula,

    // Receptivo
    #[serde(rename = "RECEPTIVO FONE")]
    ReceptivoFone,
    #[serde(rename = "RECEPTIVO WHATSAPP")]
    ReceptivoWhatsapp,
    #[serde(rename = "RECEPTIVO REDES SOCIAIS")]
    ReceptivoRedesSociais,
    #[serde(rename = "RECEPTIVO EMAIL")]
    ReceptivoEmail,
    #[serde(rename = "RECEPTIVO GOOGLE ou SITE")]
    ReceptivoGoogleSite,

    // Ligações (ativas)
    #[serde(rename = "LIGAÇÃO AUSENTE")]
    LigacaoAusente,
    #[serde(rename = "LIGAÇÃO INATIVO")]
    LigacaoInativo,
    #[serde(rename = "LIGAÇÃO OPORTUNIDADE")]
    LigacaoOportunidade,
    #[serde(rename = "LIGAÇÃO PÓS-VISITA")]
    LigacaoPosVisita,
    #[serde(rename = "LIGAÇÃO RENOVAÇÃO")]
    LigacaoRenovacao,

    // Mensagens (ativas)
    #[serde(rename = "MENSAGEM AUSENTE")]
    MensagemAusente,
    #[serde(rename = "MENSAGEM INATIVO")]
    MensagemInativo,
    #[serde(rename = "MENSAGEM OPORTUNIDADE")]
    MensagemOportunidade,
    #[serde(rename = "MENSAGEM PÓS-VISITA")]
    MensagemPosVisita,
    #[serde(rename = "MENSAGEM RENOVAÇÃO")]
    MensagemRenovacao,

    // Outros
    #[serde(rename = "INDICAÇÃO")]
    Indicacao,
}

impl OpportunitySource {
    pub const ALL: [OpportunitySource; 21] = [
        Self::VisitaMoraProximo,
        Self::VisitaTrabalhaProximo,
        Self::VisitaPassagem,
        Self::VisitaIndicacao,
        Self::VisitaRematricula,
        Self::ReceptivoFone,
        Self::ReceptivoWhatsapp,
        Self::ReceptivoRedesSociais,
        Self::ReceptivoEmail,
        Self::ReceptivoGoogleSite,
        Self::LigacaoAusente,
        Self::LigacaoInativo,
        Self::LigacaoOportunidade,
        Self::LigacaoPosVisita,
        Self::LigacaoRenovacao,
        Self::MensagemAusente,
        Self::MensagemInativo,
        Self::MensagemOportunidade,
        Self::MensagemPosVisita,
        Self::MensagemRenovacao,
        Self::Indicacao,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VisitaMoraProximo => "VISITA MORA PRÓXIMO",
            Self::VisitaTrabalhaProximo => "VISITA TRABALHA PRÓXIMO",
            Self::VisitaPassagem => "VISITA PASSAGEM",
            Self::VisitaIndicacao => "VISITA INDICAÇÃO",
            Self::VisitaRematricula => "VISITA REMATRÍCULA",
            Self::ReceptivoFone => "RECEPTIVO FONE",
            Self::ReceptivoWhatsapp => "RECEPTIVO WHATSAPP",
            Self::ReceptivoRedesSociais => "RECEPTIVO REDES SOCIAIS",
            Self::ReceptivoEmail => "RECEPTIVO EMAIL",
            Self::ReceptivoGoogleSite => "RECEPTIVO GOOGLE ou SITE",
            Self::LigacaoAusente => "LIGAÇÃO AUSENTE",
            Self::LigacaoInativo => "LIGAÇÃO INATIVO",
            Self::LigacaoOportunidade => "LIGAÇÃO OPORTUNIDADE",
            Self::LigacaoPosVisita => "LIGAÇÃO PÓS-VISITA",
            Self::LigacaoRenovacao => "LIGAÇÃO RENOVAÇÃO",
            Self::MensagemAusente => "MENSAGEM AUSENTE",
            Self::MensagemInativo => "MENSAGEM INATIVO",
            Self::MensagemOportunidade => "MENSAGEM OPORTUNIDADE",
            Self::MensagemPosVisita => "MENSAGEM PÓS-VISITA",
            Self::MensagemRenovacao => "MENSAGEM RENOVAÇÃO",
            Self::Indicacao => "INDICAÇÃO",
        }
    }
}

/// Modalidade de interesse. A planilha só traz as duas primeiras; as demais
/// existem para flexibilidade da academia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ModalityInterest {
    #[serde(rename = "Musculação")]
    Musculacao,
    #[serde(rename = "Aulas Coletivas")]
    AulasColetivas,
    #[serde(rename = "Cross Training")]
    CrossTraining,
    #[serde(rename = "Lutas")]
    Lutas,
    #[serde(rename = "Natação")]
    Natacao,
}

impl ModalityInterest {
    pub const ALL: [ModalityInterest; 5] = [
        Self::Musculacao,
        Self::AulasColetivas,
        Self::CrossTraining,
        Self::Lutas,
        Self::Natacao,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Musculacao => "Musculação",
            Self::AulasColetivas => "Aulas Coletivas",
            Self::CrossTraining => "Cross Training",
            Self::Lutas => "Lutas",
            Self::Natacao => "Natação",
        }
    }
}

/// Horário de interesse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TimeInterest {
    #[serde(rename = "Manhã")]
    Manha,
    #[serde(rename = "Tarde")]
    Tarde,
    #[serde(rename = "Noite")]
    Noite,
}

impl TimeInterest {
    pub const ALL: [TimeInterest; 3] = [Self::Manha, Self::Tarde, Self::Noite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manha => "Manhã",
            Self::Tarde => "Tarde",
            Self::Noite => "Noite",
        }
    }
}

/// Coluna "RESULTADO PRIMEIRO CONTATO".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FirstContactResult {
    #[serde(rename = "AGENDAMENTO")]
    Agendamento,
    #[serde(rename = "CADASTRO")]
    Cadastro,
    #[serde(rename = "NÃO ATENDE")]
    NaoAtende,
    #[serde(rename = "NOVO CONTATO")]
    NovoContato,
    #[serde(rename = "SEM INTERESSE")]
    SemInteresse,
    #[serde(rename = "VENDEU")]
    Vendeu,
    #[serde(rename = "OUTROS")]
    Outros,
}

impl FirstContactResult {
    pub const ALL: [FirstContactResult; 7] = [
        Self::Agendamento,
        Self::Cadastro,
        Self::NaoAtende,
        Self::NovoContato,
        Self::SemInteresse,
        Self::Vendeu,
        Self::Outros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agendamento => "AGENDAMENTO",
            Self::Cadastro => "CADASTRO",
            Self::NaoAtende => "NÃO ATENDE",
            Self::NovoContato => "NOVO CONTATO",
            Self::SemInteresse => "SEM INTERESSE",
            Self::Vendeu => "VENDEU",
            Self::Outros => "OUTROS",
        }
    }
}

/// Coluna "RESULTADO FINAL". `Pendente` é o estado interno dos leads em aberto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum FinalResult {
    #[default]
    #[serde(rename = "Pendente")]
    Pendente,
    /// Não se inscreveu pois não concorda com a adesão.
    #[serde(rename = "ADESÃO")]
    Adesao,
    /// Não possui cartão ou limite.
    #[serde(rename = "CARTÃO")]
    Cartao,
    /// A academia não oferece a modalidade.
    #[serde(rename = "MODALIDADE")]
    Modalidade,
    /// Não compareceu à aula experimental.
    #[serde(rename = "NÃO COMPARECEU")]
    NaoCompareceu,
    /// Está treinando em outra academia.
    #[serde(rename = "OUTRA ACADEMIA")]
    OutraAcademia,
    /// Vai visitar outras academias.
    #[serde(rename = "PESQUISA")]
    Pesquisa,
    /// Achou caro.
    #[serde(rename = "VALOR")]
    Valor,
    /// Efetuou a inscrição.
    #[serde(rename = "VENDEU")]
    Vendeu,
    /// Detalhes na coluna de comentários.
    #[serde(rename = "OUTROS")]
    Outros,
}

impl FinalResult {
    pub const ALL: [FinalResult; 10] = [
        Self::Pendente,
        Self::Adesao,
        Self::Cartao,
        Self::Modalidade,
        Self::NaoCompareceu,
        Self::OutraAcademia,
        Self::Pesquisa,
        Self::Valor,
        Self::Vendeu,
        Self::Outros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "Pendente",
            Self::Adesao => "ADESÃO",
            Self::Cartao => "CARTÃO",
            Self::Modalidade => "MODALIDADE",
            Self::NaoCompareceu => "NÃO COMPARECEU",
            Self::OutraAcademia => "OUTRA ACADEMIA",
            Self::Pesquisa => "PESQUISA",
            Self::Valor => "VALOR",
            Self::Vendeu => "VENDEU",
            Self::Outros => "OUTROS",
        }
    }
}

/// Etapa do funil. Sempre derivada dos dois campos de resultado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum LeadStatus {
    #[serde(rename = "Novo")]
    New,
    #[serde(rename = "Em Negociação")]
    Negotiation,
    #[serde(rename = "Venda")]
    Won,
    #[serde(rename = "Perdido")]
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [Self::New, Self::Negotiation, Self::Won, Self::Lost];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "Novo",
            Self::Negotiation => "Em Negociação",
            Self::Won => "Venda",
            Self::Lost => "Perdido",
        }
    }

    /// Novo e Em Negociação ainda contam como leads ativos.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::New | Self::Negotiation)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status desconhecido: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for LeadStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Agrupamento "AÇÃO" usado no gráfico de canais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ActionCategory {
    #[serde(rename = "VISITA")]
    Visita,
    #[serde(rename = "RECEPTIVO")]
    Receptivo,
    #[serde(rename = "LIGAÇÃO")]
    Ligacao,
    #[serde(rename = "MENSAGEM")]
    Mensagem,
    #[serde(rename = "INDICAÇÃO")]
    Indicacao,
    #[serde(rename = "OUTROS")]
    Outros,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visita => "VISITA",
            Self::Receptivo => "RECEPTIVO",
            Self::Ligacao => "LIGAÇÃO",
            Self::Mensagem => "MENSAGEM",
            Self::Indicacao => "INDICAÇÃO",
            Self::Outros => "OUTROS",
        }
    }
}

// --- LEAD (O Registro) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,

    // Dono do lead (o consultor que cadastrou)
    pub consultant_id: String,
    pub consultant_name: String,

    pub date: NaiveDate,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,

    pub source: OpportunitySource,
    pub modality: ModalityInterest,
    pub time: TimeInterest,

    pub first_contact_result: FirstContactResult,
    pub final_result: FinalResult,

    pub next_contact_date: Option<NaiveDate>,
    pub comments: Option<String>,

    // Campo derivado: nunca é definido diretamente
    pub status: LeadStatus,
}

impl Lead {
    /// Retorno agendado vencido (ou para hoje) de um lead que ainda está aberto.
    pub fn is_follow_up_due(&self, today: NaiveDate) -> bool {
        match self.next_contact_date {
            Some(next) => next <= today && self.status.is_active(),
            None => false,
        }
    }
}

// --- PAYLOADS ---

/// Dados do formulário de cadastro. Identidade, dono e status são definidos pelo store.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub date: NaiveDate,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ana Silva")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "(11) 99999-9999")]
    pub phone: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    pub source: OpportunitySource,
    pub modality: ModalityInterest,
    pub time: TimeInterest,

    pub first_contact_result: FirstContactResult,
    #[serde(default)]
    pub final_result: FinalResult,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub next_contact_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub comments: Option<String>,
}

/// Atualização parcial. Campos ausentes não mudam; nos opcionais,
/// `Some(None)` (string vazia ou null) limpa o valor.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadUpdate {
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "clearable")]
    #[schema(value_type = Option<String>, example = "cliente@email.com")]
    pub email: Option<Option<String>>,

    pub source: Option<OpportunitySource>,
    pub modality: Option<ModalityInterest>,
    pub time: Option<TimeInterest>,

    pub first_contact_result: Option<FirstContactResult>,
    pub final_result: Option<FinalResult>,

    #[serde(default, deserialize_with = "clearable")]
    #[schema(value_type = Option<String>, format = Date)]
    pub next_contact_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "clearable")]
    #[schema(value_type = Option<String>)]
    pub comments: Option<Option<String>>,
}

impl LeadUpdate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.as_deref().is_some_and(|n| n.is_empty()) {
            errors.add("name", field_error("length", "required"));
        }
        if self.phone.as_deref().is_some_and(|p| p.is_empty()) {
            errors.add("phone", field_error("length", "required"));
        }
        if let Some(Some(email)) = &self.email {
            if !email.validate_email() {
                errors.add("email", field_error("email", "invalid_email"));
            }
        }

        if errors.errors().is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Copia os campos presentes para o lead. O status é recalculado pelo store.
    pub fn apply_to(self, lead: &mut Lead) {
        if let Some(date) = self.date {
            lead.date = date;
        }
        if let Some(name) = self.name {
            lead.name = name;
        }
        if let Some(phone) = self.phone {
            lead.phone = phone;
        }
        if let Some(email) = self.email {
            lead.email = email;
        }
        if let Some(source) = self.source {
            lead.source = source;
        }
        if let Some(modality) = self.modality {
            lead.modality = modality;
        }
        if let Some(time) = self.time {
            lead.time = time;
        }
        if let Some(first) = self.first_contact_result {
            lead.first_contact_result = first;
        }
        if let Some(fin) = self.final_result {
            lead.final_result = fin;
        }
        if let Some(next) = self.next_contact_date {
            lead.next_contact_date = next;
        }
        if let Some(comments) = self.comments {
            lead.comments = comments;
        }
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Filtros da listagem (busca por nome/telefone e status).
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        let matches_search = match self.search.as_deref() {
            Some(term) if !term.is_empty() => {
                lead.name.to_lowercase().contains(&term.to_lowercase()) || lead.phone.contains(term)
            }
            _ => true,
        };
        let matches_status = self.status.is_none_or(|status| lead.status == status);

        matches_search && matches_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enums_use_spreadsheet_labels_on_the_wire() {
        for source in OpportunitySource::ALL {
            let encoded = serde_json::to_value(source).unwrap();
            assert_eq!(encoded, json!(source.as_str()));
        }
        assert_eq!(serde_json::to_value(LeadStatus::Negotiation).unwrap(), json!("Em Negociação"));
        assert_eq!(serde_json::to_value(FinalResult::Pendente).unwrap(), json!("Pendente"));
    }

    #[test]
    fn status_parses_from_label() {
        assert_eq!("Venda".parse::<LeadStatus>(), Ok(LeadStatus::Won));
        assert!("ALL".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn new_lead_form_normalizes_empty_optionals() {
        let payload: NewLead = serde_json::from_value(json!({
            "date": "2025-03-10",
            "name": "Ana Silva",
            "phone": "(11) 99999-9999",
            "email": "",
            "source": "RECEPTIVO WHATSAPP",
            "modality": "Musculação",
            "time": "Noite",
            "firstContactResult": "AGENDAMENTO",
            "nextContactDate": "",
            "comments": ""
        }))
        .unwrap();

        assert_eq!(payload.email, None);
        assert_eq!(payload.next_contact_date, None);
        assert_eq!(payload.comments, None);
        assert_eq!(payload.final_result, FinalResult::Pendente);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn new_lead_requires_name_and_phone() {
        let payload: NewLead = serde_json::from_value(json!({
            "date": "2025-03-10",
            "name": "",
            "phone": "",
            "email": "not-an-email",
            "source": "INDICAÇÃO",
            "modality": "Lutas",
            "time": "Manhã",
            "firstContactResult": "CADASTRO"
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn update_distinguishes_missing_from_cleared() {
        let update: LeadUpdate = serde_json::from_value(json!({
            "email": "",
            "comments": "ligar depois das 18h"
        }))
        .unwrap();

        assert_eq!(update.email, Some(None));
        assert_eq!(update.comments, Some(Some("ligar depois das 18h".to_string())));
        assert_eq!(update.next_contact_date, None);
        assert!(update.validate().is_ok());
    }

    #[test]
    fn update_rejects_blank_name() {
        let update = LeadUpdate {
            name: Some(String::new()),
            email: Some(Some("sem-arroba".to_string())),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
    }
}

// src/config.rs

use std::{
    env,
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::Context;
use chrono::Local;

use crate::{
    common::error::AppError,
    db::MockLeadGenerator,
    services::{DashboardService, LeadService},
};

// Configurações lidas do ambiente (.env é opcional)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub seed_mock_leads: bool,
    pub mock_lead_count: usize,
    pub mock_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            seed_mock_leads: true,
            mock_lead_count: 120,
            mock_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte chave/valor.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = lookup("BIND_ADDR").unwrap_or(defaults.bind_addr);

        let seed_mock_leads = match lookup("SEED_MOCK_LEADS") {
            Some(v) => v
                .parse::<bool>()
                .with_context(|| format!("SEED_MOCK_LEADS inválido: {v}"))?,
            None => defaults.seed_mock_leads,
        };

        let mock_lead_count = match lookup("MOCK_LEAD_COUNT") {
            Some(v) => v
                .parse::<usize>()
                .with_context(|| format!("MOCK_LEAD_COUNT inválido: {v}"))?,
            None => defaults.mock_lead_count,
        };

        let mock_seed = lookup("MOCK_SEED")
            .map(|v| v.parse::<u64>().with_context(|| format!("MOCK_SEED inválido: {v}")))
            .transpose()?;

        Ok(Self {
            bind_addr,
            seed_mock_leads,
            mock_lead_count,
            mock_seed,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação.
// Um único store, protegido por um Mutex que nunca fica preso num `.await`.
#[derive(Clone)]
pub struct AppState {
    pub lead_service: Arc<Mutex<LeadService>>,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let lead_service = if config.seed_mock_leads {
            let mut generator = match config.mock_seed {
                Some(seed) => MockLeadGenerator::new(seed),
                None => MockLeadGenerator::from_entropy(),
            };
            let today = Local::now().date_naive();
            let leads = generator.generate(config.mock_lead_count, today);
            tracing::info!("✅ {} leads de demonstração carregados", leads.len());
            LeadService::with_leads(leads)
        } else {
            LeadService::default()
        };

        Self::from_service(lead_service)
    }

    pub fn from_service(lead_service: LeadService) -> Self {
        Self {
            lead_service: Arc::new(Mutex::new(lead_service)),
            dashboard_service: DashboardService::new(),
        }
    }

    /// Trava o store para uma operação.
    pub fn leads(&self) -> Result<MutexGuard<'_, LeadService>, AppError> {
        self.lead_service
            .lock()
            .map_err(|_| AppError::InternalServerError(anyhow::anyhow!("store de leads envenenado")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("SEED_MOCK_LEADS", "false"),
            ("MOCK_LEAD_COUNT", "10"),
            ("MOCK_SEED", "99"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert!(!config.seed_mock_leads);
        assert_eq!(config.mock_lead_count, 10);
        assert_eq!(config.mock_seed, Some(99));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Config::from_lookup(lookup(&[("MOCK_LEAD_COUNT", "muitos")])).is_err());
        assert!(Config::from_lookup(lookup(&[("SEED_MOCK_LEADS", "talvez")])).is_err());
    }

    #[test]
    fn seeds_the_store_from_config() {
        let config = Config {
            mock_lead_count: 15,
            mock_seed: Some(5),
            ..Config::default()
        };
        let state = AppState::new(&config);
        assert_eq!(state.leads().unwrap().len(), 15);

        let empty = AppState::new(&Config { seed_mock_leads: false, ..Config::default() });
        assert!(empty.leads().unwrap().is_empty());
    }
}

//! Command-line and environment configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, ValueEnum};
use naios_ai::{AiConfig, OpenAiClient};
use naios_server::EnvReport;
use naios_store::{MemoryStore, ProducerStore, RestConfig, RestStore};

#[derive(Args, Debug, Clone)]
pub struct AiArgs {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,
    /// Base URL of the chat completions API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = AiConfig::DEFAULT_BASE_URL)]
    pub openai_base_url: String,
    #[arg(long, env = "OPENAI_MODEL", default_value = AiConfig::DEFAULT_MODEL)]
    pub openai_model: String,
    #[arg(long, env = "OPENAI_TEMPERATURE", default_value_t = AiConfig::DEFAULT_TEMPERATURE)]
    pub openai_temperature: f32,
    /// Request timeout in seconds
    #[arg(long, env = "OPENAI_TIMEOUT_SECS", default_value_t = AiConfig::DEFAULT_TIMEOUT.as_secs())]
    pub openai_timeout_secs: u64,
}

impl AiArgs {
    pub fn config(&self) -> anyhow::Result<AiConfig> {
        let api_key = self
            .openai_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .context("OPENAI_API_KEY is not set")?;
        Ok(AiConfig {
            base_url: self.openai_base_url.clone(),
            api_key,
            model: self.openai_model.clone(),
            temperature: self.openai_temperature,
            timeout: Duration::from_secs(self.openai_timeout_secs),
        })
    }

    pub fn build(&self) -> anyhow::Result<OpenAiClient> {
        OpenAiClient::new(self.config()?).context("building OpenAI client")
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Hosted PostgREST database
    Rest,
    /// In-process tables, lost on exit
    Memory,
}

impl Backend {
    fn name(self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Memory => "memory",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    #[arg(long = "store", env = "NAIOS_STORE", value_enum, default_value_t = Backend::Rest)]
    pub backend: Backend,
    /// Project URL of the hosted database
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    pub supabase_service_role_key: Option<String>,
}

impl StoreArgs {
    pub fn rest_config(&self) -> anyhow::Result<RestConfig> {
        let url = self
            .supabase_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .context("SUPABASE_URL is not set")?;
        let api_key = self
            .supabase_service_role_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .context("SUPABASE_SERVICE_ROLE_KEY is not set")?;
        Ok(RestConfig { url, api_key })
    }

    pub fn build(&self) -> anyhow::Result<Arc<dyn ProducerStore>> {
        match self.backend {
            Backend::Rest => {
                let config = self.rest_config()?;
                tracing::info!(url = %config.url, "using hosted database");
                Ok(Arc::new(RestStore::new(config)))
            }
            Backend::Memory => {
                tracing::warn!("using in-memory store; data is lost on exit");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}

/// Configuration summary served by `/api/_env-check`.
pub fn env_report(bind: &str, ai: &AiArgs, store: &StoreArgs) -> EnvReport {
    EnvReport::default()
        .secret("OPENAI_API_KEY", is_set(&ai.openai_api_key))
        .value("OPENAI_BASE_URL", Some(&ai.openai_base_url))
        .value("OPENAI_MODEL", Some(&ai.openai_model))
        .value("NAIOS_STORE", Some(store.backend.name()))
        .value("SUPABASE_URL", store.supabase_url.as_deref())
        .secret(
            "SUPABASE_SERVICE_ROLE_KEY",
            is_set(&store.supabase_service_role_key),
        )
        .value("NAIOS_BIND", Some(bind))
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

use std::collections::BTreeMap;
use std::sync::Arc;

use naios_ai::ChatModel;
use naios_store::ProducerStore;
use serde::Serialize;
use serde_json::Value;

/// Collaborators shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProducerStore>,
    pub model: Arc<dyn ChatModel>,
    pub env: Arc<EnvReport>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProducerStore>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            store,
            model,
            env: Arc::new(EnvReport::default()),
        }
    }

    pub fn with_env(mut self, env: EnvReport) -> Self {
        self.env = Arc::new(env);
        self
    }
}

/// Which configuration values the process started with. Secrets are only
/// reported as loaded or missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnvReport(BTreeMap<String, Value>);

impl EnvReport {
    pub fn value(mut self, name: &str, value: Option<&str>) -> Self {
        let value = value.map_or(Value::Null, |v| Value::String(v.to_string()));
        self.0.insert(name.to_string(), value);
        self
    }

    pub fn secret(mut self, name: &str, present: bool) -> Self {
        let status = if present { "loaded" } else { "missing" };
        self.0.insert(name.to_string(), Value::String(status.to_string()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

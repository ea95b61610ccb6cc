use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::config::SelectorConfig;
use crate::rules::RuleSet;
use crate::selector::TransitionSelector;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// One running slideshow. Each session has its own history and RNG, so two
/// displays driven by the same sidecar never influence each other.
pub struct Session {
    pub opened_at: DateTime<Utc>,
    pub last_selected_at: Option<DateTime<Utc>>,
    pub selections: u64,
    pub selector: TransitionSelector,
    pub rng: StdRng,
}

pub struct AppState {
    pub config: SelectorConfig,
    pub rules: RuleSet,
    pub sessions: HashMap<String, Session>,
}

impl AppState {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            rules: RuleSet::standard(),
            sessions: HashMap::new(),
        }
    }
}

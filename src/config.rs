use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::slide::TransitionMode;
use anyhow::Context;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SMARTPANELD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorConfig {
    pub history_capacity: usize,
    pub min_variety: usize,
    pub record_manual: bool,
    pub safe_fallback_weight: u32,
    pub default_transition_mode: TransitionMode,
    pub default_transition_duration_ms: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            min_variety: 3,
            record_manual: false,
            safe_fallback_weight: 10,
            default_transition_mode: TransitionMode::Auto,
            default_transition_duration_ms: 1000,
        }
    }
}

fn parse_bool(v: &Value, key: &str) -> Result<bool, String> {
    v.as_bool().ok_or_else(|| format!("{} must be boolean", key))
}

fn parse_u64_range(v: &Value, key: &str, min: u64, max: u64) -> Result<u64, String> {
    let n = v
        .as_u64()
        .ok_or_else(|| format!("{} must be a non-negative integer", key))?;
    if !(min..=max).contains(&n) {
        return Err(format!("{} must be in {}..={}", key, min, max));
    }
    Ok(n)
}

impl SelectorConfig {
    /// Applies a camelCase patch. Fields are validated one at a time, so an
    /// error leaves earlier fields of the same patch applied; callers patch a
    /// copy.
    pub fn merge_patch(&mut self, patch: &Map<String, Value>) -> Result<(), String> {
        for (k, v) in patch {
            match k.as_str() {
                "historyCapacity" => {
                    self.history_capacity = parse_u64_range(v, k, 1, 32)? as usize;
                }
                "minVariety" => {
                    self.min_variety = parse_u64_range(v, k, 0, 19)? as usize;
                }
                "recordManual" => {
                    self.record_manual = parse_bool(v, k)?;
                }
                "safeFallbackWeight" => {
                    self.safe_fallback_weight = parse_u64_range(v, k, 1, 1000)? as u32;
                }
                "defaultTransitionMode" => {
                    let s = v.as_str().ok_or_else(|| format!("{} must be string", k))?;
                    self.default_transition_mode = TransitionMode::parse(s)
                        .ok_or_else(|| format!("{} must be manual, random or auto", k))?;
                }
                "defaultTransitionDurationMs" => {
                    self.default_transition_duration_ms = parse_u64_range(v, k, 100, 10_000)?;
                }
                _ => return Err(format!("unknown config field: {}", k)),
            }
        }
        Ok(())
    }

    /// Patched copy; `self` is untouched on error.
    pub fn patched(&self, patch: &Map<String, Value>) -> Result<Self, String> {
        let mut next = self.clone();
        next.merge_patch(patch)?;
        Ok(next)
    }

    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let raw: Value = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        let Some(obj) = raw.as_object() else {
            anyhow::bail!("config {} must be a JSON object", path.display());
        };
        Self::default()
            .patched(obj)
            .map_err(|msg| anyhow::anyhow!("config {}: {}", path.display(), msg))
    }

    /// Defaults, overlaid with the file named by `SMARTPANELD_CONFIG` when
    /// set. A bad file must not keep the sidecar from starting.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) else {
            return Self::default();
        };
        match Self::load_file(&path) {
            Ok(cfg) => {
                tracing::info!(path = %path.display(), "loaded selector config");
                cfg
            }
            Err(e) => {
                let reason = format!("{e:#}");
                tracing::warn!(error = %reason, "ignoring selector config file");
                Self::default()
            }
        }
    }
}

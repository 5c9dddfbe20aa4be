//! Optional application configuration from TOML.
//!
//! `CONFIG_PATH` points at a TOML file; everything in it is optional and
//! defaults keep the app runnable with no config at all. On any IO or
//! parse error we log and fall back to defaults rather than aborting.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Directory of per-topic bank JSON files. When unset (or empty after
  /// loading), the built-in seed banks are used.
  pub bank_dir: Option<String>,
  pub quiz: QuizSettings,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self { bank_dir: None, quiz: QuizSettings::default() }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
  /// Questions sampled per quiz run (capped by the filtered pool size).
  pub questions_per_quiz: usize,
}

impl Default for QuizSettings {
  fn default() -> Self {
    Self { questions_per_quiz: 10 }
  }
}

/// Attempt to load `AppConfig` from CONFIG_PATH. On any error, returns defaults.
pub fn load_config_from_env() -> AppConfig {
  let Some(path) = std::env::var("CONFIG_PATH").ok() else {
    return AppConfig::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "taito_backend", %path, "Loaded app config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "taito_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
        AppConfig::default()
      }
    },
    Err(e) => {
      error!(target: "taito_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
      AppConfig::default()
    }
  }
}

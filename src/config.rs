//! Service configuration (TOML) and loading of the quiz document (JSON).
//!
//! See `QuizConfig` for the expected TOML schema; every field has a default.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::QuizData;
use crate::error::LoadError;
use crate::quiz::Quiz;
use crate::seeds::sample_quiz;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct QuizConfig {
  /// MCQs in this section are auto-scored; MCQs elsewhere are not.
  #[serde(default = "default_auto_graded_section")]
  pub auto_graded_section: String,
  /// JSON quiz document. The built-in sample quiz is used when unset.
  #[serde(default)]
  pub quiz_data_path: Option<String>,
  #[serde(default = "default_static_dir")]
  pub static_dir: String,
}

fn default_auto_graded_section() -> String { "section-a".into() }
fn default_static_dir() -> String { "./static".into() }

impl Default for QuizConfig {
  fn default() -> Self {
    Self {
      auto_graded_section: default_auto_graded_section(),
      quiz_data_path: None,
      static_dir: default_static_dir(),
    }
  }
}

pub fn parse_config(s: &str) -> Result<QuizConfig, toml::de::Error> {
  toml::from_str::<QuizConfig>(s)
}

/// Load `QuizConfig` from QUIZ_CONFIG_PATH, then apply QUIZ_DATA_PATH on top.
/// A missing or broken config file is logged and defaults are used.
pub fn load_config_from_env() -> QuizConfig {
  let mut cfg = match std::env::var("QUIZ_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match parse_config(&s) {
        Ok(cfg) => {
          info!(target: "quizdeck_backend", %path, "Loaded quiz config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "quizdeck_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
          QuizConfig::default()
        }
      },
      Err(e) => {
        error!(target: "quizdeck_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
        QuizConfig::default()
      }
    },
    Err(_) => QuizConfig::default(),
  };
  if let Ok(path) = std::env::var("QUIZ_DATA_PATH") {
    cfg.quiz_data_path = Some(path);
  }
  cfg
}

pub fn parse_quiz_data(path: &str, s: &str) -> Result<QuizData, LoadError> {
  serde_json::from_str::<QuizData>(s).map_err(|source| LoadError::Parse { path: path.to_string(), source })
}

/// Read and validate the quiz document. Any failure here is fatal.
pub fn load_quiz(cfg: &QuizConfig) -> Result<Quiz, LoadError> {
  let data = match &cfg.quiz_data_path {
    Some(path) => {
      let s = std::fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.clone(), source })?;
      let data = parse_quiz_data(path, &s)?;
      info!(target: "quizdeck_backend", %path, sections = data.sections.len(), questions = data.question_count(), "Loaded quiz document");
      data
    }
    None => {
      info!(target: "quizdeck_backend", "No QUIZ_DATA_PATH; using built-in sample quiz");
      sample_quiz()
    }
  };
  Ok(Quiz::new(data, cfg.auto_graded_section.clone())?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ValidationError;

  #[test]
  fn empty_toml_uses_defaults() {
    assert_eq!(parse_config("").expect("parse"), QuizConfig::default());
  }

  #[test]
  fn toml_overrides() {
    let cfg = parse_config("auto_graded_section = \"part-1\"\nquiz_data_path = \"quiz.json\"\n").expect("parse");
    assert_eq!(cfg.auto_graded_section, "part-1");
    assert_eq!(cfg.quiz_data_path.as_deref(), Some("quiz.json"));
    assert_eq!(cfg.static_dir, "./static");
  }

  #[test]
  fn default_config_loads_sample_quiz() {
    let quiz = load_quiz(&QuizConfig::default()).expect("sample quiz");
    assert_eq!(quiz.len(), 8);
    assert_eq!(quiz.auto_graded_section(), "section-a");
  }

  #[test]
  fn missing_document_is_fatal() {
    let cfg = QuizConfig { quiz_data_path: Some("/nonexistent/quiz.json".into()), ..QuizConfig::default() };
    assert!(matches!(load_quiz(&cfg), Err(LoadError::Io { .. })));
  }

  #[test]
  fn malformed_json_is_reported() {
    assert!(matches!(parse_quiz_data("x.json", "{\"meta\": 1}"), Err(LoadError::Parse { .. })));
  }

  #[test]
  fn invalid_document_is_fatal() {
    let dir = std::env::temp_dir().join(format!("quizdeck-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("tmp dir");
    let path = dir.join("no-tiers.json");
    let mut data = sample_quiz();
    data.scoring.tiers.clear();
    std::fs::write(&path, serde_json::to_string(&data).expect("serialize")).expect("write");

    let cfg = QuizConfig { quiz_data_path: Some(path.to_string_lossy().into_owned()), ..QuizConfig::default() };
    assert!(matches!(load_quiz(&cfg), Err(LoadError::Invalid(ValidationError::EmptyTiers))));
    let _ = std::fs::remove_dir_all(&dir);
  }
}

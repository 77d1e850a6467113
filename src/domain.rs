//! Domain models for the quiz document: meta, sections, question variants, scoring tiers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Display-only information shown on the landing screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizMeta {
  pub title: String,
  pub subtitle: String,
  pub estimated_time: String,
  pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct McqOption {
  pub key: String,
  pub text: String,
}

/// Multiple choice: auto-graded by comparing the chosen key with `correct_answer`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McqQuestion {
  pub id: String,
  pub text: String,
  #[serde(default)] pub code_snippet: Option<String>,
  pub options: Vec<McqOption>,
  pub correct_answer: String,
  pub explanation: String,
}

/// "What does this code do?" style question; the snippet is mandatory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CodeAnalysisQuestion {
  pub id: String,
  pub text: String,
  pub code_snippet: String,
  pub model_answer: String,
  pub explanation: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShortAnswerQuestion {
  pub id: String,
  pub text: String,
  #[serde(default)] pub code_snippet: Option<String>,
  pub model_answer: String,
  pub explanation: String,
}

/// Question variants, tagged by `type` in the document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
  Mcq(McqQuestion),
  CodeAnalysis(CodeAnalysisQuestion),
  ShortAnswer(ShortAnswerQuestion),
}

/// Bare variant name, used in public DTOs and logs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
  Mcq,
  CodeAnalysis,
  ShortAnswer,
}

impl Question {
  pub fn id(&self) -> &str {
    match self {
      Question::Mcq(q) => &q.id,
      Question::CodeAnalysis(q) => &q.id,
      Question::ShortAnswer(q) => &q.id,
    }
  }

  pub fn text(&self) -> &str {
    match self {
      Question::Mcq(q) => &q.text,
      Question::CodeAnalysis(q) => &q.text,
      Question::ShortAnswer(q) => &q.text,
    }
  }

  pub fn code_snippet(&self) -> Option<&str> {
    match self {
      Question::Mcq(q) => q.code_snippet.as_deref(),
      Question::CodeAnalysis(q) => Some(q.code_snippet.as_str()),
      Question::ShortAnswer(q) => q.code_snippet.as_deref(),
    }
  }

  pub fn explanation(&self) -> &str {
    match self {
      Question::Mcq(q) => &q.explanation,
      Question::CodeAnalysis(q) => &q.explanation,
      Question::ShortAnswer(q) => &q.explanation,
    }
  }

  /// Reference solution for free-text questions; MCQs have none.
  pub fn model_answer(&self) -> Option<&str> {
    match self {
      Question::Mcq(_) => None,
      Question::CodeAnalysis(q) => Some(&q.model_answer),
      Question::ShortAnswer(q) => Some(&q.model_answer),
    }
  }

  pub fn kind(&self) -> QuestionKind {
    match self {
      Question::Mcq(_) => QuestionKind::Mcq,
      Question::CodeAnalysis(_) => QuestionKind::CodeAnalysis,
      Question::ShortAnswer(_) => QuestionKind::ShortAnswer,
    }
  }

  /// Free-text questions are scored by the user during review.
  pub fn is_self_graded(&self) -> bool {
    match self {
      Question::Mcq(_) => false,
      Question::CodeAnalysis(_) | Question::ShortAnswer(_) => true,
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Section {
  pub id: String,
  pub title: String,
  pub instruction: String,
  pub questions: Vec<Question>,
}

/// Labeled score band. Tiers are scanned in document order; the first whose
/// `min` is reached wins.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScoringTier {
  pub min: f64,
  pub label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Scoring {
  pub tiers: Vec<ScoringTier>,
}

/// Root of the quiz document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuizData {
  pub meta: QuizMeta,
  pub sections: Vec<Section>,
  pub scoring: Scoring,
}

impl QuizData {
  /// Reject documents that would produce silently wrong scores.
  pub fn validate(&self) -> Result<(), ValidationError> {
    let tiers = &self.scoring.tiers;
    if tiers.is_empty() {
      return Err(ValidationError::EmptyTiers);
    }
    for pair in tiers.windows(2) {
      if pair[1].min > pair[0].min {
        return Err(ValidationError::TiersNotDescending {
          label: pair[1].label.clone(),
          min: pair[1].min,
          previous: pair[0].min,
        });
      }
    }

    let mut seen = HashSet::new();
    for question in self.sections.iter().flat_map(|s| s.questions.iter()) {
      if !seen.insert(question.id()) {
        return Err(ValidationError::DuplicateQuestionId { id: question.id().to_string() });
      }
      if let Question::Mcq(q) = question {
        let matches = q.options.iter().filter(|o| o.key == q.correct_answer).count();
        if matches != 1 {
          return Err(ValidationError::InvalidCorrectAnswer {
            id: q.id.clone(),
            correct_answer: q.correct_answer.clone(),
            matches,
          });
        }
      }
    }
    Ok(())
  }

  pub fn question_count(&self) -> usize {
    self.sections.iter().map(|s| s.questions.len()).sum()
  }
}

/// User's own verdict on a free-text answer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SelfGrade {
  Correct,
  Partial,
  Incorrect,
}

impl SelfGrade {
  /// Credit toward the total: partial answers count for half.
  pub fn credit(self) -> f64 {
    match self {
      SelfGrade::Correct => 1.0,
      SelfGrade::Partial => 0.5,
      SelfGrade::Incorrect => 0.0,
    }
  }
}

//! Scoring: auto-graded MCQs plus self-graded free-text answers, mapped onto tiers.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Question, ScoringTier, SelfGrade};
use crate::flatten::FlattenedQuestion;

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
  pub mcq_correct: usize,
  pub mcq_total: usize,
  pub self_graded_correct: usize,
  pub self_graded_partial: usize,
  /// Self-graded questions the user has not rated yet.
  pub self_graded_pending: usize,
  pub self_graded_equivalent: f64,
  pub self_graded_total: usize,
  pub total_correct: f64,
  pub total_questions: usize,
  pub percentage: f64,
  pub rounded_percentage: u32,
  pub tier_label: String,
}

/// First tier whose `min` is reached, in declared order; the last tier otherwise.
pub fn select_tier(tiers: &[ScoringTier], percentage: f64) -> Option<&ScoringTier> {
  tiers.iter().find(|t| t.min <= percentage).or_else(|| tiers.last())
}

/// Only MCQs inside `auto_graded_section` are auto-scored. Code-analysis and
/// short-answer questions count wherever they sit. Read-only.
pub fn score(
  questions: &[FlattenedQuestion],
  answers: &BTreeMap<String, String>,
  self_grades: &BTreeMap<String, SelfGrade>,
  tiers: &[ScoringTier],
  auto_graded_section: &str,
) -> ScoreReport {
  let mut mcq_correct = 0;
  let mut mcq_total = 0;
  let mut self_graded_correct = 0;
  let mut self_graded_partial = 0;
  let mut self_graded_pending = 0;
  let mut self_graded_total = 0;

  for item in questions {
    match &item.question {
      Question::Mcq(q) => {
        if item.section_id != auto_graded_section {
          continue;
        }
        mcq_total += 1;
        if answers.get(&q.id) == Some(&q.correct_answer) {
          mcq_correct += 1;
        }
      }
      Question::CodeAnalysis(_) | Question::ShortAnswer(_) => {
        self_graded_total += 1;
        match self_grades.get(item.question.id()) {
          Some(SelfGrade::Correct) => self_graded_correct += 1,
          Some(SelfGrade::Partial) => self_graded_partial += 1,
          Some(SelfGrade::Incorrect) => {}
          None => self_graded_pending += 1,
        }
      }
    }
  }

  let self_graded_equivalent =
    self_graded_correct as f64 * SelfGrade::Correct.credit() + self_graded_partial as f64 * SelfGrade::Partial.credit();
  let total_correct = mcq_correct as f64 + self_graded_equivalent;
  let total_questions = mcq_total + self_graded_total;
  let percentage = if total_questions == 0 {
    0.0
  } else {
    100.0 * total_correct / total_questions as f64
  };
  let tier_label = select_tier(tiers, percentage).map(|t| t.label.clone()).unwrap_or_default();

  ScoreReport {
    mcq_correct,
    mcq_total,
    self_graded_correct,
    self_graded_partial,
    self_graded_pending,
    self_graded_equivalent,
    self_graded_total,
    total_correct,
    total_questions,
    percentage,
    rounded_percentage: percentage.round() as u32,
    tier_label,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{McqOption, McqQuestion, ShortAnswerQuestion};

  fn tiers() -> Vec<ScoringTier> {
    vec![
      ScoringTier { min: 80.0, label: "Expert".into() },
      ScoringTier { min: 50.0, label: "Intermediate".into() },
      ScoringTier { min: 0.0, label: "Novice".into() },
    ]
  }

  fn mcq(id: &str, section: &str, index: usize) -> FlattenedQuestion {
    FlattenedQuestion {
      question: Question::Mcq(McqQuestion {
        id: id.into(),
        text: String::new(),
        code_snippet: None,
        options: vec![
          McqOption { key: "a".into(), text: "A".into() },
          McqOption { key: "b".into(), text: "B".into() },
        ],
        correct_answer: "a".into(),
        explanation: String::new(),
      }),
      section_id: section.into(),
      section_title: section.into(),
      global_index: index,
    }
  }

  fn short(id: &str, index: usize) -> FlattenedQuestion {
    FlattenedQuestion {
      question: Question::ShortAnswer(ShortAnswerQuestion {
        id: id.into(),
        text: String::new(),
        code_snippet: None,
        model_answer: String::new(),
        explanation: String::new(),
      }),
      section_id: "section-c".into(),
      section_title: "C".into(),
      global_index: index,
    }
  }

  fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn mixed_quiz_scores_partial_credit() {
    let qs = vec![mcq("m1", "section-a", 0), mcq("m2", "section-a", 1), short("s1", 2), short("s2", 3)];
    let grades = BTreeMap::from([("s1".to_string(), SelfGrade::Correct), ("s2".to_string(), SelfGrade::Partial)]);
    let r = score(&qs, &answers(&[("m1", "a"), ("m2", "b")]), &grades, &tiers(), "section-a");
    assert_eq!(r.mcq_correct, 1);
    assert_eq!(r.mcq_total, 2);
    assert_eq!(r.self_graded_equivalent, 1.5);
    assert_eq!(r.total_correct, 2.5);
    assert_eq!(r.total_questions, 4);
    assert_eq!(r.percentage, 62.5);
    assert_eq!(r.rounded_percentage, 63);
    assert_eq!(r.tier_label, "Intermediate");
    assert_eq!(r.self_graded_pending, 0);
  }

  #[test]
  fn missing_answers_and_grades_earn_nothing() {
    let qs = vec![mcq("m1", "section-a", 0), short("s1", 1)];
    let r = score(&qs, &BTreeMap::new(), &BTreeMap::new(), &tiers(), "section-a");
    assert_eq!(r.total_correct, 0.0);
    assert_eq!(r.self_graded_pending, 1);
    assert_eq!(r.tier_label, "Novice");
  }

  #[test]
  fn no_scorable_questions_is_zero_percent() {
    let r = score(&[], &BTreeMap::new(), &BTreeMap::new(), &tiers(), "section-a");
    assert_eq!(r.total_questions, 0);
    assert_eq!(r.percentage, 0.0);
    assert_eq!(r.tier_label, "Novice");
  }

  #[test]
  fn mcq_outside_auto_graded_section_is_excluded() {
    let qs = vec![mcq("m1", "section-a", 0), mcq("m2", "section-x", 1)];
    let r = score(&qs, &answers(&[("m1", "a"), ("m2", "a")]), &BTreeMap::new(), &tiers(), "section-a");
    assert_eq!(r.mcq_total, 1);
    assert_eq!(r.mcq_correct, 1);
    assert_eq!(r.total_questions, 1);
    assert_eq!(r.percentage, 100.0);
  }

  #[test]
  fn tier_selection_uses_first_match() {
    let t = tiers();
    assert_eq!(select_tier(&t, 62.5).map(|t| t.label.as_str()), Some("Intermediate"));
    assert_eq!(select_tier(&t, 80.0).map(|t| t.label.as_str()), Some("Expert"));
    assert_eq!(select_tier(&t, 0.0).map(|t| t.label.as_str()), Some("Novice"));
  }

  #[test]
  fn tier_falls_back_to_last() {
    let t = vec![ScoringTier { min: 90.0, label: "Top".into() }, ScoringTier { min: 40.0, label: "Rest".into() }];
    assert_eq!(select_tier(&t, 10.0).map(|t| t.label.as_str()), Some("Rest"));
    assert!(select_tier(&[], 10.0).is_none());
  }
}

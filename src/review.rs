//! Read-only views for the quiz and results screens: progress dots and the
//! per-question answer review.

use serde::Serialize;

use crate::domain::{Question, QuestionKind, SelfGrade};
use crate::flatten::FlattenedQuestion;
use crate::session::{is_answered, QuizState};

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatus {
  pub index: usize,
  pub question_id: String,
  pub answered: bool,
  pub current: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
  /// 1-based, as shown in "Question 3 of 8".
  pub position: usize,
  pub total: usize,
  pub answered: usize,
  pub percentage: f64,
  pub is_first: bool,
  pub is_last: bool,
  pub section_title: Option<String>,
  pub questions: Vec<QuestionStatus>,
}

pub fn progress(questions: &[FlattenedQuestion], state: &QuizState) -> Progress {
  let total = questions.len();
  let current = state.current_question_index;
  let statuses: Vec<QuestionStatus> = questions
    .iter()
    .enumerate()
    .map(|(index, q)| QuestionStatus {
      index,
      question_id: q.question.id().to_string(),
      answered: is_answered(state.answers.get(q.question.id()).map(String::as_str)),
      current: index == current,
    })
    .collect();

  Progress {
    position: if total == 0 { 0 } else { current + 1 },
    total,
    answered: statuses.iter().filter(|s| s.answered).count(),
    percentage: if total == 0 { 0.0 } else { (current + 1) as f64 / total as f64 * 100.0 },
    is_first: current == 0,
    is_last: total == 0 || current + 1 == total,
    section_title: questions.get(current).map(|q| q.section_title.clone()),
    questions: statuses,
  }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOption {
  pub key: String,
  pub text: String,
  pub is_correct: bool,
  pub is_user_answer: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ReviewDetail {
  Mcq {
    options: Vec<ReviewOption>,
    correct_answer: String,
    /// Whether this MCQ contributes to the auto-graded score.
    auto_graded: bool,
    is_correct: bool,
  },
  FreeText {
    model_answer: String,
    self_grade: Option<SelfGrade>,
  },
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
  pub global_index: usize,
  pub question_id: String,
  pub kind: QuestionKind,
  pub section_id: String,
  pub section_title: String,
  pub text: String,
  pub code_snippet: Option<String>,
  pub explanation: String,
  /// None when the answer is missing or blank.
  pub user_answer: Option<String>,
  pub detail: ReviewDetail,
}

pub fn review(questions: &[FlattenedQuestion], state: &QuizState, auto_graded_section: &str) -> Vec<ReviewItem> {
  questions
    .iter()
    .map(|item| {
      let q = &item.question;
      let raw = state.answers.get(q.id()).map(String::as_str);
      let detail = match q {
        Question::Mcq(m) => ReviewDetail::Mcq {
          options: m
            .options
            .iter()
            .map(|o| ReviewOption {
              key: o.key.clone(),
              text: o.text.clone(),
              is_correct: o.key == m.correct_answer,
              is_user_answer: raw == Some(o.key.as_str()),
            })
            .collect(),
          correct_answer: m.correct_answer.clone(),
          auto_graded: item.section_id == auto_graded_section,
          is_correct: raw == Some(m.correct_answer.as_str()),
        },
        Question::CodeAnalysis(_) | Question::ShortAnswer(_) => ReviewDetail::FreeText {
          model_answer: q.model_answer().unwrap_or_default().to_string(),
          self_grade: state.self_grades.get(q.id()).copied(),
        },
      };
      ReviewItem {
        global_index: item.global_index,
        question_id: q.id().to_string(),
        kind: q.kind(),
        section_id: item.section_id.clone(),
        section_title: item.section_title.clone(),
        text: q.text().to_string(),
        code_snippet: q.code_snippet().map(str::to_string),
        explanation: q.explanation().to_string(),
        user_answer: raw.filter(|v| is_answered(Some(*v))).map(str::to_string),
        detail,
      }
    })
    .collect()
}

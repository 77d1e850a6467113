//! Flattening the section tree into the linear sequence used for navigation.

use serde::Serialize;

use crate::domain::{Question, QuizData};

/// A question annotated with its section and its position in the whole quiz.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedQuestion {
  pub question: Question,
  pub section_id: String,
  pub section_title: String,
  pub global_index: usize,
}

/// Section order first, then question order within a section.
/// `global_index` counts from 0 across the whole traversal.
pub fn flatten(data: &QuizData) -> Vec<FlattenedQuestion> {
  data
    .sections
    .iter()
    .flat_map(|section| section.questions.iter().map(move |q| (section, q)))
    .enumerate()
    .map(|(global_index, (section, question))| FlattenedQuestion {
      question: question.clone(),
      section_id: section.id.clone(),
      section_title: section.title.clone(),
      global_index,
    })
    .collect()
}

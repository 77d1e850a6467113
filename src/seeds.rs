//! Built-in sample quiz so the service is usable without an external document.

use crate::domain::{
  CodeAnalysisQuestion, McqOption, McqQuestion, Question, QuizData, QuizMeta, Scoring, ScoringTier, Section,
  ShortAnswerQuestion,
};

fn options(pairs: &[(&str, &str)]) -> Vec<McqOption> {
  pairs.iter().map(|(k, t)| McqOption { key: (*k).into(), text: (*t).into() }).collect()
}

fn tier(min: f64, label: &str) -> ScoringTier {
  ScoringTier { min, label: label.into() }
}

/// JavaScript primitives and boxing: three sections, eight questions.
pub fn sample_quiz() -> QuizData {
  QuizData {
    meta: QuizMeta {
      title: "When Numbers Secretly Become Objects".into(),
      subtitle: "A quiz on JavaScript primitives, wrappers and auto-boxing".into(),
      estimated_time: "15 minutes".into(),
      description: "Test how well you understand what happens when you call a method on a primitive.".into(),
    },
    sections: vec![
      Section {
        id: "section-a".into(),
        title: "Multiple Choice".into(),
        instruction: "Choose the single best answer.".into(),
        questions: vec![
          Question::Mcq(McqQuestion {
            id: "a1".into(),
            text: "What does `typeof 42` evaluate to?".into(),
            code_snippet: None,
            options: options(&[("a", "\"object\""), ("b", "\"number\""), ("c", "\"Number\""), ("d", "\"integer\"")]),
            correct_answer: "b".into(),
            explanation: "Number literals are primitives; `typeof` reports `\"number\"`.".into(),
          }),
          Question::Mcq(McqQuestion {
            id: "a2".into(),
            text: "What is logged?".into(),
            code_snippet: Some("const n = 5;\nconsole.log(n.toFixed(2));".into()),
            options: options(&[("a", "5"), ("b", "TypeError"), ("c", "\"5.00\""), ("d", "undefined")]),
            correct_answer: "c".into(),
            explanation: "The primitive is temporarily wrapped in a `Number` object that provides `toFixed`.".into(),
          }),
          Question::Mcq(McqQuestion {
            id: "a3".into(),
            text: "What does `typeof new Number(1)` evaluate to?".into(),
            code_snippet: None,
            options: options(&[("a", "\"number\""), ("b", "\"object\""), ("c", "\"function\"")]),
            correct_answer: "b".into(),
            explanation: "Calling the constructor with `new` creates a wrapper object.".into(),
          }),
          Question::Mcq(McqQuestion {
            id: "a4".into(),
            text: "What is logged?".into(),
            code_snippet: Some("const n = 1;\nn.label = \"one\";\nconsole.log(n.label);".into()),
            options: options(&[("a", "\"one\""), ("b", "undefined"), ("c", "TypeError")]),
            correct_answer: "b".into(),
            explanation: "The property lands on a throwaway wrapper that is discarded immediately.".into(),
          }),
        ],
      },
      Section {
        id: "section-b".into(),
        title: "Code Analysis".into(),
        instruction: "Explain what the code does and why.".into(),
        questions: vec![
          Question::CodeAnalysis(CodeAnalysisQuestion {
            id: "b1".into(),
            text: "Why does this comparison print `false`?".into(),
            code_snippet: "console.log(new Number(3) === 3);".into(),
            model_answer: "`new Number(3)` is an object and `3` is a primitive; strict equality compares types first.".into(),
            explanation: "Wrapper objects never strictly equal primitives.".into(),
          }),
          Question::CodeAnalysis(CodeAnalysisQuestion {
            id: "b2".into(),
            text: "What does this print, and why?".into(),
            code_snippet: "if (new Boolean(false)) { console.log(\"yes\"); }".into(),
            model_answer: "It prints `yes`: every object is truthy, including a `Boolean` wrapper around `false`.".into(),
            explanation: "Truthiness is decided by the object, not by the wrapped value.".into(),
          }),
        ],
      },
      Section {
        id: "section-c".into(),
        title: "Short Answer".into(),
        instruction: "Answer in one or two sentences.".into(),
        questions: vec![
          Question::ShortAnswer(ShortAnswerQuestion {
            id: "c1".into(),
            text: "What is auto-boxing?".into(),
            code_snippet: None,
            model_answer: "The engine temporarily wraps a primitive in its object counterpart so a property or method can be accessed.".into(),
            explanation: "The wrapper exists only for the duration of the access.".into(),
          }),
          Question::ShortAnswer(ShortAnswerQuestion {
            id: "c2".into(),
            text: "Why should `new Number()` be avoided in application code?".into(),
            code_snippet: None,
            model_answer: "It produces an object with surprising equality and truthiness semantics; plain primitives behave predictably.".into(),
            explanation: "Use `Number(x)` without `new` for conversions.".into(),
          }),
        ],
      },
    ],
    scoring: Scoring {
      tiers: vec![
        tier(90.0, "Expert"),
        tier(70.0, "Proficient"),
        tier(50.0, "Developing"),
        tier(0.0, "Beginner"),
      ],
    },
  }
}

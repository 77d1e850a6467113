//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Answer keys, model answers and explanations only leave the server through
//! `ResultsOut`, after submission.

use serde::{Deserialize, Serialize};

use crate::domain::{McqOption, Question, QuestionKind, QuizMeta, ScoringTier, SelfGrade};
use crate::flatten::FlattenedQuestion;
use crate::quiz::Quiz;
use crate::review::{Progress, ReviewItem};
use crate::scoring::ScoreReport;
use crate::session::{Phase, QuizState};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    GetQuiz,
    GetQuestions,
    GetState,
    Start,
    Answer {
        #[serde(rename = "questionId")]
        question_id: String,
        value: String,
    },
    SelfGrade {
        #[serde(rename = "questionId")]
        question_id: String,
        grade: SelfGrade,
    },
    Navigate {
        index: i64,
    },
    Next,
    Previous,
    Submit {
        #[serde(default)]
        confirm: bool,
    },
    GetResults,
    Reset,
}

impl ClientWsMessage {
    /// Wire name of the message, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientWsMessage::Ping => "ping",
            ClientWsMessage::GetQuiz => "get_quiz",
            ClientWsMessage::GetQuestions => "get_questions",
            ClientWsMessage::GetState => "get_state",
            ClientWsMessage::Start => "start",
            ClientWsMessage::Answer { .. } => "answer",
            ClientWsMessage::SelfGrade { .. } => "self_grade",
            ClientWsMessage::Navigate { .. } => "navigate",
            ClientWsMessage::Next => "next",
            ClientWsMessage::Previous => "previous",
            ClientWsMessage::Submit { .. } => "submit",
            ClientWsMessage::GetResults => "get_results",
            ClientWsMessage::Reset => "reset",
        }
    }
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Quiz {
        quiz: QuizOut,
    },
    Questions {
        questions: Vec<QuestionOut>,
    },
    Session {
        session: SessionOut,
    },
    NeedsConfirmation {
        #[serde(rename = "unansweredCount")]
        unanswered_count: usize,
    },
    Results {
        results: ResultsOut,
    },
    Error {
        message: String,
    },
}

/// Landing screen payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOut {
    pub meta: QuizMeta,
    pub sections: Vec<SectionOut>,
    pub question_count: usize,
    pub tiers: Vec<ScoringTier>,
    pub auto_graded_section: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionOut {
    pub id: String,
    pub title: String,
    pub instruction: String,
    pub question_count: usize,
}

pub fn quiz_out(quiz: &Quiz) -> QuizOut {
    QuizOut {
        meta: quiz.meta().clone(),
        sections: quiz
            .sections()
            .iter()
            .map(|s| SectionOut {
                id: s.id.clone(),
                title: s.title.clone(),
                instruction: s.instruction.clone(),
                question_count: s.questions.len(),
            })
            .collect(),
        question_count: quiz.len(),
        tiers: quiz.tiers().to_vec(),
        auto_graded_section: quiz.auto_graded_section().to_string(),
    }
}

/// A question as shown while answering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    pub id: String,
    pub kind: QuestionKind,
    pub text: String,
    pub code_snippet: Option<String>,
    /// Empty for free-text questions.
    pub options: Vec<McqOption>,
    pub section_id: String,
    pub section_title: String,
    pub global_index: usize,
}

pub fn question_out(f: &FlattenedQuestion) -> QuestionOut {
    let options = match &f.question {
        Question::Mcq(q) => q.options.clone(),
        Question::CodeAnalysis(_) | Question::ShortAnswer(_) => Vec::new(),
    };
    QuestionOut {
        id: f.question.id().to_string(),
        kind: f.question.kind(),
        text: f.question.text().to_string(),
        code_snippet: f.question.code_snippet().map(str::to_string),
        options,
        section_id: f.section_id.clone(),
        section_title: f.section_title.clone(),
        global_index: f.global_index,
    }
}

/// Session snapshot sent after every read or transition.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
    pub phase: Phase,
    pub state: QuizState,
    pub unanswered_count: usize,
    pub progress: Progress,
    pub current: Option<QuestionOut>,
}

pub fn session_out(quiz: &Quiz, state: QuizState) -> SessionOut {
    SessionOut {
        phase: state.phase(),
        unanswered_count: quiz.unanswered_count(&state),
        progress: quiz.progress(&state),
        current: quiz.current(&state).map(question_out),
        state,
    }
}

#[derive(Debug, Serialize)]
pub struct ResultsOut {
    pub score: ScoreReport,
    pub review: Vec<ReviewItem>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOut {
    Submitted {
        session: SessionOut,
    },
    NeedsConfirmation {
        #[serde(rename = "unansweredCount")]
        unanswered_count: usize,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SelfGradeIn {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub grade: SelfGrade,
}

#[derive(Debug, Deserialize)]
pub struct NavigateIn {
    pub index: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitIn {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

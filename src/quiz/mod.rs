pub mod answers;
pub mod client;
pub mod presenter;
pub mod session;

use thiserror::Error;

pub use answers::{AnswerSet, Score};
pub use client::{resolve, HttpMatchService, MatchRequest, MatchResult, MatchService, Settlement, SubmissionError};
pub use presenter::{format_team_name, present, DisplayTeam, RankTag};
pub use session::{Advance, Completion, Notice, Session, SessionId, Step, SubmissionTicket};

/// First season of the league; the earliest selectable starting year.
pub const FIRST_SEASON: i32 = 1982;
/// Latest season the team registry describes.
pub const LATEST_SEASON: i32 = 2025;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub left_label: &'static str,
    pub right_label: &'static str,
}

pub const QUESTIONS: &[Question] = &[
    Question {
        id: "playStyle",
        icon: "⚾",
        title: "선호하는 경기 스타일",
        description: "어떤 야구를 볼 때 더 짜릿한가요?",
        left_label: "투수전·수비 야구",
        right_label: "화끈한 타격전",
    },
    Question {
        id: "tradition",
        icon: "🏆",
        title: "팀의 역사와 전통",
        description: "응원할 팀의 역사는 얼마나 중요한가요?",
        left_label: "새롭게 도전하는 팀",
        right_label: "전통의 명문 구단",
    },
    Question {
        id: "cheering",
        icon: "📣",
        title: "응원 문화",
        description: "야구장에서 어떻게 경기를 즐기고 싶나요?",
        left_label: "차분하게 관람",
        right_label: "목이 쉬도록 응원",
    },
    Question {
        id: "starPower",
        icon: "⭐",
        title: "스타 플레이어",
        description: "팀의 간판 스타가 얼마나 중요한가요?",
        left_label: "끈끈한 팀워크",
        right_label: "슈퍼스타 중심",
    },
    Question {
        id: "underdog",
        icon: "🔥",
        title: "성적과 낭만",
        description: "어떤 이야기에 더 마음이 가나요?",
        left_label: "꾸준한 강팀",
        right_label: "언더독의 반란",
    },
    Question {
        id: "region",
        icon: "📍",
        title: "연고지",
        description: "가까운 야구장이 얼마나 중요한가요?",
        left_label: "상관없음",
        right_label: "우리 동네 팀",
    },
];

/// Fixed, ordered sequence of questions a session walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    questions: &'static [Question],
}

impl Catalog {
    pub const fn new(questions: &'static [Question]) -> Self {
        Self { questions }
    }

    pub const fn standard() -> Self {
        Self::new(QUESTIONS)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static Question> {
        self.questions.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Question> {
        self.questions.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("score {0} is outside 1..=5")]
    ScoreOutOfRange(u8),

    #[error("unknown question '{0}'")]
    UnknownQuestion(String),

    #[error("starting year {0} is not a league season")]
    YearOutOfRange(i32),

    #[error("answers missing for {missing:?}")]
    IncompleteAnswers { missing: Vec<&'static str> },

    #[error("question '{question_id}' is not the current step")]
    StaleAnswer { question_id: String },

    #[error("cannot {action} while at {step:?}")]
    InvalidStep { step: Step, action: &'static str },

    #[error("no question before the first one")]
    NoPreviousQuestion,

    #[error("a submission is in flight")]
    Submitting,
}

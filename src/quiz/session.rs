use std::fmt;

use log::debug;

use super::client::{MatchRequest, MatchResult, Settlement};
use super::{AnswerSet, Catalog, QuizError, Score, FIRST_SEASON, LATEST_SEASON};

/// Identity of one quiz run. A reset starts a new run with a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn fresh() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Intro,
    /// Zero-based catalog index of the question on screen.
    Question(usize),
    Loading,
    Result,
}

/// Proof that a session reached `Loading` with a complete answer set.
/// Only [`Session::answer`] can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub(crate) session_id: SessionId,
    pub(crate) request: MatchRequest,
}

impl SubmissionTicket {
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn request(&self) -> &MatchRequest {
        &self.request
    }
}

#[derive(Debug, Clone)]
pub enum Advance {
    Next(usize),
    Submit(SubmissionTicket),
}

/// User-facing message the host shows after a failed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(pub &'static str);

pub const SUBMISSION_FAILED: Notice =
    Notice("팀 매칭 분석 중 문제가 발생했어요. 처음부터 다시 시도해 주세요.");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Revealed,
    Failed(Notice),
    /// The settlement belongs to a run that is gone or already settled.
    Ignored,
}

/// State of one run of the team-matching quiz.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    catalog: Catalog,
    default_year: i32,
    starting_year: i32,
    step: Step,
    answers: AnswerSet,
    result: Option<MatchResult>,
}

impl Session {
    pub fn new(catalog: Catalog, default_year: i32) -> Result<Self, QuizError> {
        check_year(default_year)?;

        let session = Self {
            id: SessionId::fresh(),
            catalog,
            default_year,
            starting_year: default_year,
            step: Step::Intro,
            answers: AnswerSet::new(),
            result: None,
        };
        debug!("Session {} created", session.id);
        Ok(session)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn starting_year(&self) -> i32 {
        self.starting_year
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn set_year(&mut self, year: i32) -> Result<(), QuizError> {
        self.expect_step(Step::Intro, "choose a starting year")?;
        check_year(year)?;
        self.starting_year = year;
        Ok(())
    }

    pub fn start(&mut self) -> Result<Step, QuizError> {
        self.expect_step(Step::Intro, "start")?;
        if self.catalog.is_empty() {
            return Err(QuizError::InvalidStep {
                step: self.step,
                action: "start an empty quiz",
            });
        }
        self.step = Step::Question(0);
        Ok(self.step)
    }

    /// Records `score` for `question_id` and advances. The answer must be
    /// for the question currently shown; anything else is rejected without
    /// touching the answer set.
    pub fn answer(&mut self, question_id: &str, score: Score) -> Result<Advance, QuizError> {
        let current = match self.step {
            Step::Question(index) => index,
            Step::Loading => return Err(QuizError::Submitting),
            step => return Err(QuizError::InvalidStep { step, action: "answer" }),
        };

        let question = self
            .catalog
            .get(current)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;
        if question.id != question_id {
            return match self.catalog.position(question_id) {
                Some(_) => Err(QuizError::StaleAnswer {
                    question_id: question_id.to_string(),
                }),
                None => Err(QuizError::UnknownQuestion(question_id.to_string())),
            };
        }

        self.answers.record(&self.catalog, question_id, score)?;

        let next = current + 1;
        if next < self.catalog.len() {
            self.step = Step::Question(next);
            return Ok(Advance::Next(next));
        }

        let preferences = self.answers.preferences(&self.catalog)?;
        self.step = Step::Loading;
        debug!("Session {} is submitting", self.id);

        Ok(Advance::Submit(SubmissionTicket {
            session_id: self.id,
            request: MatchRequest {
                start_year: self.starting_year,
                preferences,
            },
        }))
    }

    pub fn previous(&mut self) -> Result<Step, QuizError> {
        match self.step {
            Step::Question(0) => Err(QuizError::NoPreviousQuestion),
            Step::Question(index) => {
                self.step = Step::Question(index - 1);
                Ok(self.step)
            }
            Step::Loading => Err(QuizError::Submitting),
            step => Err(QuizError::InvalidStep {
                step,
                action: "go back",
            }),
        }
    }

    /// Applies the matching service's outcome if it belongs to this run.
    pub fn settle(&mut self, settlement: Settlement) -> Completion {
        if settlement.session_id != self.id || self.step != Step::Loading {
            debug!(
                "Ignoring settlement for {} (current session {}, {:?})",
                settlement.session_id, self.id, self.step
            );
            return Completion::Ignored;
        }

        match settlement.outcome {
            Ok(result) => {
                self.result = Some(result);
                self.step = Step::Result;
                Completion::Revealed
            }
            Err(_) => {
                self.reset();
                Completion::Failed(SUBMISSION_FAILED)
            }
        }
    }

    /// "다시 분석하기" from the result screen.
    pub fn retry(&mut self) -> Result<Step, QuizError> {
        self.expect_step(Step::Result, "retry")?;
        self.reset();
        Ok(self.step)
    }

    /// Back to a clean intro: no answers, no result, default year.
    pub fn reset(&mut self) {
        self.id = SessionId::fresh();
        self.starting_year = self.default_year;
        self.step = Step::Intro;
        self.answers.clear();
        self.result = None;
        debug!("Session reset to {}", self.id);
    }

    fn expect_step(&self, expected: Step, action: &'static str) -> Result<(), QuizError> {
        match self.step {
            step if step == expected => Ok(()),
            Step::Loading => Err(QuizError::Submitting),
            step => Err(QuizError::InvalidStep { step, action }),
        }
    }
}

fn check_year(year: i32) -> Result<(), QuizError> {
    if (FIRST_SEASON..=LATEST_SEASON).contains(&year) {
        Ok(())
    } else {
        Err(QuizError::YearOutOfRange(year))
    }
}

use std::collections::BTreeMap;

use super::{Catalog, QuizError};

/// A rating on the 1..=5 scale between a question's two poles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, QuizError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QuizError::ScoreOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Every valid score, lowest first.
    pub fn all() -> impl Iterator<Item = Score> {
        (Self::MIN..=Self::MAX).map(Score)
    }
}

impl TryFrom<u8> for Score {
    type Error = QuizError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Running mapping from question id to the score chosen for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    scores: BTreeMap<&'static str, Score>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the score for `question_id`.
    pub fn record(
        &mut self,
        catalog: &Catalog,
        question_id: &str,
        score: Score,
    ) -> Result<(), QuizError> {
        let question = catalog
            .position(question_id)
            .and_then(|i| catalog.get(i))
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;

        self.scores.insert(question.id, score);
        Ok(())
    }

    pub fn get(&self, question_id: &str) -> Option<Score> {
        self.scores.get(question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        catalog.iter().all(|q| self.scores.contains_key(q.id))
    }

    pub fn snapshot(&self) -> BTreeMap<String, u8> {
        self.scores
            .iter()
            .map(|(id, score)| (id.to_string(), score.value()))
            .collect()
    }

    /// Snapshot suitable for submission; fails unless every catalog
    /// question has a score.
    pub fn preferences(&self, catalog: &Catalog) -> Result<BTreeMap<String, u8>, QuizError> {
        let missing: Vec<&'static str> = catalog
            .iter()
            .filter(|q| !self.scores.contains_key(q.id))
            .map(|q| q.id)
            .collect();

        if !missing.is_empty() {
            return Err(QuizError::IncompleteAnswers { missing });
        }
        Ok(self.snapshot())
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

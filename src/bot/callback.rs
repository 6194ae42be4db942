use std::fmt;

/// What an inline keyboard button asks the quiz to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    Year(i32),
    Answer { question_id: String, score: u8 },
    Previous,
    Retry,
}

impl Action {
    pub fn parse(data: &str) -> Option<Self> {
        let mut parts = data.split(':');
        let action = match (parts.next()?, parts.next(), parts.next()) {
            ("start", None, None) => Action::Start,
            ("prev", None, None) => Action::Previous,
            ("retry", None, None) => Action::Retry,
            ("year", Some(year), None) => Action::Year(year.parse().ok()?),
            ("ans", Some(id), Some(score)) if !id.is_empty() => Action::Answer {
                question_id: id.to_string(),
                score: score.parse().ok()?,
            },
            _ => return None,
        };

        if parts.next().is_some() {
            return None;
        }
        Some(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Start => f.write_str("start"),
            Action::Year(year) => write!(f, "year:{year}"),
            Action::Answer { question_id, score } => write!(f, "ans:{question_id}:{score}"),
            Action::Previous => f.write_str("prev"),
            Action::Retry => f.write_str("retry"),
        }
    }
}

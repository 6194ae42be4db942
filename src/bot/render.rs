use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html;

use super::callback::Action;
use crate::quiz::{
    format_team_name, present, MatchResult, QuizError, Score, Session, Step, FIRST_SEASON,
    LATEST_SEASON,
};

pub const GREETING_TEXT: &str = "안녕하세요! 나에게 딱 맞는 KBO 구단을 찾아드릴게요.";
pub const LOADING_TEXT: &str = "⏳ 당신의 야구 성향을 분석하고 있어요...";

const YEAR_STEPS: [i32; 4] = [-5, -1, 1, 5];
const PROGRESS_WIDTH: usize = 6;

fn button(text: impl Into<String>, action: Action) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, action.to_string())
}

pub fn intro(session: &Session) -> (String, InlineKeyboardMarkup) {
    let year = session.starting_year();
    let text = format!(
        "⚾ <b>나의 팀 찾기</b>\n\n\
         야구를 보기 시작한 해를 골라 주세요: <b>{year}년</b>\n\
         숫자로 직접 입력해도 돼요 ({FIRST_SEASON}~{LATEST_SEASON}).\n\n\
         질문 {}개에 답하면 어울리는 구단을 알려드려요.",
        session.catalog().len()
    );

    let year_row = YEAR_STEPS
        .iter()
        .map(|step| year + step)
        .filter(|y| (FIRST_SEASON..=LATEST_SEASON).contains(y))
        .map(|y| button(y.to_string(), Action::Year(y)))
        .collect::<Vec<_>>();

    let keyboard = InlineKeyboardMarkup::new(vec![
        year_row,
        vec![button("분석 시작 ▶", Action::Start)],
    ]);
    (text, keyboard)
}

pub fn question(session: &Session, index: usize) -> Option<(String, InlineKeyboardMarkup)> {
    let catalog = session.catalog();
    let question = catalog.get(index)?;
    let chosen = session.answers().get(question.id);

    let filled = (index * PROGRESS_WIDTH) / catalog.len();
    let progress = format!(
        "{}{}",
        "■".repeat(filled),
        "□".repeat(PROGRESS_WIDTH - filled)
    );

    let text = format!(
        "{progress} {}/{}\n\n{} <b>{}</b>\n{}\n\n1 = {} · 5 = {}",
        index + 1,
        catalog.len(),
        question.icon,
        html::escape(question.title),
        html::escape(question.description),
        html::escape(question.left_label),
        html::escape(question.right_label),
    );

    let scores = Score::all()
        .map(|score| {
            let label = if Some(score) == chosen {
                format!("[{}]", score.value())
            } else {
                score.value().to_string()
            };
            button(
                label,
                Action::Answer {
                    question_id: question.id.to_string(),
                    score: score.value(),
                },
            )
        })
        .collect::<Vec<_>>();

    let mut rows = vec![scores];
    if index > 0 {
        rows.push(vec![button("◀ 이전 질문", Action::Previous)]);
    }
    Some((text, InlineKeyboardMarkup::new(rows)))
}

pub fn result_card(result: &MatchResult) -> (String, InlineKeyboardMarkup) {
    let team = present(&result.team_label);
    let headline = format_team_name(&result.team_label);

    let mut text = format!(
        "🎉 당신에게 어울리는 팀은\n\n<b>{}</b> ({})\n",
        html::escape(&headline),
        team.rank
    );
    if let Some(seasons) = team.seasons {
        text.push_str(&format!("<i>{seasons} 시즌의 전설</i>\n"));
    }
    if let Some(year) = &result.year {
        text.push_str(&format!("<i>{}</i>\n", html::escape(year)));
    }
    if !result.rationale.is_empty() {
        text.push_str(&format!("\n{}", html::escape(&result.rationale)));
    }

    let mut rows = Vec::new();
    if let Some(url) = team.ticket_url.and_then(|u| reqwest::Url::parse(u).ok()) {
        rows.push(vec![InlineKeyboardButton::url("🎟 예매하러 가기", url)]);
    }
    rows.push(vec![button("다시 분석하기", Action::Retry)]);

    (text, InlineKeyboardMarkup::new(rows))
}

/// Whatever the session should be showing right now.
pub fn screen(session: &Session) -> (String, InlineKeyboardMarkup) {
    let rendered = match session.step() {
        Step::Intro => None,
        Step::Question(index) => question(session, index),
        Step::Loading => Some((LOADING_TEXT.to_string(), InlineKeyboardMarkup::default())),
        Step::Result => session.result().map(result_card),
    };
    rendered.unwrap_or_else(|| intro(session))
}

/// Short reply for an event the quiz refused.
pub fn rejection(err: &QuizError) -> &'static str {
    match err {
        QuizError::ScoreOutOfRange(_) => "1~5 사이에서 골라 주세요.",
        QuizError::YearOutOfRange(_) => "선택할 수 없는 연도예요.",
        QuizError::StaleAnswer { .. } => "이미 답한 질문이에요.",
        QuizError::NoPreviousQuestion => "첫 번째 질문이에요.",
        QuizError::Submitting => "분석 중이에요. 잠시만 기다려 주세요.",
        QuizError::UnknownQuestion(_)
        | QuizError::InvalidStep { .. }
        | QuizError::IncompleteAnswers { .. } => "지금은 사용할 수 없는 버튼이에요.",
    }
}

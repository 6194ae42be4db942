use std::sync::Arc;

use log::{debug, error, info, warn};
use teloxide::{prelude::*, types::ParseMode, utils::command::BotCommands};

use super::{callback::Action, render, Command, HandlerResult, Matchmaker, QuizDialogue, State};
use crate::quiz::{
    resolve, Advance, Completion, QuizError, Score, Session, Settlement, Step, SubmissionTicket,
};

pub async fn start(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    matchmaker: Arc<Matchmaker>,
) -> HandlerResult {
    let session = matchmaker.new_session()?;
    info!("Chat {} started session {}", msg.chat.id, session.id());

    let (text, keyboard) = render::intro(&session);
    bot.send_message(msg.chat.id, render::GREETING_TEXT).await?;
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    let _guard = matchmaker.transitions.lock().await;
    dialogue.update(State::Matching(session)).await?;
    Ok(())
}

pub async fn cancel(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    matchmaker: Arc<Matchmaker>,
) -> HandlerResult {
    {
        let _guard = matchmaker.transitions.lock().await;
        dialogue.exit().await?;
    }
    info!("Chat {} cancelled its session", msg.chat.id);

    bot.send_message(
        msg.chat.id,
        "분석을 그만뒀어요. /start 로 언제든 다시 시작할 수 있어요.",
    )
    .await?;
    Ok(())
}

pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

pub async fn receive_text(
    bot: Bot,
    dialogue: QuizDialogue,
    mut session: Session,
    msg: Message,
) -> HandlerResult {
    if session.step() != Step::Intro {
        bot.send_message(msg.chat.id, "아래 버튼으로 답해 주세요.")
            .await?;
        return Ok(());
    }

    let year = match msg.text().map(|t| t.trim().parse::<i32>()) {
        Some(Ok(year)) => year,
        _ => {
            bot.send_message(msg.chat.id, "연도를 숫자로 입력해 주세요. 예: 2015")
                .await?;
            return Ok(());
        }
    };

    if let Err(e) = session.set_year(year) {
        bot.send_message(msg.chat.id, render::rejection(&e)).await?;
        return Ok(());
    }

    let (text, keyboard) = render::intro(&session);
    dialogue.update(State::Matching(session)).await?;
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

pub async fn expired_keyboard(bot: Bot, q: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(q.id)
        .text("만료된 버튼이에요. /start 로 다시 시작해 주세요.")
        .await?;
    Ok(())
}

pub async fn receive_action(
    bot: Bot,
    dialogue: QuizDialogue,
    mut session: Session,
    q: CallbackQuery,
    matchmaker: Arc<Matchmaker>,
) -> HandlerResult {
    let Some((chat_id, message_id)) = q.message.as_ref().map(|m| (m.chat.id, m.id)) else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    let Some(action) = q.data.as_deref().and_then(Action::parse) else {
        debug!("Unrecognised callback data {:?}", q.data);
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    match apply(&mut session, action) {
        Err(e) => {
            debug!("Session {} rejected action: {e}", session.id());
            bot.answer_callback_query(q.id)
                .text(render::rejection(&e))
                .await?;
        }
        Ok(Some(ticket)) => {
            // A stored Loading session always has its settlement in flight,
            // so nothing after the spawn may bail out early.
            dialogue.update(State::Matching(session)).await?;
            spawn_settlement(bot.clone(), dialogue, chat_id, ticket, matchmaker);

            if let Err(e) = bot.answer_callback_query(q.id).await {
                warn!("Could not acknowledge final answer in chat {chat_id}: {e}");
            }
            if let Err(e) = bot
                .edit_message_text(chat_id, message_id, render::LOADING_TEXT)
                .await
            {
                warn!("Could not show loading screen in chat {chat_id}: {e}");
            }
        }
        Ok(None) => {
            bot.answer_callback_query(q.id).await?;
            let (text, keyboard) = render::screen(&session);
            dialogue.update(State::Matching(session)).await?;
            bot.edit_message_text(chat_id, message_id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        }
    }
    Ok(())
}

/// Applies one button press; yields a ticket when the last answer was given.
fn apply(session: &mut Session, action: Action) -> Result<Option<SubmissionTicket>, QuizError> {
    match action {
        Action::Start => {
            session.start()?;
        }
        Action::Year(year) => session.set_year(year)?,
        Action::Answer { question_id, score } => {
            let score = Score::new(score)?;
            if let Advance::Submit(ticket) = session.answer(&question_id, score)? {
                return Ok(Some(ticket));
            }
        }
        Action::Previous => {
            session.previous()?;
        }
        Action::Retry => {
            session.retry()?;
        }
    }
    Ok(None)
}

fn spawn_settlement(
    bot: Bot,
    dialogue: QuizDialogue,
    chat_id: ChatId,
    ticket: SubmissionTicket,
    matchmaker: Arc<Matchmaker>,
) {
    tokio::spawn(async move {
        if let Err(e) = settle(&bot, &dialogue, chat_id, ticket, &matchmaker).await {
            error!("Could not deliver match result to chat {chat_id}: {e}");
        }
    });
}

async fn settle(
    bot: &Bot,
    dialogue: &QuizDialogue,
    chat_id: ChatId,
    ticket: SubmissionTicket,
    matchmaker: &Matchmaker,
) -> HandlerResult {
    let settlement = resolve(matchmaker.service.as_ref(), ticket, matchmaker.reveal_delay).await;

    let Some((completion, session)) = store_settlement(dialogue, matchmaker, settlement).await?
    else {
        debug!("Chat {chat_id} left before its result arrived");
        return Ok(());
    };

    match completion {
        Completion::Revealed => {
            if let Some((text, keyboard)) = session.result().map(render::result_card) {
                bot.send_message(chat_id, text)
                    .parse_mode(ParseMode::Html)
                    .reply_markup(keyboard)
                    .await?;
            }
        }
        Completion::Failed(notice) => {
            let (text, keyboard) = render::intro(&session);
            bot.send_message(chat_id, notice.0).await?;
            bot.send_message(chat_id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        }
        Completion::Ignored => {}
    }
    Ok(())
}

/// Applies `settlement` to the session the chat holds right now and writes
/// it back. `None` when the chat no longer has a session.
async fn store_settlement(
    dialogue: &QuizDialogue,
    matchmaker: &Matchmaker,
    settlement: Settlement,
) -> Result<Option<(Completion, Session)>, Box<dyn std::error::Error + Send + Sync>> {
    let _guard = matchmaker.transitions.lock().await;
    let Some(State::Matching(mut session)) = dialogue.get().await? else {
        return Ok(None);
    };

    let completion = session.settle(settlement);
    if completion != Completion::Ignored {
        dialogue.update(State::Matching(session.clone())).await?;
    }
    Ok(Some((completion, session)))
}

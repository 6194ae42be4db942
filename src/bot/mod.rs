pub mod callback;
mod handlers;
pub mod render;

use std::{sync::Arc, time::Duration};

use log::warn;
use teloxide::{
    dispatching::{dialogue, dialogue::InMemStorage, UpdateHandler},
    prelude::*,
    utils::command::BotCommands,
};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::quiz::{Catalog, MatchService, QuizError, Session};

pub type QuizDialogue = Dialogue<State, InMemStorage<State>>;
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    Matching(Session),
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "사용할 수 있는 명령어:")]
pub enum Command {
    #[command(description = "나의 팀 찾기를 시작합니다.")]
    Start,
    #[command(description = "진행 중인 분석을 그만둡니다.")]
    Cancel,
    #[command(description = "도움말을 봅니다.")]
    Help,
}

/// Everything the handlers share besides the bot and the dialogue.
pub struct Matchmaker {
    pub service: Arc<dyn MatchService>,
    pub catalog: Catalog,
    pub default_year: i32,
    pub reveal_delay: Duration,
    // Held while a settlement or a cancel touches the dialogue, so an
    // abandoned run is never written back.
    transitions: Mutex<()>,
}

impl Matchmaker {
    pub fn new(service: Arc<dyn MatchService>, catalog: Catalog, config: &Config) -> Self {
        Self {
            service,
            catalog,
            default_year: config.default_start_year,
            reveal_delay: config.reveal_delay,
            transitions: Mutex::new(()),
        }
    }

    pub fn new_session(&self) -> Result<Session, QuizError> {
        Session::new(self.catalog, self.default_year)
    }
}

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(handlers::start))
        .branch(case![Command::Cancel].endpoint(handlers::cancel))
        .branch(case![Command::Help].endpoint(handlers::help));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(case![State::Start].endpoint(handlers::start))
        .branch(case![State::Matching(session)].endpoint(handlers::receive_text));

    let callback_handler = Update::filter_callback_query()
        .branch(case![State::Start].endpoint(handlers::expired_keyboard))
        .branch(case![State::Matching(session)].endpoint(handlers::receive_action));

    dialogue::enter::<Update, InMemStorage<State>, State, _>()
        .branch(message_handler)
        .branch(callback_handler)
}

pub async fn run(bot: Bot, matchmaker: Arc<Matchmaker>) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Could not register bot commands: {e}");
    }

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![InMemStorage::<State>::new(), matchmaker])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

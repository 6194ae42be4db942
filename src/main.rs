use std::sync::Arc;

use dotenv::dotenv;
use kbo_match_bot::{
    bot::{self, Matchmaker},
    config::Config,
    quiz::{Catalog, HttpMatchService},
};
use teloxide::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // A missing .env is fine; the environment may already carry everything
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting team matching bot...");

    let config = Config::load()?;
    let service = HttpMatchService::new(config.match_api_url.clone(), config.match_timeout)?;
    log::info!("Matching requests go to {}", service.endpoint());

    let matchmaker = Arc::new(Matchmaker::new(
        Arc::new(service),
        Catalog::standard(),
        &config,
    ));

    let bot = Bot::from_env();
    bot::run(bot, matchmaker).await;
    Ok(())
}

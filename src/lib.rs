//! Team matching quiz for KBO fans, served as a Telegram bot.
//!
//! The quiz core lives in [`quiz`]; [`bot`] drives it from chat updates.

pub mod bot;
pub mod config;
pub mod quiz;
pub mod teams;

//! Telegram bot surface: webhook update types, command handling, and the
//! per-chat joke memory backing the deferred-translation button.

pub mod memory;
pub mod telegram;

use serde::Deserialize;

use crate::jokes::JokeService;
use crate::translate::Translator;
use memory::JokeMemory;
use telegram::{InlineKeyboardButton, InlineKeyboardMarkup, TelegramBot};

/// Callback payload attached to the inline translate button.
pub const TRANSLATE_CALLBACK: &str = "translate_joke";

const GREETING: &str = "Привет! Я бот-анекдотчик 🤖\n\nЯ умею присылать случайные анекдоты из разных источников. Просто отправь команду /joke, чтобы получить свежий анекдот!\n\nТакже я могу переводить анекдоты на русский язык, если потребуется.\n\nПиши /joke — и улыбка гарантирована!";
const JOKES_UNAVAILABLE: &str = "Анекдоты временно недоступны";
const RU_JOKES_UNAVAILABLE: &str = "Русские анекдоты временно недоступны";
const TRANSLATION_FAILED: &str = "Ошибка перевода";
const USAGE_HINT: &str = "Используйте /joke для получения случайного анекдота.";
const TRANSLATE_BUTTON: &str = "Перевести на русский";
const CALLBACK_ACK: &str = "Переведено";

// Incoming webhook types: only the fields the handlers look at.

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub data: Option<String>,
    pub message: Option<Message>,
}

/// Handle one webhook update: the translate callback, or a `/command`.
/// Anything else is silently ignored, as the Bot API expects.
pub async fn process_update(
    bot: &TelegramBot,
    jokes: &JokeService,
    translator: &Translator,
    memory: &JokeMemory,
    update: Update,
) {
    if let Some(callback) = &update.callback_query {
        if callback.data.as_deref() == Some(TRANSLATE_CALLBACK) {
            handle_translate_callback(bot, translator, memory, callback).await;
        }
        return;
    }

    let Some(message) = update.message else { return };
    let Some(text) = message.text.as_deref() else { return };
    let Some(command) = command_of(text) else { return };
    let chat_id = message.chat.id;

    match command {
        "start" => send_or_log(bot, chat_id, GREETING).await,
        "joke" => handle_joke(bot, jokes, memory, chat_id).await,
        "joke_ru" => handle_joke_ru(bot, jokes, chat_id).await,
        _ => send_or_log(bot, chat_id, USAGE_HINT).await,
    }
}

/// First token of a `/command`, with an optional `@botname` suffix stripped.
fn command_of(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }
    let token = trimmed.split_whitespace().next().unwrap_or(trimmed);
    let token = token.split('@').next().unwrap_or(token);
    Some(&token[1..])
}

async fn handle_joke(bot: &TelegramBot, jokes: &JokeService, memory: &JokeMemory, chat_id: i64) {
    let joke = match jokes.fetch(None).await {
        Ok(joke) => joke,
        Err(e) => {
            tracing::warn!(provider = e.provider(), error = ?e, "bot joke fetch failed");
            send_or_log(bot, chat_id, JOKES_UNAVAILABLE).await;
            return;
        }
    };

    if joke.is_russian {
        send_or_log(bot, chat_id, &joke.text).await;
        return;
    }

    // Remember the joke before offering the button, so a fast callback
    // always finds the entry.
    memory.set(chat_id, joke.text.clone());
    let keyboard = InlineKeyboardMarkup::single_button(InlineKeyboardButton::callback(
        TRANSLATE_BUTTON,
        TRANSLATE_CALLBACK,
    ));
    if let Err(e) = bot
        .send_message_with_keyboard(chat_id, &joke.text, keyboard)
        .await
    {
        tracing::warn!(chat_id, error = ?e, "sending telegram message failed");
    }
}

async fn handle_joke_ru(bot: &TelegramBot, jokes: &JokeService, chat_id: i64) {
    match jokes.fetch_native().await {
        Ok(joke) => send_or_log(bot, chat_id, &joke.text).await,
        Err(e) => {
            tracing::warn!(provider = e.provider(), error = ?e, "bot native joke fetch failed");
            send_or_log(bot, chat_id, RU_JOKES_UNAVAILABLE).await;
        }
    }
}

async fn handle_translate_callback(
    bot: &TelegramBot,
    translator: &Translator,
    memory: &JokeMemory,
    callback: &CallbackQuery,
) {
    if let Err(e) = bot.answer_callback(&callback.id, CALLBACK_ACK).await {
        tracing::warn!(error = ?e, "answering telegram callback failed");
    }

    let Some(message) = &callback.message else { return };
    let chat_id = message.chat.id;
    if let Err(e) = bot.clear_reply_markup(chat_id, message.message_id).await {
        tracing::warn!(chat_id, error = ?e, "clearing telegram keyboard failed");
    }

    // The stored joke stays in memory: repeated taps re-translate the same one.
    let Some(text) = memory.get(chat_id) else { return };
    match translator.translate(&text).await {
        Ok(translation) => send_or_log(bot, chat_id, &translation).await,
        Err(e) => {
            tracing::warn!(chat_id, error = ?e, "translation failed");
            send_or_log(bot, chat_id, TRANSLATION_FAILED).await;
        }
    }
}

async fn send_or_log(bot: &TelegramBot, chat_id: i64, text: &str) {
    if let Err(e) = bot.send_message(chat_id, text).await {
        tracing::warn!(chat_id, error = ?e, "sending telegram message failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_parsed_from_message_text() {
        assert_eq!(command_of("/joke"), Some("joke"));
        assert_eq!(command_of("/joke_ru"), Some("joke_ru"));
        assert_eq!(command_of("  /start  "), Some("start"));
        assert_eq!(command_of("/joke@anekdot_bot"), Some("joke"));
        assert_eq!(command_of("/joke please"), Some("joke"));
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(command_of("hello"), None);
        assert_eq!(command_of(""), None);
        assert_eq!(command_of("joke /joke"), None);
    }

    #[test]
    fn update_json_decodes() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 42,
                "message": {
                    "message_id": 7,
                    "chat": {"id": 123},
                    "text": "/joke"
                }
            }"#,
        )
        .unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 123);
        assert_eq!(message.text.as_deref(), Some("/joke"));
        assert!(update.callback_query.is_none());
    }
}

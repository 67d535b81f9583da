//! Minimal Telegram Bot API client: just the three methods the webhook
//! handler needs, over plain reqwest.

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct TelegramBot {
    token: String,
    api_base: String,
    client: Client,
    timeout: Duration,
}

impl TelegramBot {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    /// Point the client at a different Bot API host (tests).
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: api_base.into(),
            client: Client::new(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.call(
            "sendMessage",
            &SendMessage {
                chat_id,
                text,
                reply_markup: None,
            },
        )
        .await
    }

    pub async fn send_message_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<()> {
        self.call(
            "sendMessage",
            &SendMessage {
                chat_id,
                text,
                reply_markup: Some(keyboard),
            },
        )
        .await
    }

    pub async fn answer_callback(&self, callback_query_id: &str, text: &str) -> Result<()> {
        self.call(
            "answerCallbackQuery",
            &AnswerCallbackQuery {
                callback_query_id,
                text,
            },
        )
        .await
    }

    /// Remove the inline keyboard from an already-sent message.
    pub async fn clear_reply_markup(&self, chat_id: i64, message_id: i64) -> Result<()> {
        self.call(
            "editMessageReplyMarkup",
            &EditMessageReplyMarkup {
                chat_id,
                message_id,
                reply_markup: InlineKeyboardMarkup {
                    inline_keyboard: Vec::new(),
                },
            },
        )
        .await
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn call<P: Serialize>(&self, method: &str, payload: &P) -> Result<()> {
        let response = self
            .client
            .post(self.method_url(method))
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| anyhow!("telegram {method} request failed: {e}"))?;

        if let Err(e) = response.error_for_status_ref() {
            return Err(anyhow!("telegram {method} HTTP error: {e}"));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Serialize)]
struct AnswerCallbackQuery<'a> {
    callback_query_id: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct EditMessageReplyMarkup {
    chat_id: i64,
    message_id: i64,
    reply_markup: InlineKeyboardMarkup,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn single_button(button: InlineKeyboardButton) -> Self {
        Self {
            inline_keyboard: vec![vec![button]],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: data.into(),
        }
    }
}

//! HTTP client for the Bot API

use super::types::{
    ApiResponse, GetUpdatesRequest, ReplyKeyboardMarkup, SendMessageRequest, Update,
};
use super::{ReplySink, TelegramError, UpdateSource};
use crate::message::OutboundReply;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Headroom on top of the long-poll wait before the HTTP request times out
const POLL_GRACE: Duration = Duration::from_secs(10);

pub struct TelegramClient {
    client: Client,
    /// `{api_base}/bot{token}`; never logged
    method_base: String,
}

impl TelegramClient {
    pub fn new(token: &str, api_base: &str, poll_timeout: Duration) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(poll_timeout + POLL_GRACE)
            .build()
            .map_err(|e| TelegramError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            method_base: format!("{}/bot{token}", api_base.trim_end_matches('/')),
        })
    }

    async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, TelegramError>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{method}", self.method_base))
            .json(params)
            .send()
            .await
            // The URL carries the bot token
            .map_err(|e| TelegramError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TelegramError::Network(e.without_url().to_string()))?;

        decode(method, status, &body)
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<ReplyKeyboardMarkup>,
    ) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            reply_markup,
        };
        // The sent message is echoed back; nothing in it is needed
        let _: serde_json::Value = self.call("sendMessage", &request).await?;
        Ok(())
    }
}

/// Unwrap the Bot API envelope around a method's result
fn decode<R: DeserializeOwned>(
    method: &str,
    status: StatusCode,
    body: &str,
) -> Result<R, TelegramError> {
    let envelope: ApiResponse<R> = serde_json::from_str(body).map_err(|e| {
        if status.is_success() {
            TelegramError::Parse(format!("{method}: {e}"))
        } else {
            TelegramError::Api(format!("{method}: HTTP {status}"))
        }
    })?;

    if !envelope.ok {
        let description = envelope
            .description
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(TelegramError::Api(format!("{method}: {description}")));
    }

    envelope
        .result
        .ok_or_else(|| TelegramError::Parse(format!("{method}: missing result")))
}

#[async_trait]
impl UpdateSource for TelegramClient {
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
        };
        self.call("getUpdates", &request).await
    }
}

#[async_trait]
impl ReplySink for TelegramClient {
    async fn send_reply(&self, reply: &OutboundReply) -> Result<(), TelegramError> {
        self.send_message(
            reply.conversation_id.0,
            &reply.text,
            reply.keyboard.as_ref().map(ReplyKeyboardMarkup::from),
        )
        .await
    }
}

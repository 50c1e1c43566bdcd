//! WebSocket frame DTOs.
//!
//! Every frame is a JSON text message of the form `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding a client frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Malformed frame: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),
}

/// Raw envelope shared by every frame.
#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Payload of `set-username`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetUsernamePayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    SetUsername(SetUsernamePayload),
    Typing,
    StopTyping,
    /// `None` when the payload is missing or not a string.
    NewMessage(Option<String>),
}

impl ClientEvent {
    /// Decode a text frame.
    pub fn parse(frame: &str) -> Result<Self, FrameError> {
        let Envelope { event, data } = serde_json::from_str(frame)?;

        match event.as_str() {
            "set-username" if data.is_null() => Ok(Self::SetUsername(SetUsernamePayload::default())),
            "set-username" => Ok(Self::SetUsername(serde_json::from_value(data)?)),
            "typing" => Ok(Self::Typing),
            "stop-typing" => Ok(Self::StopTyping),
            "new-message" => Ok(Self::NewMessage(data.as_str().map(str::to_owned))),
            _ => Err(FrameError::UnknownEvent(event)),
        }
    }
}

/// Chat message as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub username: String,
    pub text: String,
    /// RFC 3339, UTC
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserJoinedPayload {
    pub username: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLeftPayload {
    pub username: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingPayload {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRejectedPayload {
    pub error: String,
}

/// Events sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    UserJoined(UserJoinedPayload),
    UpdateUsers(Vec<String>),
    #[serde(rename = "last-20-messages")]
    Last20Messages(Vec<ChatMessageDto>),
    Typing(TypingPayload),
    StopTyping(TypingPayload),
    Message(ChatMessageDto),
    UserLeft(UserLeftPayload),
    JoinRejected(JoinRejectedPayload),
}

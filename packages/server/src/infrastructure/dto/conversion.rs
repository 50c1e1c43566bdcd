//! Conversion logic between domain models and DTOs.

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatEvent, ChatMessage};
use crate::infrastructure::dto::websocket as dto;

impl From<&ChatMessage> for dto::ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            username: model.username.clone(),
            text: model.text.clone(),
            timestamp: timestamp_to_rfc3339(model.timestamp.value()),
        }
    }
}

impl From<&ChatEvent> for dto::ServerEvent {
    fn from(event: &ChatEvent) -> Self {
        match event {
            ChatEvent::UserJoined { username, message } => {
                Self::UserJoined(dto::UserJoinedPayload {
                    username: username.to_string(),
                    message: message.clone(),
                    kind: dto::NoticeKind::System,
                })
            }
            ChatEvent::PresenceUpdated(usernames) => {
                Self::UpdateUsers(usernames.iter().map(ToString::to_string).collect())
            }
            ChatEvent::History(messages) => {
                Self::Last20Messages(messages.iter().map(Into::into).collect())
            }
            ChatEvent::Typing { username } => Self::Typing(dto::TypingPayload {
                username: username.to_string(),
            }),
            ChatEvent::StopTyping { username } => Self::StopTyping(dto::TypingPayload {
                username: username.to_string(),
            }),
            ChatEvent::MessagePosted(message) => Self::Message(message.into()),
            ChatEvent::UserLeft { username, message } => Self::UserLeft(dto::UserLeftPayload {
                username: username.to_string(),
                message: message.clone(),
            }),
            ChatEvent::JoinRejected { reason } => Self::JoinRejected(dto::JoinRejectedPayload {
                error: reason.to_string(),
            }),
        }
    }
}

/// Encode a domain event as a WebSocket text frame.
pub fn encode_event(event: &ChatEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::ServerEvent::from(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NameValidationError, Timestamp, validate_name};
    use serde_json::json;

    #[test]
    fn test_chat_message_to_dto() {
        // テスト項目: ドメインのメッセージが RFC 3339 のタイムスタンプを持つ DTO に変換される
        // given (前提条件):
        let message = ChatMessage::new("Ann Lee", "hello", Timestamp::new(1672531200123));

        // when (操作):
        let dto_msg = dto::ChatMessageDto::from(&message);

        // then (期待する結果):
        assert_eq!(dto_msg.username, "Ann Lee");
        assert_eq!(dto_msg.text, "hello");
        assert_eq!(dto_msg.timestamp, "2023-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_encode_joined_others_event() {
        // テスト項目: 他の参加者向けの参加通知がワイヤーフォーマットにエンコードされる
        // given (前提条件):
        let username = validate_name(Some("Ann"), Some("Lee")).unwrap();
        let event = ChatEvent::joined_others(username);

        // when (操作):
        let frame: serde_json::Value = serde_json::from_str(&encode_event(&event).unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(
            frame,
            json!({
                "event": "user-joined",
                "data": {"username": "Ann Lee", "message": "Ann Lee joined", "type": "system"}
            })
        );
    }

    #[test]
    fn test_encode_presence_and_left_events() {
        // テスト項目: オンライン一覧と退出通知がエンコードされる
        // given (前提条件):
        let ann = validate_name(Some("Ann"), Some("Lee")).unwrap();
        let bob = validate_name(Some("Bob"), Some("Ray")).unwrap();

        // when (操作):
        let presence = encode_event(&ChatEvent::PresenceUpdated(vec![ann.clone(), bob])).unwrap();
        let left = encode_event(&ChatEvent::left(ann)).unwrap();

        // then (期待する結果):
        let presence: serde_json::Value = serde_json::from_str(&presence).unwrap();
        let left: serde_json::Value = serde_json::from_str(&left).unwrap();
        assert_eq!(
            presence,
            json!({"event": "update-users", "data": ["Ann Lee", "Bob Ray"]})
        );
        assert_eq!(
            left,
            json!({"event": "user-left", "data": {"username": "Ann Lee", "message": "Ann Lee left"}})
        );
    }

    #[test]
    fn test_encode_join_rejected_event() {
        // テスト項目: 参加拒否の理由が人が読めるメッセージとしてエンコードされる
        // given (前提条件):
        let event = ChatEvent::JoinRejected {
            reason: NameValidationError::TooShort,
        };

        // when (操作):
        let frame: serde_json::Value = serde_json::from_str(&encode_event(&event).unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(frame["event"], "join-rejected");
        assert_eq!(
            frame["data"]["error"],
            "First name and last name must be at least 2 characters long"
        );
    }
}

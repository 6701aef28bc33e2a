use thiserror::Error;

use batepapo_types::api::{RegisterRequest, SendMessageRequest};
use batepapo_types::models::MessageKind;

use crate::sanitize::sanitize;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is required")]
    Missing(&'static str),
    #[error("'type' must be 'message' or 'private_message', got '{0}'")]
    InvalidKind(String),
    #[error("malformed body: {0}")]
    Malformed(String),
}

/// A message a client is allowed to send: sanitized, non-empty, and never a
/// status notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
}

/// Sanitize and check a registration payload, returning the participant name.
pub fn validate_participant(req: &RegisterRequest) -> Result<String, ValidationError> {
    required(req.name.as_deref(), "name")
}

/// Sanitize and check a send-message payload.
pub fn validate_message(req: &SendMessageRequest) -> Result<OutgoingMessage, ValidationError> {
    let to = required(req.to.as_deref(), "to")?;
    let text = required(req.text.as_deref(), "text")?;
    let kind = required(req.kind.as_deref(), "type")?;

    let kind = match kind.parse::<MessageKind>() {
        Ok(k @ (MessageKind::Message | MessageKind::PrivateMessage)) => k,
        _ => return Err(ValidationError::InvalidKind(kind)),
    };

    Ok(OutgoingMessage { to, text, kind })
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    let clean = value.map(sanitize).unwrap_or_default();
    if clean.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: Option<&str>, text: Option<&str>, kind: Option<&str>) -> SendMessageRequest {
        SendMessageRequest {
            to: to.map(String::from),
            text: text.map(String::from),
            kind: kind.map(String::from),
        }
    }

    #[test]
    fn participant_name_is_sanitized() {
        let req = RegisterRequest { name: Some(" <b>Ana</b> ".into()) };
        assert_eq!(validate_participant(&req), Ok("Ana".to_string()));
    }

    #[test]
    fn participant_name_must_survive_sanitizing() {
        let missing = RegisterRequest { name: None };
        let blank = RegisterRequest { name: Some("  <i></i> ".into()) };
        assert_eq!(validate_participant(&missing), Err(ValidationError::Missing("name")));
        assert_eq!(validate_participant(&blank), Err(ValidationError::Missing("name")));
    }

    #[test]
    fn accepts_public_and_private_messages() {
        let public = validate_message(&message(Some("Todos"), Some("oi"), Some("message"))).unwrap();
        assert_eq!(public.kind, MessageKind::Message);

        let private =
            validate_message(&message(Some("Bia"), Some(" <b>psiu</b>"), Some("private_message")))
                .unwrap();
        assert_eq!(
            private,
            OutgoingMessage {
                to: "Bia".into(),
                text: "psiu".into(),
                kind: MessageKind::PrivateMessage,
            }
        );
    }

    #[test]
    fn rejects_status_and_unknown_types() {
        assert_eq!(
            validate_message(&message(Some("Todos"), Some("oi"), Some("status"))),
            Err(ValidationError::InvalidKind("status".into()))
        );
        assert_eq!(
            validate_message(&message(Some("Todos"), Some("oi"), Some("shout"))),
            Err(ValidationError::InvalidKind("shout".into()))
        );
    }

    #[test]
    fn every_field_is_required() {
        assert_eq!(
            validate_message(&message(None, Some("oi"), Some("message"))),
            Err(ValidationError::Missing("to"))
        );
        assert_eq!(
            validate_message(&message(Some("Todos"), Some("   "), Some("message"))),
            Err(ValidationError::Missing("text"))
        );
        assert_eq!(
            validate_message(&message(Some("Todos"), Some("oi"), None)),
            Err(ValidationError::Missing("type"))
        );
    }
}

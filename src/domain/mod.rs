use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::AlertError;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0}")]
    Backend(String),
    #[error("notification worker failed: {0}")]
    Worker(String),
}

/// One alert as requested by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

impl NotificationRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into(), icon: None, sound: None }
    }

    /// Coerce untyped tool arguments into a request. `title` and `message`
    /// must be present, strings, and non-blank.
    pub fn from_arguments(arguments: &serde_json::Value) -> Result<Self, AlertError> {
        let req: NotificationRequest = serde_json::from_value(arguments.clone())?;
        if req.title.trim().is_empty() {
            return Err(AlertError::ArgumentParse("title must not be empty".into()));
        }
        if req.message.trim().is_empty() {
            return Err(AlertError::ArgumentParse("message must not be empty".into()));
        }
        Ok(req)
    }

    /// Icon path, treating an empty string as absent.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref().filter(|s| !s.is_empty())
    }
}

/// OS notification capability.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_required_and_optional_fields() {
        let req = NotificationRequest::from_arguments(&json!({
            "title": "Build", "message": "Build finished", "icon": "/tmp/i.png", "sound": "beep"
        }))
        .unwrap();
        assert_eq!(req.title, "Build");
        assert_eq!(req.icon(), Some("/tmp/i.png"));
        assert_eq!(req.sound.as_deref(), Some("beep"));
    }

    #[test]
    fn rejects_missing_message() {
        let err = NotificationRequest::from_arguments(&json!({"title": "x"})).unwrap_err();
        assert!(err.to_string().contains("missing field `message`"), "got: {err}");
    }

    #[test]
    fn rejects_non_string_title() {
        let err = NotificationRequest::from_arguments(&json!({"title": 7, "message": "m"})).unwrap_err();
        assert!(matches!(err, AlertError::ArgumentParse(_)));
    }

    #[test]
    fn rejects_blank_title() {
        let err = NotificationRequest::from_arguments(&json!({"title": "  ", "message": "m"})).unwrap_err();
        assert!(err.to_string().contains("title must not be empty"));
    }

    #[test]
    fn empty_icon_counts_as_absent() {
        let mut req = NotificationRequest::new("t", "m");
        req.icon = Some(String::new());
        assert_eq!(req.icon(), None);
    }
}

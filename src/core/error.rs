use thiserror::Error;

/// Failures the alert tool surfaces to its caller.
///
/// Sound playback failures have no variant here; they are only logged.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Failed to parse alert request: {0}")]
    ArgumentParse(String),
    #[error("Failed to send notification: {0}")]
    NotificationDelivery(String),
}

impl From<serde_json::Error> for AlertError {
    fn from(e: serde_json::Error) -> Self {
        AlertError::ArgumentParse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_displays_stage_prefixes() {
        let e = AlertError::ArgumentParse("missing field `title`".into());
        assert_eq!(e.to_string(), "Failed to parse alert request: missing field `title`");
        let e = AlertError::NotificationDelivery("no bus".into());
        assert_eq!(e.to_string(), "Failed to send notification: no bus");
    }

    #[test]
    fn it_converts_from_serde_json() {
        let bad = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let e: AlertError = bad.into();
        assert!(matches!(e, AlertError::ArgumentParse(_)));
    }
}

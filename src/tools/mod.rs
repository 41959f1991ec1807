pub mod alert;
pub mod hook;
pub mod tool_router;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use crate::domain::{NotificationRequest, Notifier, NotifyError};
    use crate::sound::testing::RecordingBackend;
    use crate::sound::SoundPlayer;

    use super::alert::AlertTool;

    /// Notifier that records requests, optionally failing every call.
    #[derive(Default)]
    pub struct RecordingNotifier {
        sent: Mutex<Vec<NotificationRequest>>,
        failure: Option<String>,
    }

    impl RecordingNotifier {
        pub fn failing(reason: &str) -> Self {
            Self { failure: Some(reason.to_owned()), ..Default::default() }
        }

        pub fn sent(&self) -> Vec<NotificationRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
            if let Some(reason) = &self.failure {
                return Err(NotifyError::Backend(reason.clone()));
            }
            self.sent.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    /// Alert tool wired to recording fakes.
    pub fn silent_tool() -> Arc<AlertTool> {
        Arc::new(AlertTool::new(
            Arc::new(RecordingNotifier::default()),
            SoundPlayer::new(Arc::new(RecordingBackend::default())),
        ))
    }
}

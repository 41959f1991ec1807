//! Desktop notifications through `notify-rust`.

use std::time::Duration;

use notify_rust::{Notification, Timeout};

use crate::domain::{NotificationRequest, Notifier, NotifyError};
use crate::infra::config::NotificationConfig;

#[derive(Clone, Debug)]
pub struct DesktopNotifier {
    app_name: String,
    timeout: Option<Duration>,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self { app_name: app_name.into(), timeout: None }
    }

    pub fn from_config(cfg: &NotificationConfig) -> Self {
        Self {
            app_name: cfg.app_name.clone(),
            timeout: cfg.timeout_ms.map(Duration::from_millis),
        }
    }

    fn timeout(&self) -> Timeout {
        match self.timeout {
            Some(d) => Timeout::Milliseconds(u32::try_from(d.as_millis()).unwrap_or(u32::MAX)),
            None => Timeout::Default,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        let app_name = self.app_name.clone();
        let timeout = self.timeout();
        let title = request.title.clone();
        let message = request.message.clone();
        let icon = request.icon().map(str::to_owned);
        tracing::debug!(app = %app_name, title = %title, "showing desktop notification");

        // notify-rust blocks on the platform notification service.
        tokio::task::spawn_blocking(move || {
            let mut notification = Notification::new();
            notification
                .appname(&app_name)
                .summary(&title)
                .body(&message)
                .timeout(timeout);
            if let Some(icon) = icon.as_deref() {
                notification.icon(icon);
            }
            notification
                .show()
                .map(|_| ())
                .map_err(|e| NotifyError::Backend(e.to_string()))
        })
        .await
        .map_err(|e| NotifyError::Worker(e.to_string()))?
    }
}

//! The `send_notification` request handler.

use std::sync::Arc;
use std::time::Instant;

use serde_json::json;

use crate::clients::desktop::DesktopNotifier;
use crate::core::content::ToolOutcome;
use crate::core::error::AlertError;
use crate::core::tool::ToolSpec;
use crate::domain::{NotificationRequest, Notifier};
use crate::infra::config::Config;
use crate::infra::logging::log_metric;
use crate::sound::{SoundPlayer, EMBEDDED_MARKER};

pub const TOOL_NAME: &str = "send_notification";
pub const TOOL_DESCRIPTION: &str = "Send a desktop alert notification (typically more urgent)";

/// Schema advertised to callers. `icon` and `sound` are accepted but not advertised.
pub fn send_notification_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "description": "The title of the alert" },
            "message": { "type": "string", "description": "The alert message content" }
        },
        "required": ["title", "message"]
    })
}

pub struct AlertTool {
    notifier: Arc<dyn Notifier>,
    player: SoundPlayer,
    alert_sound: String,
}

impl AlertTool {
    pub fn new(notifier: Arc<dyn Notifier>, player: SoundPlayer) -> Self {
        Self { notifier, player, alert_sound: EMBEDDED_MARKER.into() }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let notifier = Arc::new(DesktopNotifier::from_config(&cfg.notification));
        Self::new(notifier, SoundPlayer::system())
            .with_alert_sound(cfg.sound.effective_alert_sound())
    }

    /// Sound played after every tool-driven alert; the caller's `sound` is ignored.
    pub fn with_alert_sound(mut self, specifier: impl Into<String>) -> Self {
        self.alert_sound = specifier.into();
        self
    }

    /// Handle one tool call. Always yields exactly one outcome.
    pub async fn handle(&self, arguments: &serde_json::Value) -> ToolOutcome {
        let request = match NotificationRequest::from_arguments(arguments) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(error = %e, "rejecting send_notification call");
                return ToolOutcome::error(e.to_string());
            }
        };
        if request.sound.as_deref().is_some_and(|s| s != self.alert_sound) {
            tracing::debug!(requested = ?request.sound, "ignoring caller sound, using alert sound");
        }
        match self.deliver(&request, &self.alert_sound).await {
            Ok(()) => ToolOutcome::success(format!("Successfully sent alert: '{}'", request.title)),
            Err(e) => ToolOutcome::error(e.to_string()),
        }
    }

    /// Show the notification, then play `sound`. Playback problems are
    /// logged and never fail the delivery.
    pub async fn deliver(&self, request: &NotificationRequest, sound: &str) -> Result<(), AlertError> {
        tracing::info!(title = %request.title, "sending alert");
        if let Err(e) = self.notifier.notify(request).await {
            log_metric(TOOL_NAME, "notify_error_total", 1.0);
            tracing::error!(error = %e, title = %request.title, "notification failed");
            return Err(AlertError::NotificationDelivery(e.to_string()));
        }

        let start = Instant::now();
        match self.player.play(sound).await {
            Ok(()) => {
                let elapsed_ms = start.elapsed().as_millis() as f64;
                log_metric(TOOL_NAME, "sound_latency_ms", elapsed_ms);
            }
            Err(e) => {
                log_metric(TOOL_NAME, "playback_error_total", 1.0);
                tracing::warn!(error = %e, sound, "Failed to play sound");
            }
        }
        Ok(())
    }
}

impl ToolSpec for AlertTool {
    fn name(&self) -> &'static str {
        TOOL_NAME
    }
    fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }
    fn input_schema(&self) -> serde_json::Value {
        send_notification_schema()
    }
}

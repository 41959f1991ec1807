//! Agent hook events turned into alerts.
//!
//! The coding agent invokes `desktop-alert hook` with one JSON event on
//! stdin; the event is summarised into a title/message pair.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::sound::EMBEDDED_MARKER;

const AGENT: &str = "Claude Code";
const PROMPT_PREVIEW_CHARS: usize = 50;
const INSTRUCTIONS_PREVIEW_CHARS: usize = 30;
const CWD_TAIL_CHARS: usize = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub transcript_path: String,
    #[serde(default)]
    pub cwd: String,
    #[serde(default)]
    pub hook_event_name: String,
    pub tool_name: Option<String>,
    pub tool_input: Option<JsonValue>,
    pub tool_response: Option<JsonValue>,
    pub message: Option<String>,
    pub prompt: Option<String>,
    pub trigger: Option<String>,
    pub source: Option<String>,
    pub reason: Option<String>,
    pub stop_hook_active: Option<bool>,
    pub custom_instructions: Option<String>,
}

impl HookInput {
    fn tool(&self) -> &str {
        self.tool_name.as_deref().unwrap_or_default()
    }

    fn command(&self) -> Option<&str> {
        self.tool_input
            .as_ref()
            .and_then(|v| v.get("command"))
            .and_then(JsonValue::as_str)
            .filter(|c| !c.is_empty())
    }

    fn hook_active(&self) -> bool {
        self.stop_hook_active.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub message: String,
    pub sound: Option<String>,
}

/// Non-empty value of an optional string field.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// First `max` chars followed by `...`, or the whole string if it fits.
fn preview(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max).collect::<String>())
    } else {
        s.to_owned()
    }
}

fn shorten_cwd(cwd: &str) -> String {
    let len = cwd.chars().count();
    if len > CWD_TAIL_CHARS {
        format!("...{}", cwd.chars().skip(len - CWD_TAIL_CHARS).collect::<String>())
    } else {
        cwd.to_owned()
    }
}

fn with_command(message: String, input: &HookInput) -> String {
    match input.command() {
        Some(cmd) => format!("{message}: {cmd}"),
        None => message,
    }
}

pub fn notification_content(input: &HookInput, no_sound: bool) -> NotificationContent {
    let event = input.hook_event_name.as_str();
    let (title, mut message) = match event {
        "PreToolUse" => (
            format!("[PreToolUse] {AGENT}: {}", input.tool()),
            with_command(format!("Preparing to run {}", input.tool()), input),
        ),
        "PostToolUse" => (
            format!("[PostToolUse] ✓ {} Completed", input.tool()),
            with_command(format!("{} tool finished executing", input.tool()), input),
        ),
        "UserPromptSubmit" => (
            format!("[UserPromptSubmit] {AGENT}"),
            match present(&input.prompt) {
                Some(prompt) => format!("Processing: {}", preview(prompt, PROMPT_PREVIEW_CHARS)),
                None => "Processing your request...".to_owned(),
            },
        ),
        "Notification" => (
            format!("[Notification] {AGENT} Notification"),
            with_command(
                present(&input.message).unwrap_or("Notification received").to_owned(),
                input,
            ),
        ),
        "Stop" => (
            format!("[Stop] {AGENT}"),
            if input.hook_active() {
                "Response completed (hook active)".to_owned()
            } else {
                "Response completed".to_owned()
            },
        ),
        "SubagentStop" => (
            format!("[SubAgentStop] {AGENT} Subagent"),
            if input.hook_active() {
                "Subagent task completed (hook active)".to_owned()
            } else {
                "Subagent task completed".to_owned()
            },
        ),
        "SessionStart" => (
            format!("[SessionStart] {AGENT} Session"),
            match present(&input.source) {
                Some(source) => format!("Session started ({source})"),
                None => "Session started".to_owned(),
            },
        ),
        "SessionEnd" => (
            format!("[SessionEnd] {AGENT} Session"),
            match present(&input.reason) {
                Some(reason) => format!("Session ended: {reason}"),
                None => "Session ended".to_owned(),
            },
        ),
        "PreCompact" => {
            let mut message = match present(&input.trigger) {
                Some(trigger) => format!("Starting compact ({trigger})"),
                None => "Starting context compaction".to_owned(),
            };
            if let Some(instructions) = present(&input.custom_instructions) {
                message = format!("{message}: {}", preview(instructions, INSTRUCTIONS_PREVIEW_CHARS));
            }
            (AGENT.to_owned(), message)
        }
        _ => {
            let mut message = if event.is_empty() {
                "Hook event triggered".to_owned()
            } else {
                format!("Event: {event}")
            };
            if let Some(tool) = present(&input.tool_name) {
                message = format!("{message} (Tool: {tool})");
            }
            (format!("{event} {AGENT} Hook"), message)
        }
    };

    if !input.cwd.is_empty() {
        message = format!("{message}\n\ncwd: {}", shorten_cwd(&input.cwd));
    }

    NotificationContent {
        title,
        message,
        sound: (!no_sound).then(|| EMBEDDED_MARKER.to_owned()),
    }
}

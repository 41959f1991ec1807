//! Tool result model, independent of the MCP wire types.

use rmcp::model::{CallToolResult, Content};

/// Outcome of one tool call: an error flag plus ordered text segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub is_error: bool,
    pub content: Vec<String>,
}

impl ToolOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self { is_error: false, content: vec![text.into()] }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { is_error: true, content: vec![text.into()] }
    }

    /// First text segment, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.first().map(String::as_str)
    }
}

impl From<ToolOutcome> for CallToolResult {
    fn from(outcome: ToolOutcome) -> Self {
        let content: Vec<Content> = outcome.content.into_iter().map(Content::text).collect();
        if outcome.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

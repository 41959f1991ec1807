use std::future::Future;
use std::sync::Arc;

use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{CallToolResult, Implementation, JsonObject, ServerCapabilities, ServerInfo};

use crate::core::tool::schema_object;
use crate::infra::runtime::mcp_transport::ServerHandler;
use crate::tools::alert::{send_notification_schema, AlertTool};

/// MCP face of the alert tool.
#[derive(Clone)]
pub struct AlertSvc {
    tool: Arc<AlertTool>,
}

impl AlertSvc {
    pub fn new(tool: Arc<AlertTool>) -> Self {
        Self { tool }
    }
}

impl ServerHandler for AlertSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "desktop-alert".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::default()
            },
            instructions: Some("Call send_notification to raise a desktop alert with a sound cue.".into()),
            ..ServerInfo::default()
        }
    }
}

fn advertised_schema() -> Arc<JsonObject> {
    Arc::new(schema_object(send_notification_schema()))
}

#[rmcp::tool_router]
impl AlertSvc {
    #[rmcp::tool(
        name = "send_notification",
        description = "Send a desktop alert notification (typically more urgent)",
        input_schema = advertised_schema()
    )]
    async fn send_notification(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        tracing::debug!(params = ?params.0, "send_notification invoked");
        let outcome = self.tool.handle(&serde_json::Value::Object(params.0)).await;
        Ok(outcome.into())
    }
}

pub type AlertRouter = ToolRouter<AlertSvc>;

impl AlertSvc {
    pub fn router() -> AlertRouter {
        // Wrapper to expose the macro-generated private tool_router
        Self::tool_router()
    }
}

/// `(handler, router)` pair for the transports.
pub fn factory(tool: Arc<AlertTool>) -> impl Fn() -> (AlertSvc, AlertRouter) + Clone + Send + Sync + 'static {
    move || (AlertSvc::new(tool.clone()), AlertSvc::router())
}

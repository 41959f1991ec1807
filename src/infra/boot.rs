use std::net::SocketAddr;
use std::sync::Arc;

use crate::infra::config::{Config, Mode};
use crate::tools::alert::AlertTool;
use crate::tools::tool_router;

/// Run the MCP server in the configured mode until the client or listener stops.
pub async fn run_server(cfg: &Config) -> anyhow::Result<()> {
    tracing::info!(
        mode = %cfg.mode,
        host = %cfg.host,
        port = cfg.port,
        sound = cfg.sound.effective_alert_sound(),
        "BOOT desktop-alert"
    );
    let tool = Arc::new(AlertTool::from_config(cfg));

    match cfg.mode {
        Mode::Stdio => {
            crate::infra::runtime::mcp_transport::serve_stdio(tool_router::factory(tool))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        Mode::Http => {
            let app = crate::infra::http_app::build_app(tool);
            let addr = SocketAddr::new(cfg.host, cfg.port);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "listening for streamable HTTP MCP on /mcp");
            axum::serve(listener, app).await?;
        }
    }
    Ok(())
}

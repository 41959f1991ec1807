use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tokio::io::AsyncReadExt;

use crate::core::error::AlertError;
use crate::domain::NotificationRequest;
use crate::infra::config::{Config, ConfigError, Mode};
use crate::infra::http::headers::add_standard_headers;
use crate::sound::EMBEDDED_MARKER;
use crate::tools::alert::AlertTool;
use crate::tools::hook::{notification_content, HookInput, NotificationContent};

#[derive(Parser)]
#[command(name = "desktop-alert")]
#[command(about = "Desktop alerts with sound, as an MCP tool or from the command line")]
#[command(version)]
pub struct Cli {
    /// Show debug output on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server (default when no command is given)
    Serve {
        /// Transport: stdio or http (overrides MODE)
        #[arg(long)]
        mode: Option<String>,
        /// HTTP port (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Send one alert and exit
    Send {
        /// Title of the notification
        #[arg(short, long)]
        title: String,
        /// Message content of the notification
        #[arg(short, long)]
        message: String,
        /// Path to an icon file
        #[arg(short, long)]
        icon: Option<String>,
        /// Sound: "beep", "system", "beep:<hz>", "@sound.wav", a file path, or "" for silence
        #[arg(short, long, default_value = EMBEDDED_MARKER)]
        sound: String,
    },
    /// Read an agent hook event (JSON) from stdin and raise an alert for it
    Hook {
        /// Do not play a sound
        #[arg(long)]
        no_sound: bool,
    },
    /// Health check a server running in http mode
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://127.0.0.1:8080")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::infra::logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Serve { mode: None, port: None });
    run_commands(command).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve { mode, port } => {
            let cfg = match serve_config(mode, port) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("❌ {}", e);
                    return ExitCode::FAILURE;
                }
            };
            match crate::infra::boot::run_server(&cfg).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!(error = %e, "server stopped");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Send { title, message, icon, sound } => {
            let tool = AlertTool::from_config(&Config::from_env());
            let mut request = NotificationRequest::new(title, message);
            request.icon = icon;
            match send(&tool, &request, &sound).await {
                Ok(()) => {
                    println!("✅ Notification sent: '{}'", request.title);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("❌ {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Hook { no_sound } => {
            let mut raw = String::new();
            if let Err(e) = tokio::io::stdin().read_to_string(&mut raw).await {
                eprintln!("❌ failed to read hook input: {}", e);
                return ExitCode::FAILURE;
            }
            let tool = AlertTool::from_config(&Config::from_env());
            match run_hook(&tool, &raw, no_sound).await {
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("❌ {:#}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match validate_config() {
            Ok(cfg) => {
                println!("✅ Configuration is valid (mode={}, {}:{})", cfg.mode, cfg.host, cfg.port);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn serve_config(mode: Option<String>, port: Option<u16>) -> Result<Config, ConfigError> {
    let mut cfg = Config::from_env();
    if let Some(mode) = mode {
        cfg.mode = mode.parse::<Mode>()?;
    }
    if let Some(port) = port {
        if port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        cfg.port = port;
    }
    Ok(cfg)
}

async fn send(tool: &AlertTool, request: &NotificationRequest, sound: &str) -> Result<(), AlertError> {
    if request.title.trim().is_empty() || request.message.trim().is_empty() {
        return Err(AlertError::ArgumentParse("both --title and --message are required".into()));
    }
    tool.deliver(request, sound).await
}

/// Format a hook event and deliver it. Returns what was shown.
pub async fn run_hook(tool: &AlertTool, raw: &str, no_sound: bool) -> anyhow::Result<NotificationContent> {
    use anyhow::Context;

    tracing::debug!(input = %raw, "received hook input");
    let input: HookInput = serde_json::from_str(raw).context("invalid hook input")?;
    tracing::debug!(event = %input.hook_event_name, tool = ?input.tool_name, "parsed hook event");

    let content = notification_content(&input, no_sound);
    let request = NotificationRequest::new(content.title.clone(), content.message.clone());
    tool.deliver(&request, content.sound.as_deref().unwrap_or_default())
        .await?;
    Ok(content)
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let (builder, rid) = add_standard_headers(client.get(format!("{}/healthz", url)), None);
    tracing::debug!(request_id = %rid, url, "health check");
    let response = builder
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<Config, ConfigError> {
    Config::try_from_env()
}

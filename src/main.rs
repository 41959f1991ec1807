use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    desktop_alert::cli::run().await
}

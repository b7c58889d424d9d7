use clap::Parser;
use dotenvy::dotenv;
use service_core::observability::logging::init_tracing;
use staff_portal::cli::{execute, render_error, Cli};
use staff_portal::config::{get_configuration, get_configuration_from};
use staff_portal::startup::build_state;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    let configuration = match &cli.config {
        Some(dir) => get_configuration_from(dir),
        None => get_configuration(),
    };
    let configuration = match configuration {
        Ok(configuration) => configuration,
        Err(e) => {
            eprintln!("Failed to read configuration: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    if let Err(e) = init_tracing(
        "staff-portal",
        &configuration.telemetry.log_level,
        configuration.telemetry.json,
        configuration.telemetry.otlp_endpoint.as_deref(),
    ) {
        eprintln!("Failed to initialize tracing: {}", e);
    }

    let state = match build_state(&configuration) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", render_error(&e));
            return ExitCode::from(e.exit_code());
        }
    };

    let mut stdout = std::io::stdout().lock();
    match execute(cli.command, &state, &mut stdout).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{}", render_error(&e));
            if !e.is_user_correctable() {
                eprintln!("Run with RUST_LOG=staff_portal=debug for details.");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

use korektor::commands::deep_link::{DeepLinkListener, apply_launch_url};
use korektor::commands::process_text::{process_text, write_output};
use korektor::error::KorektorError;
use korektor::logger::initialize as LoggerInitialize;
use korektor::session::Session;
use korektor::shell;

use client_core::clipboard::SystemClipboard;
use client_core::config::CorrectionSettings;
use client_core::correction::CorrectionService;
use client_core::credential_store::FileCredentialStore;
use client_core::paths::detect_data_paths;

use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::io::{AsyncReadExt, BufReader};

const PROCESS_TEXT_FLAG: &str = "--process-text";

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == PROCESS_TEXT_FLAG) {
        return run_process_text().await;
    }

    let launch_url = args.into_iter().find(|arg| !arg.starts_with("--"));

    match run_interactive(launch_url).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Korektor failed: {}", e);
            eprintln!("korektor: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run_interactive(launch_url: Option<String>) -> Result<(), KorektorError> {
    let session = build_session()?;
    info!("Korektor starting");

    if let Some(url) = launch_url {
        apply_launch_url(&session, &url).await?;
    }

    if !SystemClipboard::available() {
        warn!("No system clipboard available; :copy will fail");
    }

    let _listener = DeepLinkListener::spawn(&session);

    shell::run(
        &session,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}

/// Selection in on stdin, text out on stdout. Never fails on a correction error.
async fn run_process_text() -> ExitCode {
    let mut selection = String::new();
    if let Err(e) = tokio::io::stdin().read_to_string(&mut selection).await {
        eprintln!("korektor: failed to read selection: {e}");
        return ExitCode::FAILURE;
    }

    let output = match build_session() {
        Ok(session) => process_text(&session, &selection).await,
        Err(e) => {
            error!("Process-text setup failed: {}", e);
            selection
        }
    };

    match write_output(&mut tokio::io::stdout(), &output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to hand back processed text: {}", e);
            eprintln!("korektor: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn build_session() -> Result<Session, KorektorError> {
    let paths = detect_data_paths()?;
    paths.ensure_dirs()?;

    // Initialize logger FIRST
    LoggerInitialize(&paths.log_dir)?;
    info!("Data directory: {} ({})", paths.data_dir.display(), paths.source);

    let settings = CorrectionSettings::from_env()?;
    let service = CorrectionService::new(settings)?;
    let store = FileCredentialStore::new(&paths.credential_file);

    Ok(Session::new(
        Arc::new(store),
        service,
        Arc::new(SystemClipboard::new()),
    ))
}

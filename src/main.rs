// src/main.rs

use clap::Parser;
use repo_slice::cli::Cli;
use repo_slice::command::SystemRunner;
use repo_slice::config::ConfigBuilder;
use repo_slice::errors::Error;
#[cfg(feature = "progress")]
use repo_slice::progress::SpinnerIndicator;
use repo_slice::progress::{LoadingIndicator, NoOpIndicator};
use repo_slice::prompt::{LinePrompt, Prompt, TerminalPrompt};
use repo_slice::run;
use std::io;

fn main() {
    // Credentials usually live in a .env file next to the project folders.
    let dotenv_path = dotenvy::dotenv().ok();

    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if cfg!(debug_assertions) {
                    "repo_slice=debug".parse().unwrap()
                } else {
                    "repo_slice=info".parse().unwrap()
                },
            ),
        )
        .init();

    log::info!("Starting repo-slice v{}...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv_path {
        log::debug!("Loaded environment from {}", path.display());
    }

    if let Err(e) = try_main() {
        eprintln!("\nError: {}", e);
        // Pipeline stages already explained the failure on stdout.
        if !e.is_pipeline_error() {
            if let Some(hint) = e.likely_causes() {
                eprintln!("{}", hint);
            }
        }
        std::process::exit(e.exit_code());
    }
}

fn try_main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = ConfigBuilder::from_cli(cli).build()?;
    log::debug!("Configuration built successfully.");

    let interactive = is_terminal(Stream::Stdin);
    let stdin = io::stdin();
    let mut prompt: Box<dyn Prompt> = if interactive {
        Box::new(TerminalPrompt)
    } else {
        Box::new(LinePrompt::new(stdin.lock(), io::stdout()))
    };

    // Decide whether to show a spinner. Show it if stderr is a TTY.
    let indicator: Box<dyn LoadingIndicator> = {
        #[cfg(feature = "progress")]
        {
            if config.show_progress && is_terminal(Stream::Stderr) {
                Box::new(SpinnerIndicator::new())
            } else {
                Box::new(NoOpIndicator)
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            Box::new(NoOpIndicator)
        }
    };

    let runner = SystemRunner::new();
    let mut stdout = io::stdout();
    let report = run(
        &config,
        prompt.as_mut(),
        &runner,
        indicator.as_ref(),
        &mut stdout,
    )?;

    for warning in &report.cleanup_warnings {
        log::warn!("{}", warning);
    }
    Ok(())
}

enum Stream {
    Stdin,
    Stderr,
}

#[cfg(feature = "progress")]
fn is_terminal(stream: Stream) -> bool {
    match stream {
        Stream::Stdin => atty::is(atty::Stream::Stdin),
        Stream::Stderr => atty::is(atty::Stream::Stderr),
    }
}

#[cfg(not(feature = "progress"))]
fn is_terminal(stream: Stream) -> bool {
    use std::io::IsTerminal;
    match stream {
        Stream::Stdin => io::stdin().is_terminal(),
        Stream::Stderr => io::stderr().is_terminal(),
    }
}

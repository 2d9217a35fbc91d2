//! Serve command handler.
//!
//! Starts the server, relays its output once it is ready and stops it on
//! Ctrl+C.

use rhugo_core::OutputStream;
use rhugo_runtime::{ServeOptions, ServerStartupError};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// How often to check whether the server exited on its own.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Arguments for the serve command.
#[derive(Debug, Clone)]
pub struct ServeArgs {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub base_url: String,
    pub disable_fast_render: bool,
}

/// Execute the serve command.
pub async fn execute(ctx: &CliContext, args: ServeArgs) -> Result<(), CliError> {
    let mut options = ServeOptions::new(args.source, args.destination, args.base_url);
    options.disable_fast_render = args.disable_fast_render;

    let mut session = match ctx.hugo().serve(&options).await {
        Ok(session) => session,
        Err(err) => return Err(abandon_startup(err).await),
    };

    println!("{}", session.startup_output().trim_start_matches('\n'));
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    let mut output = session.subscribe();
    let mut poll = tokio::time::interval(EXIT_POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping Hugo server");
                break;
            }
            chunk = output.recv() => {
                let Some(chunk) = chunk else { break };
                relay(chunk.stream, &chunk.data);
            }
            _ = poll.tick() => {
                if let Some(status) = session.process_mut().try_wait()? {
                    return Err(CliError::Process(format!("Hugo server exited with {status}")));
                }
            }
        }
    }

    let status = session.terminate().await?;
    println!("Hugo server stopped ({status})");
    Ok(())
}

fn relay(stream: OutputStream, data: &[u8]) {
    // Write errors on our own stdio are ignored
    let _ = match stream {
        OutputStream::Stdout => std::io::stdout().write_all(data),
        OutputStream::Stderr => std::io::stderr().write_all(data),
    };
}

/// Stop a server whose startup failed and convert the failure.
async fn abandon_startup(err: ServerStartupError) -> CliError {
    if let Some(stderr) = err.stderr() {
        eprint!("{stderr}");
    }
    let cli_error = CliError::Process(err.to_string());

    if let Some(process) = err.into_process() {
        if let Err(e) = process.terminate().await {
            warn!(error = %e, "Failed to stop Hugo server after startup failure");
        }
    }
    cli_error
}

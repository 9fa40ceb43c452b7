//! boltlink command-line entry point.
//!
//! Two ways in, matching how desktop environments deliver deep links:
//!
//! - **Protocol-handler invocation**: the OS launches the binary with the
//!   `bolt://` URL somewhere in the argument list. Anything clap does not
//!   recognize is scanned for a deep link and dispatched.
//! - **Explicit subcommands**: `parse` for diagnostics, `register` and
//!   `unregister` to manage the OS scheme association.

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use boltlink_core::{
    dispatch, find_deep_link_arg, is_supported, parse_deep_link, MimeAppsRegistrar,
    ParsedDeepLink, ProtocolRegistrar, WindowHandle,
};

/// Desktop entry the scheme is associated with on registration.
const DESKTOP_ENTRY: &str = "boltlink.desktop";

#[derive(Parser)]
#[command(name = "boltlink", version, about = "Deep-link handler for the bolt:// scheme")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a deep link and print the parsed record as JSON.
    Parse {
        /// The candidate deep-link URL.
        url: String,
    },
    /// Associate the bolt:// scheme with this application.
    Register,
    /// Remove the bolt:// scheme association.
    Unregister,
}

/// Window sink for CLI invocations: prints the forwarded record to stdout.
struct ConsoleWindow;

impl WindowHandle for ConsoleWindow {
    fn is_alive(&self) -> bool {
        true
    }

    fn is_minimized(&self) -> bool {
        false
    }

    fn restore(&self) {}

    fn focus(&self) {}

    fn show(&self) {}

    fn send_message(&self, channel: &str, payload: &ParsedDeepLink) {
        debug!(channel, "forwarding deep link");
        match serde_json::to_string_pretty(payload) {
            Ok(json) => println!("{json}"),
            Err(err) => warn!(%err, "failed to serialize deep link payload"),
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::try_parse() {
        Ok(cli) => run(cli.command),
        Err(parse_err) => {
            // Protocol-handler launches put the URL straight into argv, in a
            // shape clap does not recognize.
            let argv: Vec<String> = env::args().skip(1).collect();
            match find_deep_link_arg(&argv) {
                Some(url) => {
                    dispatch(url, Some(&ConsoleWindow));
                    Ok(ExitCode::SUCCESS)
                }
                None => parse_err.exit(),
            }
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Parse { url } => {
            let parsed = parse_deep_link(&url);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            Ok(if parsed.is_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Register => run_registrar(true),
        Command::Unregister => run_registrar(false),
    }
}

fn run_registrar(install: bool) -> Result<ExitCode> {
    if !is_supported() {
        warn!("deep linking is not supported on this platform");
        return Ok(ExitCode::FAILURE);
    }
    let registrar = MimeAppsRegistrar::for_current_user(DESKTOP_ENTRY)
        .context("no user configuration directory available")?;
    let ok = if install {
        registrar.register()
    } else {
        registrar.unregister()
    };
    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

//! Futsal Dashboard - a browser dashboard for FIFA Futsal World Cup data.
//!
//! Starts an HTTP server that serves match timelines, statistics and an
//! infographic behind a cookie login.

use std::io;

use anyhow::{bail, Context, Result};
use axum_extra::extract::cookie::Key;
use futsal_core::auth::UserDirectory;
use futsal_core::Config;
use futsal_dashboard::{build_router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE: &str = "\
Usage: futsal-dashboard [--host HOST] [--port PORT]

Options:
  --host HOST   Address to bind (default from config, 127.0.0.1)
  --port PORT   Port to listen on (default from config, 8501)
  -h, --help    Print this help

Environment:
  APP_USER, APP_PASSWORD   Login account (default admin/admin)
  FFWC_COOKIE_NAME         Session cookie name (default ffwc_user)
  FFWC_COOKIE_DAYS         Remembered session lifetime in days (default 7)
  FFWC_COOKIE_SECRET       Cookie signing secret, at least 64 bytes
  RUST_LOG                 Log filter (default info)
";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    host: Option<String>,
    port: Option<u16>,
    help: bool,
}

fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--host" => {
                let host = args.next().context("--host requires a value")?;
                parsed.host = Some(host);
            }
            "--port" => {
                let port = args.next().context("--port requires a value")?;
                parsed.port = Some(
                    port.parse()
                        .with_context(|| format!("Invalid port: {}", port))?,
                );
            }
            "-h" | "--help" => parsed.help = true,
            other => bail!("Unknown argument: {}\n\n{}", other, USAGE),
        }
    }
    Ok(parsed)
}

/// Initialize the tracing subscriber for logging.
/// The returned guard flushes buffered log lines on drop.
fn init_tracing() -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (writer, guard) = tracing_appender::non_blocking(io::stderr());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer))
        .with(filter)
        .init();
    guard
}

/// Signing key for session cookies. Without a usable secret a random key is
/// generated and sessions end with the process.
fn cookie_key(secret: Option<String>) -> Key {
    match secret {
        Some(secret) => match Key::try_from(secret.as_bytes()) {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "Unusable FFWC_COOKIE_SECRET, using a random key");
                Key::generate()
            }
        },
        None => {
            info!("FFWC_COOKIE_SECRET not set; sessions will not survive a restart");
            Key::generate()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        print!("{}", USAGE);
        return Ok(());
    }

    let _log_guard = init_tracing();
    info!("Futsal dashboard starting");

    let mut config = Config::load()?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let users = UserDirectory::resolve(
        config.auth.users.as_ref(),
        std::env::var("APP_USER").ok(),
        std::env::var("APP_PASSWORD").ok(),
    );
    let key = cookie_key(std::env::var("FFWC_COOKIE_SECRET").ok());
    let state = AppState::from_config(&config, users, key)?;
    let app = build_router(state);

    let (host, port) = (config.server.host.as_str(), config.server.port);
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    info!(address = %listener.local_addr()?, api = %config.api.base_url, "Dashboard listening");

    axum::serve(listener, app).await.context("Server error")?;

    info!("Futsal dashboard shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(args(&[])).unwrap(), CliArgs::default());

        let parsed = parse_args(args(&["--host", "0.0.0.0", "--port", "9000"])).unwrap();
        assert_eq!(parsed.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(parsed.port, Some(9000));

        assert!(parse_args(args(&["--help"])).unwrap().help);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&["--port", "eighty"])).is_err());
        assert!(parse_args(args(&["--port"])).is_err());
        assert!(parse_args(args(&["serve"])).is_err());
    }

    #[test]
    fn test_cookie_key_from_secret_is_stable() {
        let secret = "s".repeat(64);
        let a = cookie_key(Some(secret.clone()));
        let b = cookie_key(Some(secret));
        assert_eq!(a.master(), b.master());

        // Too short falls back to a random key
        let c = cookie_key(Some("short".to_string()));
        let d = cookie_key(Some("short".to_string()));
        assert_ne!(c.master(), d.master());
    }
}

//! Chatline client binary.
//!
//! # Usage
//!
//! ```bash
//! # Connect to the default port
//! chatline chat.example.org
//!
//! # Literal address, custom port, bounded reply wait
//! chatline 127.0.0.1 --port 4000 --reply-timeout-secs 5
//! ```
//!
//! Exits with success when the session ends (logout, full server or end of
//! input) and with failure on connection or I/O errors.

use std::{
    io::{self, Write},
    process::ExitCode,
    time::Duration,
};

use chatline_cli::{Driver, Runtime, SessionEnd, TerminalDriver};
use chatline_client::transport::{self, DEFAULT_PORT, ServerAddr, TransportConfig};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Chatline terminal client
#[derive(Parser, Debug)]
#[command(name = "chatline")]
#[command(about = "Line-oriented client for the chatline chat protocol")]
#[command(version)]
struct Args {
    /// Server host name or address
    server: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds to wait for the TCP handshake
    #[arg(long, default_value_t = 10)]
    connect_timeout_secs: u64,

    /// Seconds to wait for a command reply (waits forever if unset)
    #[arg(long)]
    reply_timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            reply_timeout: self.reply_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    match run(args).await {
        Ok(end) => end.exit_code(),
        Err(e) => {
            // Nothing left to report to if stderr is gone.
            let _ = writeln!(io::stderr(), "chatline: {e}");
            ExitCode::FAILURE
        },
    }
}

async fn run(args: Args) -> Result<SessionEnd, Box<dyn std::error::Error>> {
    let config = args.transport_config();
    let addr = ServerAddr::new(args.server, args.port);

    tracing::info!(%addr, "connecting");
    let connection = transport::connect(&addr, config).await?;

    let mut driver = TerminalDriver::new(connection);
    driver.display(&format!("Chatline client, connected to {addr}."))?;

    Ok(Runtime::new(driver).run().await?)
}

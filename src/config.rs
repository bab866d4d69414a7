use clap::Parser;

/// Port used when none is given on the command line
pub const DEFAULT_PORT: u16 = 8080;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "signal_relay=debug,tower_http=debug";

/// Command-line configuration for the relay
#[derive(Debug, Clone, Parser)]
#[command(name = "signal-relay")]
#[command(about = "HTTP polling relay for WebRTC signaling messages", long_about = None)]
pub struct Config {
    /// Port to listen on (all interfaces)
    #[arg(default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

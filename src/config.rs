use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";
pub const DEFAULT_PORT: u16 = 8060;

/// Process configuration, read once at startup.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Launch records dashboard", long_about = None)]
pub struct Cli {
    /// Launch records CSV
    #[arg(long, default_value = DEFAULT_DATA_FILE, value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Address to listen on
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Verbose logging and detailed error responses
    #[arg(long, action = ArgAction::SetTrue)]
    pub debug: bool,

    /// Open the dashboard in a native window instead of serving it
    #[arg(long, action = ArgAction::SetTrue)]
    pub native: bool,
}

impl Cli {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Default `env_logger` filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

//! Command-line surface of `datimus-agent`.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Publishes weekly schedules as Prometheus gauges.
#[derive(Parser, Debug, Clone)]
#[command(name = "datimus-agent", version, about)]
pub struct Cli {
    /// Path to the agent configuration file.
    #[arg(short, long, env = "DATIMUS_CONFIG", default_value = "conf/agent.toml")]
    pub config: PathBuf,

    /// Port of the metrics HTTP server.
    #[arg(short, long, env = "DATIMUS_LISTEN_PORT", default_value_t = 8000)]
    pub listen_port: u16,

    /// Address of the metrics HTTP server.
    #[arg(long, env = "DATIMUS_LISTEN_HOST", default_value = "0.0.0.0")]
    pub listen_host: IpAddr,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, env = "DATIMUS_DEBUG")]
    pub debug: bool,

    /// Load and validate the schedule, print a summary and exit.
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_host, self.listen_port)
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["datimus-agent"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("conf/agent.toml"));
        assert_eq!(cli.listen_addr(), "0.0.0.0:8000".parse().unwrap());
        assert!(!cli.debug);
        assert!(!cli.check);
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn short_flags() {
        let cli =
            Cli::try_parse_from(["datimus-agent", "-c", "/etc/datimus.toml", "-l", "9100", "-d"])
                .unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/datimus.toml"));
        assert_eq!(cli.listen_port, 9100);
        assert!(cli.debug);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn long_flags() {
        let cli = Cli::try_parse_from([
            "datimus-agent",
            "--listen-host",
            "127.0.0.1",
            "--listen-port",
            "9000",
            "--check",
        ])
        .unwrap();
        assert_eq!(cli.listen_addr(), "127.0.0.1:9000".parse().unwrap());
        assert!(cli.check);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Cli::try_parse_from(["datimus-agent", "-l", "http"]).is_err());
        assert!(Cli::try_parse_from(["datimus-agent", "-l", "70000"]).is_err());
    }
}

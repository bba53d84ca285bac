//! Shoal CLI

pub use chat::ChatCmd;

mod chat;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

/// Shoal CLI
#[derive(Debug, Parser)]
#[command(name = "shoal", version, about)]
pub struct App {
    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Chat arguments
    #[command(flatten)]
    pub chat: ChatCmd,
}

impl App {
    /// Initialize tracing subscriber based on verbosity
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "info",
                1 => "shoal=debug",
                2 => "shoal=trace",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .init();
    }
}

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "Kitecast CLI.")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API.
    Http {
        #[arg(env = "KITECAST_SERVER_ADDRESS", default_value = "127.0.0.1:3000")]
        address: std::net::SocketAddr,
    },
    /// Print generated demo data for development seeding.
    Demo(DemoCommand),
}

#[derive(Debug, Parser)]
pub struct DemoCommand {
    #[command(subcommand)]
    pub cmd: DemoSubCommand,
}

#[derive(Debug, Subcommand)]
pub enum DemoSubCommand {
    /// Demo kitespots as JSON.
    Spots {
        #[arg(long, default_value_t = 12)]
        count: usize,
    },
    /// A synthetic hourly forecast series as JSON.
    Forecast {
        #[arg(long, default_value_t = 36.01)]
        lat: f64,
        #[arg(long, default_value_t = -5.61)]
        lon: f64,
        #[arg(long, default_value_t = 72)]
        hours: u32,
    },
}

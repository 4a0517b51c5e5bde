use clap::Parser;
use cli::{Cli, Command, DemoSubCommand};

mod cli;
mod config;
mod interactions;
mod mock;
mod retry;
mod server;
mod spots;
mod weather;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();

    match args.cmd {
        Command::Http { address } => server::run(address).await,
        Command::Demo(demo) => match demo.cmd {
            DemoSubCommand::Spots { count } => {
                let spots = mock::demo_spots(count);
                println!("{}", serde_json::to_string_pretty(&spots).unwrap());
            }
            DemoSubCommand::Forecast { lat, lon, hours } => {
                let samples = mock::forecast_series(lat, lon, hours);
                println!("{}", serde_json::to_string_pretty(&samples).unwrap());
            }
        },
    }
}

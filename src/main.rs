use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lorawan_device_cli::commands::devices;

#[derive(Parser)]
#[command(name = "lwctl")]
#[command(about = "LoRaWAN device management CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage devices registered to an application.
    Devices {
        #[command(subcommand)]
        command: devices::DevicesCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Devices { command } => devices::run(command).await?,
    }

    Ok(())
}

#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::{Color, Colorize};
use pdm::format::Formatted;
use pdm::types::{BasalState, BolusState, PodStatus};
use pdm::PdmClient;
use pdmconfig::PdmConfig;
use std::process;

#[derive(Parser)]
#[command(name = "pdmctl", about = "A CLI for the omnipy PDM service")]
struct Cli {
    /// Print the raw pod record as JSON instead of formatted fields
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the current pod status
    Status,
    /// Set a temporary basal rate
    TempBasal {
        /// Basal rate in units per hour
        rate: f64,
        /// Duration in hours
        hours: f64,
    },
    /// Cancel a running temporary basal
    CancelTempBasal,
    /// Start an immediate bolus
    Bolus {
        /// Bolus amount in units
        amount: f64,
    },
    /// Cancel a running bolus
    CancelBolus,
    /// Print the service API version
    Version,
    /// Print the radio dongle battery level
    Battery,
}

fn get_client() -> Result<PdmClient> {
    let config = PdmConfig::load_or_onboard().with_context(|| "Failed to load pdm config")?;
    let api_url = config
        .api_url()
        .with_context(|| "Missing api_url in pdm config")?;
    Ok(PdmClient::new().with_base_url(api_url))
}

fn delivery_color(active: bool) -> Color {
    if active {
        Color::Green
    } else {
        Color::White
    }
}

/// Renders a scalar service response, JSON-encoded when requested.
fn render_scalar(value: &str, json: bool) -> String {
    if json {
        serde_json::Value::from(value).to_string()
    } else {
        value.to_string()
    }
}

fn print_status(pod: &PodStatus, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(pod)?);
        return Ok(());
    }

    let mut formatted = Formatted::default();
    formatted.update(pod);

    println!("{:<14}{}", "Last updated", formatted.last_updated);
    println!("{:<14}{}", "Time active", formatted.time_active);
    let bolus_active = pod.bolus().is_some_and(|s| s != BolusState::NotRunning);
    let basal_active = pod.basal().is_some_and(|s| s != BasalState::NotRunning);
    println!(
        "{:<14}{}",
        "Bolus",
        formatted.bolus_state.color(delivery_color(bolus_active))
    );
    println!(
        "{:<14}{}",
        "Basal",
        formatted.basal_state.color(delivery_color(basal_active))
    );
    println!("{:<14}{:.2} U", "Reservoir", pod.reservoir);
    if pod.faulted {
        println!("{:<14}{}", "Fault", "POD FAULTED".red().bold());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{err:#}");
        process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let client = get_client()?;
    let pod = match cli.command {
        Command::Status => client.status().await?,
        Command::TempBasal { rate, hours } => client.set_temp_basal(rate, hours).await?,
        Command::CancelTempBasal => client.cancel_temp_basal().await?,
        Command::Bolus { amount } => client.bolus(amount).await?,
        Command::CancelBolus => client.cancel_bolus().await?,
        Command::Version => {
            let version = client.api_version().await?;
            println!("{}", render_scalar(&version, cli.json));
            return Ok(());
        }
        Command::Battery => {
            let level = client.battery_level().await?;
            if cli.json {
                println!("{}", render_scalar(&level, true));
            } else {
                println!("{level}%");
            }
            return Ok(());
        }
    };

    print_status(&pod, cli.json)
}

#[cfg(test)]
mod tests {
    use super::render_scalar;

    #[test]
    fn scalar_output_is_json_encoded_on_request() {
        assert_eq!(render_scalar("1.4", false), "1.4");
        assert_eq!(render_scalar("1.4", true), "\"1.4\"");
        assert_eq!(render_scalar("85", true), "\"85\"");
    }
}

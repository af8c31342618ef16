//! Command-line interface for the Errand route planner.
//!
//! Two subcommands are provided:
//!
//! - `plan` reads a JSON trip request, resolves any chain names into nearby
//!   branches, and prints the optimised route as JSON.
//! - `chains` lists the brands with branches around a location.
//!
//! Options can be supplied on the command line, through `ERRAND_CMDS_*`
//! environment variables, or in a configuration file. Logs go to stderr.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod chains;
mod error;
mod fs;
mod logging;
mod plan;

pub use error::CliError;
pub use logging::LogLevel;

use chains::{ChainsArgs, run_chains};
use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ARG_PLAN_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_PLAN_OSRM_PROFILE: &str = "osrm-profile";
pub(crate) const ARG_PLAN_OVERPASS_ENDPOINT: &str = "overpass-endpoint";
pub(crate) const ARG_PLAN_CHAIN_RADIUS: &str = "chain-radius";
pub(crate) const ARG_PLAN_STRATEGY: &str = "strategy";
pub(crate) const ENV_PLAN_REQUEST: &str = "ERRAND_CMDS_PLAN_REQUEST_PATH";

pub(crate) const ARG_CHAINS_LATITUDE: &str = "latitude";
pub(crate) const ARG_CHAINS_LONGITUDE: &str = "longitude";
pub(crate) const ARG_CHAINS_RADIUS: &str = "radius";
pub(crate) const ARG_CHAINS_OVERPASS_ENDPOINT: &str = "overpass-endpoint";
pub(crate) const ENV_CHAINS_LATITUDE: &str = "ERRAND_CMDS_CHAINS_LATITUDE";
pub(crate) const ENV_CHAINS_LONGITUDE: &str = "ERRAND_CMDS_CHAINS_LONGITUDE";

/// Run the Errand CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration, logging setup,
/// or the selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logger(cli.log_level)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Chains(args) => run_chains(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "errand",
    about = "Plan the shortest trip through a set of stops",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Log verbosity; overrides RUST_LOG.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimise the visiting order of a trip request.
    Plan(PlanArgs),
    /// List chain brands near a location.
    Chains(ChainsArgs),
}

#[cfg(test)]
mod tests;

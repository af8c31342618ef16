//! Chains command: list the brands with branches near a location.

use std::io::Write;

use clap::Parser;
use errand_data::{OverpassDirectory, OverpassDirectoryConfig};
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::plan::{
    DEFAULT_CHAIN_RADIUS_METRES, validate_coordinate, validate_radius, write_json,
};
use crate::{
    ARG_CHAINS_LATITUDE, ARG_CHAINS_LONGITUDE, ARG_CHAINS_OVERPASS_ENDPOINT, ARG_CHAINS_RADIUS,
    CliError, ENV_CHAINS_LATITUDE, ENV_CHAINS_LONGITUDE,
};

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// CLI arguments for the `chains` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List the distinct brand names with at least one named \
                 branch inside the search circle. Use the output to pick \
                 the chains a trip request should visit.",
    about = "List chain brands near a location"
)]
#[ortho_config(prefix = "ERRAND")]
pub(crate) struct ChainsArgs {
    /// Latitude of the search centre in degrees.
    #[arg(long = ARG_CHAINS_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the search centre in degrees.
    #[arg(long = ARG_CHAINS_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Search radius in metres.
    #[arg(long = ARG_CHAINS_RADIUS, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Overpass interpreter URL.
    #[arg(long = ARG_CHAINS_OVERPASS_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_endpoint: Option<String>,
}

impl ChainsArgs {
    fn into_config(self) -> Result<ChainsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ChainsConfig::try_from(merged)
    }
}

/// Resolved `chains` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChainsConfig {
    pub(crate) centre: Coord<f64>,
    pub(crate) radius_metres: f64,
    pub(crate) overpass: OverpassDirectoryConfig,
}

impl TryFrom<ChainsArgs> for ChainsConfig {
    type Error = CliError;

    fn try_from(args: ChainsArgs) -> Result<Self, Self::Error> {
        let latitude = args
            .latitude
            .ok_or(CliError::MissingArgument {
                field: ARG_CHAINS_LATITUDE,
                env: ENV_CHAINS_LATITUDE,
            })
            .and_then(|value| validate_coordinate(value, MAX_LATITUDE, ARG_CHAINS_LATITUDE))?;
        let longitude = args
            .longitude
            .ok_or(CliError::MissingArgument {
                field: ARG_CHAINS_LONGITUDE,
                env: ENV_CHAINS_LONGITUDE,
            })
            .and_then(|value| validate_coordinate(value, MAX_LONGITUDE, ARG_CHAINS_LONGITUDE))?;
        let radius_metres = validate_radius(
            args.radius.unwrap_or(DEFAULT_CHAIN_RADIUS_METRES),
            ARG_CHAINS_RADIUS,
        )?;
        let overpass = args
            .overpass_endpoint
            .map_or_else(OverpassDirectoryConfig::default, OverpassDirectoryConfig::new);
        Ok(Self {
            centre: Coord {
                x: longitude,
                y: latitude,
            },
            radius_metres,
            overpass,
        })
    }
}

/// Source of brand names for the `chains` command.
pub(crate) trait BrandCatalogue {
    fn nearby_brands(&self, config: &ChainsConfig) -> Result<Vec<String>, CliError>;
}

/// Brand catalogue backed by an Overpass interpreter.
pub(crate) struct OverpassBrandCatalogue;

impl BrandCatalogue for OverpassBrandCatalogue {
    fn nearby_brands(&self, config: &ChainsConfig) -> Result<Vec<String>, CliError> {
        let directory =
            OverpassDirectory::with_config(config.overpass.clone()).map_err(|source| {
                CliError::BuildDirectory {
                    endpoint: config.overpass.endpoint.clone(),
                    source,
                }
            })?;
        directory
            .nearby_brands(config.centre, config.radius_metres)
            .map_err(|source| CliError::Directory { source })
    }
}

pub(crate) fn run_chains(args: ChainsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_chains_with(args, &OverpassBrandCatalogue, &mut stdout)
}

pub(crate) fn run_chains_with(
    args: ChainsArgs,
    catalogue: &dyn BrandCatalogue,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let brands = catalogue.nearby_brands(&config)?;
    write_json(writer, &brands)
}

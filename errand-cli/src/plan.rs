//! Plan command implementation for the Errand CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use errand_core::{BranchDirectory, DistanceOracle, Route, RouteRequest};
use errand_data::{
    HttpDistanceOracle, HttpDistanceOracleConfig, OverpassDirectory, OverpassDirectoryConfig,
};
use errand_solver::Strategy;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_PLAN_CHAIN_RADIUS, ARG_PLAN_OSRM_BASE_URL, ARG_PLAN_OSRM_PROFILE,
    ARG_PLAN_OVERPASS_ENDPOINT, ARG_PLAN_REQUEST, ARG_PLAN_STRATEGY, CliError, ENV_PLAN_REQUEST,
};

/// Chain search radius used when none is configured.
pub(crate) const DEFAULT_CHAIN_RADIUS_METRES: f64 = 5_000.0;

/// Search strategy accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum StrategyArg {
    /// Exhaustive search; optimal but factorial in the number of stops.
    #[default]
    Exact,
    /// Nearest-neighbour walk; fast but approximate.
    Greedy,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Exact => Self::Exact,
            StrategyArg::Greedy => Self::Greedy,
        }
    }
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan the shortest visiting order for a trip. The trip is \
                 read from a JSON-encoded RouteRequest; chain names are \
                 resolved into nearby branches through an Overpass \
                 interpreter and road distances come from an OSRM route \
                 service. The optimised route is printed as JSON.",
    about = "Optimise the visiting order of a trip"
)]
#[ortho_config(prefix = "ERRAND")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a RouteRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_PLAN_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile (e.g. "driving").
    #[arg(long = ARG_PLAN_OSRM_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
    /// Overpass interpreter used to resolve chain branches.
    #[arg(long = ARG_PLAN_OVERPASS_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_endpoint: Option<String>,
    /// Radius in metres searched around the centre for chain branches.
    #[arg(long = ARG_PLAN_CHAIN_RADIUS, value_name = "metres")]
    #[serde(default)]
    pub(crate) chain_radius: Option<f64>,
    /// Search strategy.
    #[arg(long = ARG_PLAN_STRATEGY, value_enum)]
    #[serde(default)]
    pub(crate) strategy: Option<StrategyArg>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Routing service settings.
    pub(crate) osrm: HttpDistanceOracleConfig,
    /// Branch directory settings.
    pub(crate) overpass: OverpassDirectoryConfig,
    /// Chain search radius in metres.
    pub(crate) chain_radius_metres: f64,
    /// Search strategy.
    pub(crate) strategy: Strategy,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_PLAN_REQUEST)
    }
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reject coordinates that are not finite or lie beyond `limit` degrees.
pub(crate) fn validate_coordinate(
    value: f64,
    limit: f64,
    field: &'static str,
) -> Result<f64, CliError> {
    if value.is_finite() && value.abs() <= limit {
        Ok(value)
    } else {
        Err(CliError::InvalidCoordinate {
            field,
            limit,
            value,
        })
    }
}

/// Reject radii that are not positive and finite.
pub(crate) fn validate_radius(value: f64, field: &'static str) -> Result<f64, CliError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CliError::InvalidRadius { field, value })
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingPositional {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let mut osrm = HttpDistanceOracleConfig::default();
        if let Some(base_url) = args.osrm_base_url {
            osrm.base_url = base_url;
        }
        if let Some(profile) = args.osrm_profile {
            osrm.profile = profile;
        }
        let overpass = args
            .overpass_endpoint
            .map_or_else(OverpassDirectoryConfig::default, OverpassDirectoryConfig::new);
        let chain_radius_metres = validate_radius(
            args.chain_radius.unwrap_or(DEFAULT_CHAIN_RADIUS_METRES),
            ARG_PLAN_CHAIN_RADIUS,
        )?;

        Ok(Self {
            request_path,
            osrm,
            overpass,
            chain_radius_metres,
            strategy: args.strategy.unwrap_or_default().into(),
        })
    }
}

/// Builds the external collaborators for a plan invocation.
pub(crate) trait PlanServices {
    /// Distance oracle used for every pairwise query.
    fn oracle(&self, config: &PlanConfig)
    -> Result<Box<dyn DistanceOracle + Send + Sync>, CliError>;

    /// Directory used to resolve chain names; only built when needed.
    fn directory(&self, config: &PlanConfig) -> Result<Box<dyn BranchDirectory>, CliError>;
}

/// Production services talking to OSRM and Overpass over HTTP.
pub(crate) struct HttpPlanServices;

impl PlanServices for HttpPlanServices {
    fn oracle(
        &self,
        config: &PlanConfig,
    ) -> Result<Box<dyn DistanceOracle + Send + Sync>, CliError> {
        let oracle = HttpDistanceOracle::with_config(config.osrm.clone()).map_err(|source| {
            CliError::BuildDistanceOracle {
                base_url: config.osrm.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(oracle))
    }

    fn directory(&self, config: &PlanConfig) -> Result<Box<dyn BranchDirectory>, CliError> {
        let directory =
            OverpassDirectory::with_config(config.overpass.clone()).map_err(|source| {
                CliError::BuildDirectory {
                    endpoint: config.overpass.endpoint.clone(),
                    source,
                }
            })?;
        Ok(Box::new(directory))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &HttpPlanServices, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    services: &dyn PlanServices,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = execute_plan(args, services)?;
    write_json(writer, &route)
}

fn execute_plan(args: PlanArgs, services: &dyn PlanServices) -> Result<Route, CliError> {
    let config = resolve_plan_config(args)?;
    let mut request = load_route_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidRouteRequest {
            path: config.request_path.clone(),
            source,
        })?;

    if !request.chains.is_empty() {
        let directory = services.directory(&config)?;
        request = request
            .with_resolved_chains(directory.as_ref(), config.chain_radius_metres)
            .map_err(|source| CliError::Directory { source })?;
    }

    log::info!(
        "planning {} stop(s) with the {} strategy",
        request.free_point_count(),
        config.strategy
    );
    let oracle = services.oracle(&config)?;
    config
        .strategy
        .solver(oracle)
        .solve(&request)
        .map_err(|source| CliError::Optimise { source })
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`RouteRequest`] from disk.
pub(crate) fn load_route_request(path: &Utf8Path) -> Result<RouteRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRouteRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRouteRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}

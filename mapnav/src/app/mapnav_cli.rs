use std::path::Path;

use clap::{Parser, Subcommand};
use mapnav_core::model::{Coordinate, TransportMode};
use tokio::io::BufReader;

use super::{run_navigate, run_search, MapnavAppError, NavigatorConfig};

/// command line map navigator: search a place and get a route to it from
/// your location
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct MapnavApp {
    /// select the navigator operation to run
    #[command(subcommand)]
    pub op: MapnavOperation,
}

#[derive(Debug, Clone, Subcommand)]
pub enum MapnavOperation {
    /// runs a single search from a given origin and prints the route summary
    Search {
        /// place to search for
        #[arg(short, long)]
        query: String,
        /// origin latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        /// origin longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        /// driving, walking, transit or cycling. defaults to the configured mode
        #[arg(short, long)]
        mode: Option<TransportMode>,
        /// path to a TOML navigator configuration
        #[arg(short, long)]
        config: Option<String>,
        /// write the route as GeoJSON to this file
        #[arg(short, long)]
        output_file: Option<String>,
    },
    /// interactive navigation screen reading commands from stdin.
    /// lines are place searches, except `mode <name>`, `zoom in`, `zoom out`,
    /// `center`, `status` and `quit`.
    Navigate {
        /// path to a TOML navigator configuration
        #[arg(short, long)]
        config: Option<String>,
        /// CSV file of `latitude,longitude` rows replayed as the device location
        #[arg(short, long)]
        track_file: Option<String>,
    },
    /// prints the default navigator configuration as TOML
    DefaultConfig,
}

impl MapnavOperation {
    pub async fn run(self) -> Result<(), MapnavAppError> {
        match self {
            MapnavOperation::Search {
                query,
                latitude,
                longitude,
                mode,
                config,
                output_file,
            } => {
                let conf = NavigatorConfig::load(config.as_deref())?;
                let origin = Coordinate::try_new(latitude, longitude)
                    .map_err(MapnavAppError::ConfigurationError)?;
                run_search(
                    &conf,
                    &query,
                    origin,
                    mode,
                    output_file.as_deref().map(Path::new),
                )
                .await?;
                Ok(())
            }
            MapnavOperation::Navigate { config, track_file } => {
                let mut conf = NavigatorConfig::load(config.as_deref())?;
                if track_file.is_some() {
                    conf.sensor.track_file = track_file;
                }
                let input = BufReader::new(tokio::io::stdin());
                run_navigate(conf, input).await?;
                Ok(())
            }
            MapnavOperation::DefaultConfig => {
                println!("{}", NavigatorConfig::default().to_toml()?);
                Ok(())
            }
        }
    }
}

use std::{
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use mapnav_core::model::{AuthorizationState, Coordinate};
use serde::Deserialize;
use tokio::{sync::mpsc, task::JoinHandle};

use super::{LocationSensor, SensorConfig, SensorError, SensorEvent};

/// a simulated device sensor replaying a recorded track.
///
/// permission requests are answered immediately with the configured grant.
/// while started, one position is emitted per interval; once the track is
/// exhausted the sensor stays silent, as a stationary device would. a
/// stopped sensor resumes from where it left off.
pub struct ReplaySensor {
    track: Arc<Vec<Coordinate>>,
    next_index: Arc<AtomicUsize>,
    interval: Duration,
    grant_permission: bool,
    authorization: AuthorizationState,
    events: mpsc::UnboundedSender<SensorEvent>,
    task: Option<JoinHandle<()>>,
}

#[derive(Deserialize)]
struct TrackRow {
    latitude: f64,
    longitude: f64,
}

impl ReplaySensor {
    pub fn new(
        track: Vec<Coordinate>,
        interval: Duration,
        grant_permission: bool,
        events: mpsc::UnboundedSender<SensorEvent>,
    ) -> Self {
        Self {
            track: Arc::new(track),
            next_index: Arc::new(AtomicUsize::new(0)),
            interval,
            grant_permission,
            authorization: AuthorizationState::NotDetermined,
            events,
            task: None,
        }
    }

    pub fn try_from_config(
        config: &SensorConfig,
        events: mpsc::UnboundedSender<SensorEvent>,
    ) -> Result<Self, SensorError> {
        let track = match &config.track_file {
            Some(f) => {
                log::info!("reading location track from {f}");
                read_track(Path::new(f))?
            }
            None => {
                let [lat, lon] = config.position;
                vec![Coordinate::try_new(lat, lon).map_err(SensorError::Track)?]
            }
        };
        Ok(Self::new(
            track,
            Duration::from_millis(config.interval_millis),
            config.grant_permission,
            events,
        ))
    }
}

impl LocationSensor for ReplaySensor {
    fn authorization(&self) -> AuthorizationState {
        self.authorization
    }

    fn request_permission(&mut self) {
        self.authorization = if self.grant_permission {
            AuthorizationState::Authorized
        } else {
            AuthorizationState::Denied
        };
        let _ = self
            .events
            .send(SensorEvent::Authorization(self.authorization));
    }

    fn start_updates(&mut self) {
        if self.task.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }
        if self.track.is_empty() {
            let _ = self.events.send(SensorEvent::Error(SensorError::Unavailable(
                String::from("location track is empty"),
            )));
            return;
        }
        let track = self.track.clone();
        let next_index = self.next_index.clone();
        let events = self.events.clone();
        let interval = self.interval;
        self.task = Some(tokio::spawn(async move {
            loop {
                let idx = next_index.load(Ordering::SeqCst);
                let Some(coordinate) = track.get(idx) else {
                    break;
                };
                if events.send(SensorEvent::Position(*coordinate)).is_err() {
                    break;
                }
                next_index.store(idx + 1, Ordering::SeqCst);
                tokio::time::sleep(interval).await;
            }
        }));
    }

    fn stop_updates(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ReplaySensor {
    fn drop(&mut self) {
        self.stop_updates();
    }
}

/// reads a CSV track with `latitude,longitude` headers.
pub fn read_track(path: &Path) -> Result<Vec<Coordinate>, SensorError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| SensorError::Track(format!("failure opening {path:?}: {e}")))?;
    reader
        .deserialize::<TrackRow>()
        .enumerate()
        .map(|(idx, row)| {
            let row = row.map_err(|e| SensorError::Track(format!("row {idx}: {e}")))?;
            Coordinate::try_new(row.latitude, row.longitude)
                .map_err(|e| SensorError::Track(format!("row {idx}: {e}")))
        })
        .collect()
}

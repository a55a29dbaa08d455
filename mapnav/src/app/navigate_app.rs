use std::sync::Arc;

use mapnav_core::model::TransportMode;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
    task::{JoinHandle, JoinSet},
};

use super::{MapnavAppError, NavigatorConfig};
use crate::model::{
    location::{LocationSession, ReplaySensor},
    search::{SearchOutcome, SearchSessionState},
    view::{CameraController, ScreenStatus},
};

/// one line of navigator input. any line that is not a known command is a
/// place search.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigatorCommand {
    Search(String),
    Mode(TransportMode),
    ZoomIn,
    ZoomOut,
    Center,
    Status,
    Quit,
}

impl NavigatorCommand {
    /// parses an input line. blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<NavigatorCommand>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let words = line.split_whitespace().collect::<Vec<_>>();
        let command = match words.as_slice() {
            ["mode", name] => NavigatorCommand::Mode(name.parse()?),
            ["mode", ..] => {
                return Err(String::from(
                    "usage: mode <driving|walking|transit|cycling>",
                ))
            }
            ["zoom", "in"] => NavigatorCommand::ZoomIn,
            ["zoom", "out"] => NavigatorCommand::ZoomOut,
            ["center"] => NavigatorCommand::Center,
            ["status"] => NavigatorCommand::Status,
            ["quit"] | ["exit"] => NavigatorCommand::Quit,
            _ => NavigatorCommand::Search(line.to_string()),
        };
        Ok(Some(command))
    }
}

/// aborts the wrapped task when dropped, on every exit path of the navigator.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// runs the interactive navigation screen, reading commands from `input`
/// until `quit` or end of input. searches run in the background while
/// further commands are accepted. on end of input, pending searches are
/// awaited; `quit` drops them.
///
/// returns the screen as it was when the navigator stopped.
pub async fn run_navigate<R>(
    conf: NavigatorConfig,
    input: R,
) -> Result<ScreenStatus, MapnavAppError>
where
    R: AsyncBufRead + Unpin,
{
    log::info!("starting navigator at {}", chrono::Local::now().to_rfc3339());
    let controller = Arc::new(conf.build_search_controller()?);
    let mut search_rx = controller.subscribe();

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let sensor = ReplaySensor::try_from_config(&conf.sensor, events_tx)?;
    let mut session = LocationSession::new(sensor);
    let mut location_rx = session.subscribe();
    session.start();
    let _session_task = AbortOnDrop(tokio::spawn(session.run(events_rx)));

    let mut camera = CameraController::new(conf.camera.clone());
    let mut searches: JoinSet<Option<SearchOutcome>> = JoinSet::new();
    let mut lines = input.lines();
    let mut quit = false;

    while !quit {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = match NavigatorCommand::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(msg) => {
                        println!("{msg}");
                        continue;
                    }
                };
                let user = location_rx.borrow().coordinate;
                let status =
                    ScreenStatus::from_snapshots(&location_rx.borrow(), &search_rx.borrow());
                match command {
                    NavigatorCommand::Search(query) => {
                        if !status.can_submit(&query) {
                            println!("a search is already running");
                            continue;
                        }
                        let controller = controller.clone();
                        let mode = controller.mode();
                        searches.spawn(async move {
                            Some(controller.search(&query, user, mode).await)
                        });
                    }
                    NavigatorCommand::Mode(mode) => {
                        let controller = controller.clone();
                        searches.spawn(async move { controller.set_mode(mode, user).await });
                    }
                    NavigatorCommand::ZoomIn => {
                        let moved = camera.zoom_in(user);
                        report_zoom(&camera, moved);
                    }
                    NavigatorCommand::ZoomOut => {
                        let moved = camera.zoom_out(user);
                        report_zoom(&camera, moved);
                    }
                    NavigatorCommand::Center => {
                        if camera.recenter(user) {
                            report_camera(&camera);
                        } else {
                            println!("User location is not available yet");
                        }
                    }
                    NavigatorCommand::Status => println!("{status}"),
                    NavigatorCommand::Quit => quit = true,
                }
            }
            Ok(()) = location_rx.changed() => {
                let snapshot = location_rx.borrow_and_update().clone();
                let has_route = search_rx.borrow().route.is_some();
                if camera.auto_center(snapshot.coordinate, has_route) {
                    report_camera(&camera);
                }
                if let Some(msg) = &snapshot.last_error {
                    println!("{msg}");
                }
            }
            Ok(()) = search_rx.changed() => {
                let snapshot = search_rx.borrow_and_update().clone();
                if let SearchSessionState::Succeeded(route) = &snapshot.state {
                    if camera.fit_route(route) {
                        report_camera(&camera);
                    }
                }
                println!("{}", ScreenStatus::from_snapshots(&location_rx.borrow(), &snapshot));
            }
            Some(joined) = searches.join_next() => {
                match joined {
                    Ok(Some(SearchOutcome::Superseded)) => log::debug!("dropped superseded search"),
                    Ok(_) => {}
                    Err(e) => log::error!("search task failed: {e}"),
                }
            }
        }
    }

    if quit {
        searches.abort_all();
    }
    while let Some(joined) = searches.join_next().await {
        if let Err(e) = joined {
            if !e.is_cancelled() {
                log::error!("search task failed: {e}");
            }
        }
    }
    let status = ScreenStatus::from_snapshots(&location_rx.borrow(), &search_rx.borrow());
    println!("{status}");
    Ok(status)
}

fn report_zoom(camera: &CameraController, moved: bool) {
    if moved {
        report_camera(camera);
    } else {
        println!("zoom needs a visible map center and a known user location");
    }
}

fn report_camera(camera: &CameraController) {
    println!("camera: {}", camera.position());
}

use std::fmt::Display;

use geo::{Point, Rect};
use mapnav_core::model::{Coordinate, RouteResult};

use super::CameraConfig;

/// where the map camera is looking.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraPosition {
    /// let the map widget choose
    Automatic,
    Centered {
        center: Coordinate,
        distance_meters: f64,
    },
    /// frame a region, used to show a whole route
    Region(Rect<f64>),
}

impl Display for CameraPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraPosition::Automatic => write!(f, "automatic"),
            CameraPosition::Centered {
                center,
                distance_meters,
            } => write!(f, "centered on {center} at {distance_meters:.0} m"),
            CameraPosition::Region(rect) => {
                let min = Coordinate::from(Point::from(rect.min()));
                let max = Coordinate::from(Point::from(rect.max()));
                write!(f, "framing {min} to {max}")
            }
        }
    }
}

/// camera bookkeeping of the navigation screen: zoom distance, recentering on
/// the user, one-time auto-centering on the first fix, and route framing.
///
/// every operation returns whether the camera moved.
#[derive(Debug, Clone)]
pub struct CameraController {
    config: CameraConfig,
    zoom_meters: f64,
    position: CameraPosition,
    center: Option<Coordinate>,
    did_auto_center: bool,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            zoom_meters: config.initial_zoom_meters,
            config,
            position: CameraPosition::Automatic,
            center: None,
            did_auto_center: false,
        }
    }

    pub fn position(&self) -> &CameraPosition {
        &self.position
    }

    pub fn zoom_meters(&self) -> f64 {
        self.zoom_meters
    }

    /// records the visible center reported by the map after a camera change.
    pub fn on_camera_moved(&mut self, center: Coordinate) {
        self.center = Some(center);
    }

    /// zooming keeps the current center and needs a known user location.
    pub fn zoom_in(&mut self, user: Option<Coordinate>) -> bool {
        self.zoom(user, self.config.zoom_in_factor)
    }

    pub fn zoom_out(&mut self, user: Option<Coordinate>) -> bool {
        self.zoom(user, self.config.zoom_out_factor)
    }

    pub fn recenter(&mut self, user: Option<Coordinate>) -> bool {
        let Some(user) = user else {
            return false;
        };
        self.move_to(CameraPosition::Centered {
            center: user,
            distance_meters: self.zoom_meters,
        });
        true
    }

    /// centers on the user the first time a location is known, unless a
    /// route is already being shown. happens at most once per controller.
    pub fn auto_center(&mut self, user: Option<Coordinate>, has_route: bool) -> bool {
        if self.did_auto_center || has_route || user.is_none() {
            return false;
        }
        self.did_auto_center = true;
        self.recenter(user)
    }

    pub fn fit_route(&mut self, route: &RouteResult) -> bool {
        match route.bounding_rect() {
            Some(rect) => {
                self.move_to(CameraPosition::Region(rect));
                true
            }
            None => false,
        }
    }

    fn zoom(&mut self, user: Option<Coordinate>, factor: f64) -> bool {
        let (Some(center), Some(_)) = (self.center, user) else {
            return false;
        };
        self.zoom_meters *= factor;
        self.move_to(CameraPosition::Centered {
            center,
            distance_meters: self.zoom_meters,
        });
        true
    }

    fn move_to(&mut self, position: CameraPosition) {
        match &position {
            CameraPosition::Centered { center, .. } => self.on_camera_moved(*center),
            CameraPosition::Region(rect) => {
                self.on_camera_moved(Coordinate::from(Point::from(rect.center())))
            }
            CameraPosition::Automatic => {}
        }
        self.position = position;
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

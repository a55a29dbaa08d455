use chrono::Utc;
use mapnav_core::model::{AuthorizationState, Coordinate};
use tokio::sync::{mpsc, watch};

use super::{LocationSensor, LocationSnapshot, SensorError, SensorEvent};

/// owns the device location subscription and publishes the latest known
/// coordinate and authorization state as a [LocationSnapshot].
///
/// the session is the only writer of the snapshot. sensor events are applied
/// by [LocationSession::run] one at a time, in the order the sensor delivered
/// them; every other party holds a read-only [watch::Receiver].
pub struct LocationSession<S> {
    sensor: S,
    state: watch::Sender<LocationSnapshot>,
    /// set once permission has been requested for the current NotDetermined period
    prompted: bool,
}

impl<S: LocationSensor> LocationSession<S> {
    pub fn new(sensor: S) -> Self {
        let snapshot = LocationSnapshot {
            authorization: sensor.authorization(),
            ..Default::default()
        };
        let (state, _) = watch::channel(snapshot);
        Self {
            sensor,
            state,
            prompted: false,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LocationSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> LocationSnapshot {
        self.state.borrow().clone()
    }

    pub fn current(&self) -> Option<Coordinate> {
        self.state.borrow().coordinate
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// requests permission if it has not been determined yet, or starts
    /// position updates if it has already been granted.
    pub fn start(&mut self) {
        let authorization = self.state.borrow().authorization;
        if authorization.is_authorized() {
            self.begin_updates();
        } else if authorization.blocks_updates() {
            log::info!("location permission is {authorization}, not starting updates");
        } else {
            self.request_permission_once();
        }
    }

    pub fn on_authorization_changed(&mut self, authorization: AuthorizationState) {
        let previous = self.state.borrow().authorization;
        log::debug!("location authorization changed from {previous} to {authorization}");
        if authorization == AuthorizationState::NotDetermined
            && previous != AuthorizationState::NotDetermined
        {
            self.prompted = false;
        }
        self.state.send_if_modified(|s| {
            let changed = s.authorization != authorization;
            s.authorization = authorization;
            changed
        });

        if authorization.is_authorized() {
            self.begin_updates();
        } else if authorization.blocks_updates() {
            self.end_updates();
        } else {
            self.request_permission_once();
        }
    }

    /// replaces the published coordinate. ignored while updates are stopped.
    pub fn on_position_update(&mut self, coordinate: Coordinate) {
        if !self.state.borrow().receiving {
            log::debug!("dropping position {coordinate} received while updates are stopped");
            return;
        }
        self.state.send_modify(|s| {
            s.coordinate = Some(coordinate);
            s.updated_at = Some(Utc::now());
        });
    }

    /// location loss is expected: stop updates, keep the last known coordinate.
    pub fn on_sensor_error(&mut self, error: SensorError) {
        log::warn!("failed to find user's location: {error}");
        self.sensor.stop_updates();
        self.state.send_modify(|s| {
            s.receiving = false;
            s.last_error = Some(error.to_string());
        });
    }

    pub fn handle(&mut self, event: SensorEvent) {
        match event {
            SensorEvent::Position(coordinate) => self.on_position_update(coordinate),
            SensorEvent::Authorization(authorization) => {
                self.on_authorization_changed(authorization)
            }
            SensorEvent::Error(error) => self.on_sensor_error(error),
        }
    }

    /// applies sensor events until every sender has been dropped.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<SensorEvent>) -> Self {
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
        log::debug!("location event stream closed");
        self
    }

    fn request_permission_once(&mut self) {
        if self.prompted {
            return;
        }
        self.prompted = true;
        log::info!("requesting location permission");
        self.sensor.request_permission();
    }

    fn begin_updates(&mut self) {
        if !self.state.borrow().receiving {
            self.sensor.start_updates();
        }
        self.state.send_if_modified(|s| {
            let changed = !s.receiving || s.last_error.is_some();
            s.receiving = true;
            s.last_error = None;
            changed
        });
    }

    fn end_updates(&mut self) {
        if self.state.borrow().receiving {
            self.sensor.stop_updates();
        }
        self.state.send_if_modified(|s| {
            let changed = s.receiving;
            s.receiving = false;
            changed
        });
    }
}

#[cfg(test)]
mod test {
    use mapnav_core::model::{AuthorizationState, Coordinate};
    use tokio::sync::mpsc;

    use super::LocationSession;
    use crate::model::location::{LocationSensor, SensorError, SensorEvent};

    struct MockSensor {
        authorization: AuthorizationState,
        commands: Vec<&'static str>,
    }

    impl MockSensor {
        fn new(authorization: AuthorizationState) -> Self {
            Self {
                authorization,
                commands: vec![],
            }
        }
    }

    impl LocationSensor for MockSensor {
        fn authorization(&self) -> AuthorizationState {
            self.authorization
        }

        fn request_permission(&mut self) {
            self.commands.push("request_permission");
        }

        fn start_updates(&mut self) {
            self.commands.push("start");
        }

        fn stop_updates(&mut self) {
            self.commands.push("stop");
        }
    }

    const HOME: Coordinate = Coordinate::new(45.5017, -73.5673);
    const AWAY: Coordinate = Coordinate::new(45.4419, -73.6128);

    fn authorized_session() -> LocationSession<MockSensor> {
        let mut session = LocationSession::new(MockSensor::new(AuthorizationState::Authorized));
        session.start();
        session
    }

    #[test]
    fn test_start_prompts_once_when_not_determined() {
        let mut session = LocationSession::new(MockSensor::new(AuthorizationState::NotDetermined));
        session.start();
        session.start();
        session.on_authorization_changed(AuthorizationState::NotDetermined);
        assert_eq!(session.sensor().commands, vec!["request_permission"]);
        assert!(!session.snapshot().receiving);
    }

    #[test]
    fn test_grant_starts_updates() {
        let mut session = LocationSession::new(MockSensor::new(AuthorizationState::NotDetermined));
        session.start();
        session.on_authorization_changed(AuthorizationState::Authorized);
        session.on_position_update(HOME);
        assert_eq!(session.sensor().commands, vec!["request_permission", "start"]);
        assert_eq!(session.current(), Some(HOME));
    }

    #[test]
    fn test_position_before_start_is_dropped() {
        let mut session = LocationSession::new(MockSensor::new(AuthorizationState::Authorized));
        session.on_position_update(HOME);
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_revocation_freezes_coordinate() {
        for blocked in [AuthorizationState::Denied, AuthorizationState::Restricted] {
            let mut session = authorized_session();
            session.on_position_update(HOME);
            session.on_authorization_changed(blocked);
            session.on_position_update(AWAY);

            let snapshot = session.snapshot();
            assert_eq!(snapshot.coordinate, Some(HOME));
            assert_eq!(snapshot.authorization, blocked);
            assert!(!snapshot.receiving);
            assert_eq!(session.sensor().commands, vec!["start", "stop"]);

            session.on_authorization_changed(AuthorizationState::Authorized);
            session.on_position_update(AWAY);
            assert_eq!(session.current(), Some(AWAY));
            assert_eq!(session.sensor().commands, vec!["start", "stop", "start"]);
        }
    }

    #[test]
    fn test_every_state_into_denied_keeps_coordinate() {
        let all = [
            AuthorizationState::NotDetermined,
            AuthorizationState::Denied,
            AuthorizationState::Restricted,
            AuthorizationState::Authorized,
        ];
        for from in all {
            let mut session = authorized_session();
            session.on_position_update(HOME);
            session.on_authorization_changed(from);
            session.on_authorization_changed(AuthorizationState::Denied);
            session.on_position_update(AWAY);
            assert_eq!(session.current(), Some(HOME), "coming from {from}");
            assert!(!session.snapshot().receiving, "coming from {from}");
        }
    }

    #[test]
    fn test_sensor_error_is_not_fatal() {
        let mut session = authorized_session();
        session.on_position_update(HOME);
        session.on_sensor_error(SensorError::Unavailable(String::from("no gps fix")));
        session.on_position_update(AWAY);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.coordinate, Some(HOME));
        assert!(!snapshot.receiving);
        assert_eq!(
            snapshot.last_error.as_deref(),
            Some("location unavailable: no gps fix")
        );

        session.on_authorization_changed(AuthorizationState::Authorized);
        assert!(session.snapshot().last_error.is_none());
        assert!(session.snapshot().receiving);
    }

    #[test]
    fn test_returning_to_not_determined_prompts_again() {
        let mut session = LocationSession::new(MockSensor::new(AuthorizationState::NotDetermined));
        session.start();
        session.on_authorization_changed(AuthorizationState::Authorized);
        session.on_authorization_changed(AuthorizationState::NotDetermined);
        assert_eq!(
            session.sensor().commands,
            vec!["request_permission", "start", "request_permission"]
        );
    }

    #[tokio::test]
    async fn test_run_applies_events_in_order() {
        let mut session = LocationSession::new(MockSensor::new(AuthorizationState::NotDetermined));
        let mut rx = session.subscribe();
        session.start();
        let (tx, events) = mpsc::unbounded_channel();
        for event in [
            SensorEvent::Authorization(AuthorizationState::Authorized),
            SensorEvent::Position(AWAY),
            SensorEvent::Position(HOME),
        ] {
            tx.send(event).expect("test invariant failed");
        }
        drop(tx);

        let session = session.run(events).await;
        assert_eq!(session.current(), Some(HOME));
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.coordinate, Some(HOME));
        assert!(seen.updated_at.is_some());
    }
}

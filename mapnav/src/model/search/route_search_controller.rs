use std::{sync::Arc, time::Duration};

use mapnav_core::model::{Coordinate, RouteResult, ServiceError, TransportMode};
use tokio::sync::watch;

use super::{SearchError, SearchOutcome, SearchQuery, SearchSessionState, SearchSnapshot};
use crate::model::provider::{DirectionsProvider, Geocoder};

/// turns a text query, the user's coordinate and a transport mode into a
/// [RouteResult] using the geocoding and directions collaborators.
///
/// every search is issued a generation token. when a search completes, its
/// result is applied only if no newer search has been initiated in the meantime,
/// so a slow stale response never overwrites a more recent one. superseded
/// requests are not aborted, their results are simply dropped.
pub struct RouteSearchController {
    geocoder: Arc<dyn Geocoder>,
    directions: Arc<dyn DirectionsProvider>,
    timeout: Duration,
    state: watch::Sender<SearchSnapshot>,
}

impl RouteSearchController {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        directions: Arc<dyn DirectionsProvider>,
        mode: TransportMode,
    ) -> Self {
        let (state, _) = watch::channel(SearchSnapshot::new(mode));
        Self {
            geocoder,
            directions,
            timeout: Self::DEFAULT_TIMEOUT,
            state,
        }
    }

    /// limit applied to each collaborator call. expiry is reported as a
    /// service error with a timeout cause.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.borrow().clone()
    }

    pub fn mode(&self) -> TransportMode {
        self.state.borrow().mode
    }

    /// runs a search. blank queries are ignored without touching the state.
    /// geocoding and routing run strictly one after the other.
    pub async fn search(
        &self,
        query: &str,
        user_coordinate: Option<Coordinate>,
        mode: TransportMode,
    ) -> SearchOutcome {
        let Some(query) = SearchQuery::parse(query) else {
            log::debug!("ignoring blank search query");
            return SearchOutcome::EmptyQuery;
        };
        let token = self.begin(&query, mode);
        log::debug!("search #{token} started for '{query}' ({mode})");

        let result = match user_coordinate {
            None => Err(SearchError::LocationUnavailable),
            Some(origin) => self.resolve(&query, origin, mode).await,
        };
        self.finish(token, &query, result)
    }

    /// records a new transport mode. if it differs from the current one and a
    /// query was searched before, the same query text is searched again with
    /// the new mode and the outcome of that search is returned.
    pub async fn set_mode(
        &self,
        mode: TransportMode,
        user_coordinate: Option<Coordinate>,
    ) -> Option<SearchOutcome> {
        let mut last_query = None;
        let changed = self.state.send_if_modified(|s| {
            if s.mode == mode {
                return false;
            }
            s.mode = mode;
            last_query = s.last_query.clone();
            true
        });
        if !changed {
            return None;
        }
        let query = last_query?;
        log::debug!("transport mode changed to {mode}, re-running '{query}'");
        Some(self.search(query.as_str(), user_coordinate, mode).await)
    }

    fn begin(&self, query: &SearchQuery, mode: TransportMode) -> u64 {
        let mut token = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            token = s.generation;
            s.state = SearchSessionState::InFlight;
            s.last_query = Some(query.clone());
            s.mode = mode;
        });
        token
    }

    async fn resolve(
        &self,
        query: &SearchQuery,
        origin: Coordinate,
        mode: TransportMode,
    ) -> Result<RouteResult, SearchError> {
        let destination = tokio::time::timeout(self.timeout, self.geocoder.geocode(query))
            .await
            .unwrap_or(Err(ServiceError::Timeout(self.timeout)))
            .map_err(SearchError::GeocodingServiceError)?
            .ok_or_else(|| SearchError::NoGeocodingMatch(query.to_string()))?;

        let route = self.directions.route(origin, destination, mode);
        let path = tokio::time::timeout(self.timeout, route)
            .await
            .unwrap_or(Err(ServiceError::Timeout(self.timeout)))
            .map_err(SearchError::RoutingServiceError)?
            .ok_or(SearchError::NoRouteFound)?;

        Ok(RouteResult::new(destination, path))
    }

    /// applies a result if `token` still identifies the newest search. the
    /// token check and the write share one critical section.
    fn finish(
        &self,
        token: u64,
        query: &SearchQuery,
        result: Result<RouteResult, SearchError>,
    ) -> SearchOutcome {
        let mut applied = false;
        self.state.send_if_modified(|s| {
            if s.generation != token {
                return false;
            }
            match &result {
                Ok(route) => {
                    s.state = SearchSessionState::Succeeded(route.clone());
                    s.route = Some(route.clone());
                    s.route_query = Some(query.clone());
                }
                Err(e) => s.state = SearchSessionState::Failed(e.clone()),
            }
            applied = true;
            true
        });

        if !applied {
            log::warn!("search #{token} finished after a newer search started, dropping its result");
            return SearchOutcome::Superseded;
        }
        match &result {
            Ok(route) => log::info!("search #{token} succeeded: {}", route.summary()),
            Err(e) => log::info!("search #{token} failed: {e}"),
        }
        SearchOutcome::Completed(result)
    }
}

#[cfg(test)]
mod test {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use async_trait::async_trait;
    use mapnav_core::model::{Coordinate, RoutePath, RouteResult, ServiceError, TransportMode};

    use super::RouteSearchController;
    use crate::model::provider::{DirectionsProvider, Geocoder};
    use crate::model::search::{SearchError, SearchOutcome, SearchQuery, SearchSessionState};

    type CallLog = Arc<Mutex<Vec<String>>>;

    #[derive(Clone)]
    enum Reply<T> {
        Found(T),
        Empty,
        Fail(ServiceError),
        Hang,
    }

    struct MockGeocoder {
        replies: HashMap<String, (Duration, Reply<Coordinate>)>,
        calls: CallLog,
    }

    #[async_trait]
    impl Geocoder for MockGeocoder {
        async fn geocode(&self, query: &SearchQuery) -> Result<Option<Coordinate>, ServiceError> {
            self.calls
                .lock()
                .expect("test invariant failed")
                .push(format!("geocode:{query}"));
            let (delay, reply) = self
                .replies
                .get(query.as_str())
                .cloned()
                .unwrap_or((Duration::ZERO, Reply::Empty));
            resolve_reply(delay, reply).await
        }
    }

    struct MockDirections {
        replies: HashMap<TransportMode, Reply<RoutePath>>,
        calls: CallLog,
    }

    #[async_trait]
    impl DirectionsProvider for MockDirections {
        async fn route(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
            mode: TransportMode,
        ) -> Result<Option<RoutePath>, ServiceError> {
            self.calls
                .lock()
                .expect("test invariant failed")
                .push(format!("route:{mode}"));
            let reply = self
                .replies
                .get(&mode)
                .cloned()
                .unwrap_or_else(|| Reply::Found(lasalle_path()));
            resolve_reply(Duration::ZERO, reply).await
        }
    }

    async fn resolve_reply<T>(delay: Duration, reply: Reply<T>) -> Result<Option<T>, ServiceError> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match reply {
            Reply::Found(t) => Ok(Some(t)),
            Reply::Empty => Ok(None),
            Reply::Fail(e) => Err(e),
            Reply::Hang => std::future::pending().await,
        }
    }

    const USER: Coordinate = Coordinate::new(45.5017, -73.5673);
    const LASALLE: Coordinate = Coordinate::new(45.4419, -73.6128);

    fn lasalle_path() -> RoutePath {
        RoutePath {
            polyline: vec![USER, Coordinate::new(45.4700, -73.5900), LASALLE],
            distance_meters: 12_300.0,
            travel_time_seconds: 1_080.0,
        }
    }

    struct Harness {
        controller: RouteSearchController,
        calls: CallLog,
    }

    fn harness(
        geocodes: Vec<(&str, Duration, Reply<Coordinate>)>,
        routes: Vec<(TransportMode, Reply<RoutePath>)>,
    ) -> Harness {
        let calls: CallLog = Arc::new(Mutex::new(vec![]));
        let geocoder = MockGeocoder {
            replies: geocodes
                .into_iter()
                .map(|(q, d, r)| (q.to_string(), (d, r)))
                .collect(),
            calls: calls.clone(),
        };
        let directions = MockDirections {
            replies: routes.into_iter().collect(),
            calls: calls.clone(),
        };
        let controller = RouteSearchController::new(
            Arc::new(geocoder),
            Arc::new(directions),
            TransportMode::Driving,
        );
        Harness { controller, calls }
    }

    fn lasalle_harness() -> Harness {
        harness(
            vec![("Collège LaSalle", Duration::ZERO, Reply::Found(LASALLE))],
            vec![],
        )
    }

    fn calls(h: &Harness) -> Vec<String> {
        h.calls.lock().expect("test invariant failed").clone()
    }

    #[tokio::test]
    async fn test_lasalle_scenario() {
        let h = lasalle_harness();
        let outcome = h
            .controller
            .search("Collège LaSalle", Some(USER), TransportMode::Driving)
            .await;
        let expected = RouteResult::new(LASALLE, lasalle_path());
        assert_eq!(outcome, SearchOutcome::Completed(Ok(expected.clone())));

        let snapshot = h.controller.snapshot();
        match &snapshot.state {
            SearchSessionState::Succeeded(route) => {
                assert_eq!(route.destination, Coordinate::new(45.4419, -73.6128));
                assert_eq!(route.distance_meters, 12_300.0);
                assert_eq!(route.travel_time_seconds, 1_080.0);
                assert_eq!(route.polyline.len(), 3);
            }
            other => panic!("expected success, found {other:?}"),
        }
        assert_eq!(snapshot.route, Some(expected));
    }

    #[tokio::test]
    async fn test_geocode_once_before_route() {
        let h = lasalle_harness();
        h.controller
            .search("  Collège LaSalle ", Some(USER), TransportMode::Driving)
            .await;
        assert_eq!(calls(&h), vec!["geocode:Collège LaSalle", "route:driving"]);
    }

    #[tokio::test]
    async fn test_blank_query_is_a_no_op() {
        let h = lasalle_harness();
        let before = h.controller.snapshot();
        for query in ["", "   ", "\t\n"] {
            let outcome = h
                .controller
                .search(query, Some(USER), TransportMode::Walking)
                .await;
            assert_eq!(outcome, SearchOutcome::EmptyQuery);
        }
        assert_eq!(h.controller.snapshot(), before);
        assert!(calls(&h).is_empty());
    }

    #[tokio::test]
    async fn test_missing_location_fails_without_geocoding() {
        let h = lasalle_harness();
        let outcome = h
            .controller
            .search("anything", None, TransportMode::Driving)
            .await;
        assert_eq!(
            outcome,
            SearchOutcome::Completed(Err(SearchError::LocationUnavailable))
        );
        assert_eq!(
            h.controller.snapshot().state,
            SearchSessionState::Failed(SearchError::LocationUnavailable)
        );
        assert!(calls(&h).is_empty());
    }

    #[tokio::test]
    async fn test_no_match_keeps_previous_route() {
        let h = lasalle_harness();
        h.controller
            .search("Collège LaSalle", Some(USER), TransportMode::Driving)
            .await;
        let previous = h.controller.snapshot().route;
        assert!(previous.is_some());

        h.controller
            .search("asdkfjasdkf", Some(USER), TransportMode::Driving)
            .await;
        let snapshot = h.controller.snapshot();
        assert_eq!(
            snapshot.state,
            SearchSessionState::Failed(SearchError::NoGeocodingMatch(String::from(
                "asdkfjasdkf"
            )))
        );
        assert_eq!(snapshot.route, previous);
        assert_eq!(snapshot.route_query, SearchQuery::parse("Collège LaSalle"));
        assert_eq!(snapshot.last_query, SearchQuery::parse("asdkfjasdkf"));
        assert_eq!(
            snapshot.error().map(|e| e.to_string()),
            Some(String::from("No result found for query: asdkfjasdkf"))
        );
    }

    #[tokio::test]
    async fn test_routing_failure_keeps_previous_route() {
        let cause = ServiceError::Status(503);
        let h = harness(
            vec![("Collège LaSalle", Duration::ZERO, Reply::Found(LASALLE))],
            vec![(TransportMode::Walking, Reply::Fail(cause.clone()))],
        );
        h.controller
            .search("Collège LaSalle", Some(USER), TransportMode::Driving)
            .await;
        let previous = h.controller.snapshot().route;

        h.controller
            .search("Collège LaSalle", Some(USER), TransportMode::Walking)
            .await;
        let snapshot = h.controller.snapshot();
        assert_eq!(
            snapshot.state,
            SearchSessionState::Failed(SearchError::RoutingServiceError(cause))
        );
        assert_eq!(snapshot.route, previous);
    }

    #[tokio::test]
    async fn test_service_errors_and_empty_routes() {
        let h = harness(
            vec![
                (
                    "broken",
                    Duration::ZERO,
                    Reply::Fail(ServiceError::Request(String::from("dns failure"))),
                ),
                ("island", Duration::ZERO, Reply::Found(LASALLE)),
            ],
            vec![(TransportMode::Transit, Reply::Empty)],
        );
        let outcome = h
            .controller
            .search("broken", Some(USER), TransportMode::Driving)
            .await;
        assert_eq!(
            outcome,
            SearchOutcome::Completed(Err(SearchError::GeocodingServiceError(
                ServiceError::Request(String::from("dns failure"))
            )))
        );
        let outcome = h
            .controller
            .search("island", Some(USER), TransportMode::Transit)
            .await;
        assert_eq!(
            outcome,
            SearchOutcome::Completed(Err(SearchError::NoRouteFound))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_response_is_superseded() {
        let a = Coordinate::new(45.0, -73.0);
        let b = Coordinate::new(46.0, -74.0);
        let h = harness(
            vec![
                ("slow place", Duration::from_secs(5), Reply::Found(a)),
                ("fast place", Duration::from_secs(1), Reply::Found(b)),
            ],
            vec![],
        );
        let (first, second) = tokio::join!(
            h.controller
                .search("slow place", Some(USER), TransportMode::Driving),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                h.controller
                    .search("fast place", Some(USER), TransportMode::Driving)
                    .await
            }
        );
        assert_eq!(first, SearchOutcome::Superseded);
        assert!(matches!(second, SearchOutcome::Completed(Ok(_))));

        let snapshot = h.controller.snapshot();
        assert_eq!(snapshot.generation, 2);
        let route = snapshot.route.expect("test failed");
        assert_eq!(route.destination, b);
        match snapshot.state {
            SearchSessionState::Succeeded(r) => assert_eq!(r.destination, b),
            other => panic!("expected success, found {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repeated_search_is_idempotent() {
        let h = lasalle_harness();
        h.controller
            .search("Collège LaSalle", Some(USER), TransportMode::Driving)
            .await;
        let once = h.controller.snapshot();
        h.controller
            .search("Collège LaSalle", Some(USER), TransportMode::Driving)
            .await;
        let twice = h.controller.snapshot();
        assert_eq!(once.state, twice.state);
        assert_eq!(once.route, twice.route);
        assert_eq!(once.last_query, twice.last_query);
    }

    #[tokio::test]
    async fn test_mode_change_reruns_last_query_text() {
        let h = lasalle_harness();
        assert!(h
            .controller
            .set_mode(TransportMode::Cycling, Some(USER))
            .await
            .is_none());

        h.controller
            .search("Collège LaSalle", Some(USER), TransportMode::Cycling)
            .await;
        assert!(h
            .controller
            .set_mode(TransportMode::Cycling, Some(USER))
            .await
            .is_none());

        let outcome = h
            .controller
            .set_mode(TransportMode::Walking, Some(USER))
            .await;
        assert!(matches!(outcome, Some(SearchOutcome::Completed(Ok(_)))));
        assert_eq!(h.controller.mode(), TransportMode::Walking);
        assert_eq!(
            calls(&h),
            vec![
                "geocode:Collège LaSalle",
                "route:cycling",
                "geocode:Collège LaSalle",
                "route:walking"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_geocoder_times_out() {
        let h = harness(vec![("limbo", Duration::ZERO, Reply::Hang)], vec![]);
        let controller = h.controller.with_timeout(Duration::from_secs(15));
        let outcome = controller
            .search("limbo", Some(USER), TransportMode::Driving)
            .await;
        assert_eq!(
            outcome,
            SearchOutcome::Completed(Err(SearchError::GeocodingServiceError(
                ServiceError::Timeout(Duration::from_secs(15))
            )))
        );
        assert!(!controller.snapshot().is_searching());
    }

    #[tokio::test]
    async fn test_subscribers_observe_result() {
        let h = lasalle_harness();
        let mut rx = h.controller.subscribe();
        h.controller
            .search("Collège LaSalle", Some(USER), TransportMode::Driving)
            .await;
        assert!(rx.has_changed().expect("test failed"));
        let seen = rx.borrow_and_update().clone();
        assert!(matches!(seen.state, SearchSessionState::Succeeded(_)));
    }
}

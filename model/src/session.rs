use api::{Poi, RouteID, RouteRow, RouteSummary, ShapePath};

use crate::{Location, LocationSource, QueryParams};

pub type Generation = usize;

/// The shape overlay currently on the map. At most one exists; fetching
/// another route's shape evicts it.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayedShape {
    pub route_id: RouteID,
    pub branch_letter: Option<String>,
    pub paths: Vec<ShapePath>,
}

impl DisplayedShape {
    pub fn describe(&self) -> String {
        describe_route(&self.route_id, &self.branch_letter)
    }
}

/// The POI list currently shown. Each fetch replaces it wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayedPois {
    pub route_id: RouteID,
    pub branch_letter: Option<String>,
    pub pois: Vec<Poi>,
}

impl DisplayedPois {
    pub fn describe(&self) -> String {
        describe_route(&self.route_id, &self.branch_letter)
    }
}

fn describe_route(route_id: &RouteID, branch_letter: &Option<String>) -> String {
    match branch_letter {
        Some(branch) => format!("route {route_id} branch {branch}"),
        None => format!("route {route_id}"),
    }
}

/// Everything the pages render from, owned in one place. Responses only
/// land through the finish_* calls, with the generation begin_* handed
/// out, so a stale response can never clobber a newer one.
pub struct Session {
    pub location: Option<(Location, LocationSource)>,
    pub params: QueryParams,
    pub rows: Vec<RouteRow>,
    pub shape: Option<DisplayedShape>,
    pub pois: Option<DisplayedPois>,
    pub summaries: Vec<RouteSummary>,

    nearby: FetchState,
    shape_fetch: FetchState,
    poi_fetch: FetchState,
    overview: FetchState,
}

#[derive(Default)]
struct FetchState {
    begun: Generation,
    finished: Generation,
}

impl FetchState {
    fn begin(&mut self) -> Generation {
        self.begun += 1;
        self.begun
    }

    // True when this is the most recent request of its kind
    fn finish(&mut self, generation: Generation) -> bool {
        self.finished = self.finished.max(generation);
        generation == self.begun
    }

    fn is_busy(&self) -> bool {
        self.finished < self.begun
    }
}

impl Session {
    pub fn new(location: Option<(Location, LocationSource)>) -> Self {
        Self {
            location,
            params: QueryParams::new(),
            rows: Vec::new(),
            shape: None,
            pois: None,
            summaries: Vec::new(),
            nearby: FetchState::default(),
            shape_fetch: FetchState::default(),
            poi_fetch: FetchState::default(),
            overview: FetchState::default(),
        }
    }

    pub fn resolved_location(&self) -> Option<Location> {
        self.location.map(|(loc, _)| loc)
    }

    pub fn set_location(&mut self, location: Location, source: LocationSource) {
        self.location = Some((location, source));
    }

    pub fn begin_nearby(&mut self) -> Generation {
        self.nearby.begin()
    }

    /// On success the whole row set is replaced; on failure (None) the
    /// previous rows stay visible. Either way this generation stops
    /// counting as in-flight. Superseded responses are dropped.
    pub fn finish_nearby(&mut self, generation: Generation, rows: Option<Vec<RouteRow>>) -> bool {
        if !self.nearby.finish(generation) {
            debug!("Dropping superseded nearby-schedules response {generation}");
            return false;
        }
        if let Some(rows) = rows {
            self.rows = rows;
        }
        true
    }

    pub fn begin_shape(&mut self) -> Generation {
        self.shape_fetch.begin()
    }

    pub fn finish_shape(&mut self, generation: Generation, shape: Option<DisplayedShape>) -> bool {
        if !self.shape_fetch.finish(generation) {
            debug!("Dropping superseded route-shape response {generation}");
            return false;
        }
        if let Some(shape) = shape {
            self.shape = Some(shape);
        }
        true
    }

    pub fn clear_shape(&mut self) {
        self.shape = None;
    }

    pub fn begin_pois(&mut self) -> Generation {
        self.poi_fetch.begin()
    }

    pub fn finish_pois(&mut self, generation: Generation, pois: Option<DisplayedPois>) -> bool {
        if !self.poi_fetch.finish(generation) {
            debug!("Dropping superseded POI response {generation}");
            return false;
        }
        if let Some(pois) = pois {
            self.pois = Some(pois);
        }
        true
    }

    pub fn begin_overview(&mut self) -> Generation {
        self.overview.begin()
    }

    pub fn finish_overview(
        &mut self,
        generation: Generation,
        summaries: Option<Vec<RouteSummary>>,
    ) -> bool {
        if !self.overview.finish(generation) {
            debug!("Dropping superseded routes-overview response {generation}");
            return false;
        }
        if let Some(summaries) = summaries {
            self.summaries = summaries;
        }
        true
    }

    /// Anything still in flight?
    pub fn is_busy(&self) -> bool {
        self.nearby.is_busy()
            || self.shape_fetch.is_busy()
            || self.poi_fetch.is_busy()
            || self.overview.is_busy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::ScheduleFlag;

    fn row(route: &str) -> RouteRow {
        RouteRow {
            route_id: RouteID(route.to_string()),
            branch_letter: None,
            reduced: ScheduleFlag::NoTrips,
            holiday: ScheduleFlag::NoTrips,
            saturday: ScheduleFlag::MeetsFrequency,
            sunday: ScheduleFlag::MeetsFrequency,
            weekday: ScheduleFlag::MeetsFrequency,
            first_run_seconds: None,
            last_run_seconds: None,
            total_trips: None,
            most_frequent_minutes: None,
            least_frequent_minutes: None,
        }
    }

    #[test]
    fn test_latest_response_wins() {
        let mut session = Session::new(None);
        let first = session.begin_nearby();
        let second = session.begin_nearby();
        assert!(session.is_busy());

        // The first response comes back after being superseded
        assert!(!session.finish_nearby(first, Some(vec![row("stale")])));
        assert!(session.rows.is_empty());
        assert!(session.is_busy());

        assert!(session.finish_nearby(second, Some(vec![row("fresh")])));
        assert_eq!(session.rows[0].route_id.0, "fresh");
        assert!(!session.is_busy());
    }

    #[test]
    fn test_out_of_order_responses() {
        let mut session = Session::new(None);
        let first = session.begin_nearby();
        let second = session.begin_nearby();

        assert!(session.finish_nearby(second, Some(vec![row("fresh")])));
        assert!(!session.is_busy());

        // The older response limps in afterwards and changes nothing
        assert!(!session.finish_nearby(first, Some(vec![row("stale")])));
        assert_eq!(session.rows[0].route_id.0, "fresh");
        assert!(!session.is_busy());
    }

    #[test]
    fn test_failure_keeps_previous_rows() {
        let mut session = Session::new(None);
        let first = session.begin_nearby();
        assert!(session.finish_nearby(first, Some(vec![row("21")])));

        let second = session.begin_nearby();
        assert!(session.is_busy());
        assert!(session.finish_nearby(second, None));
        assert_eq!(session.rows[0].route_id.0, "21");
        assert!(!session.is_busy());
    }

    #[test]
    fn test_one_shape_at_a_time() {
        let mut session = Session::new(None);
        let shape = |route: &str| DisplayedShape {
            route_id: RouteID(route.to_string()),
            branch_letter: None,
            paths: Vec::new(),
        };

        let g = session.begin_shape();
        session.finish_shape(g, Some(shape("21")));
        let g = session.begin_shape();
        session.finish_shape(g, Some(shape("5")));
        assert_eq!(session.shape.as_ref().unwrap().route_id.0, "5");

        session.clear_shape();
        assert!(session.shape.is_none());
    }

    #[test]
    fn test_pois_replaced_wholesale() {
        let mut session = Session::new(None);
        let pois = |route: &str, count: usize| DisplayedPois {
            route_id: RouteID(route.to_string()),
            branch_letter: None,
            pois: (0..count)
                .map(|idx| api::Poi {
                    name: format!("poi {idx}"),
                    poi_type: "park".to_string(),
                    distance: 100.0,
                    coordinates: None,
                    stop: None,
                })
                .collect(),
        };

        let g = session.begin_pois();
        session.finish_pois(g, Some(pois("21", 3)));
        let g = session.begin_pois();
        session.finish_pois(g, Some(pois("5", 1)));

        let displayed = session.pois.as_ref().unwrap();
        assert_eq!(displayed.route_id.0, "5");
        assert_eq!(displayed.pois.len(), 1);
    }

    #[test]
    fn test_describe() {
        let shape = DisplayedShape {
            route_id: RouteID("21".to_string()),
            branch_letter: Some("A".to_string()),
            paths: Vec::new(),
        };
        assert_eq!(shape.describe(), "route 21 branch A");
    }
}

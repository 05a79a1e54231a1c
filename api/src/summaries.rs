use serde::{Deserialize, Serialize};

use crate::rows::RouteID;

/// How the backend wants a route summary presented. The server owns this
/// judgment; an unrecognized color renders neutrally instead of failing
/// the whole response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryColor {
    White,
    Black,
    Green,
    Red,
    #[serde(other)]
    Unknown,
}

/// One row of /api/routes: a route's closest stop to the query point and
/// the server's verdict on its service there.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub route_id: RouteID,
    #[serde(default)]
    pub description: String,
    /// Feet to the route's closest stop
    pub distance: f64,
    /// Typical minutes between departures, if the route runs at all
    #[serde(default)]
    pub frequency: Option<f64>,
    #[serde(default)]
    pub num_departures: Option<usize>,
    #[serde(default = "SummaryColor::unknown")]
    pub color: SummaryColor,
}

impl SummaryColor {
    fn unknown() -> Self {
        Self::Unknown
    }
}

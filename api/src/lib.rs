#[macro_use]
extern crate log;

mod client;
mod error;
mod pois;
mod rows;
mod shapes;
mod summaries;

pub use crate::client::{ApiClient, DEFAULT_BASE_URL};
pub use crate::error::{ApiError, ApiResult};
pub use crate::pois::{Poi, PoiStop};
pub use crate::rows::{RouteID, RouteRow, ScheduleFlag};
pub use crate::shapes::ShapePath;
pub use crate::summaries::{RouteSummary, SummaryColor};

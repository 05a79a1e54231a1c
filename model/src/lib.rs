#[macro_use]
extern crate log;

mod export;
mod location;
mod query;
mod render;
mod session;
mod time;

use thiserror::Error;

pub use self::export::rows_to_csv;
pub use self::location::{Location, LocationSource, DEFAULT_LOCATION};
pub use self::query::QueryParams;
pub use self::render::{render_rows, Cell, RenderedRow, Tone};
pub use self::session::{DisplayedPois, DisplayedShape, Generation, Session};
pub use self::time::{fmt_clock, fmt_headway, NOT_APPLICABLE};

/// Input problems caught before any request goes out. The Display strings
/// are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("Please enter a walking distance greater than zero.")]
    BadDistance,
    #[error("Please enter a frequency threshold greater than zero.")]
    BadFrequency,
    #[error("\"{0}\" isn't a number.")]
    NotANumber(String),
    #[error("Latitude must be between -90 and 90.")]
    LatitudeOutOfRange,
    #[error("Longitude must be between -180 and 180.")]
    LongitudeOutOfRange,
    #[error("Your location hasn't been determined yet.")]
    LocationNotResolved,
}

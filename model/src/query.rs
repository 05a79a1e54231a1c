use serde::{Deserialize, Serialize};

use crate::InvalidInput;

/// What the user is asking for: how far they'll walk to a stop, and the
/// worst headway they'll put up with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub distance_ft: f64,
    pub frequency_min: f64,
}

impl QueryParams {
    /// A quarter mile walk and a 15 minute headway.
    pub fn new() -> Self {
        Self {
            distance_ft: 1320.0,
            frequency_min: 15.0,
        }
    }

    /// Both values must be strictly positive before any request fires.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !self.distance_ft.is_finite() || self.distance_ft <= 0.0 {
            return Err(InvalidInput::BadDistance);
        }
        if !self.frequency_min.is_finite() || self.frequency_min <= 0.0 {
            return Err(InvalidInput::BadFrequency);
        }
        Ok(())
    }
}

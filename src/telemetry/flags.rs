use mavlink::common::{UtmDataAvailFlags, UtmFlightState};

/// Availability bitmask and flight state attached to `UTM_GLOBAL_POSITION`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Availability {
    pub flags: UtmDataAvailFlags,
    pub flight_state: UtmFlightState,
}

impl Availability {
    /// Every sample carries time, id, position, both altitudes and both
    /// velocity groups, and the simulated vehicle is always airborne.
    pub fn complete() -> Self {
        Self {
            flags: UtmDataAvailFlags::UTM_DATA_AVAIL_FLAGS_TIME_VALID
                | UtmDataAvailFlags::UTM_DATA_AVAIL_FLAGS_UAS_ID_AVAILABLE
                | UtmDataAvailFlags::UTM_DATA_AVAIL_FLAGS_POSITION_AVAILABLE
                | UtmDataAvailFlags::UTM_DATA_AVAIL_FLAGS_ALTITUDE_AVAILABLE
                | UtmDataAvailFlags::UTM_DATA_AVAIL_FLAGS_RELATIVE_ALTITUDE_AVAILABLE
                | UtmDataAvailFlags::UTM_DATA_AVAIL_FLAGS_HORIZONTAL_VELO_AVAILABLE
                | UtmDataAvailFlags::UTM_DATA_AVAIL_FLAGS_VERTICAL_VELO_AVAILABLE,
            flight_state: UtmFlightState::UTM_FLIGHT_STATE_AIRBORNE,
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self::complete()
    }
}

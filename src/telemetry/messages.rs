use mavlink::common::{GLOBAL_POSITION_INT_DATA, MavMessage, UTM_GLOBAL_POSITION_DATA};
use strum_macros::Display;

use super::flags::Availability;
use super::scaling::{ScaledFields, HEADING_UNKNOWN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MessageKind {
    #[strum(serialize = "GLOBAL_POSITION_INT")]
    Primary,
    #[strum(serialize = "UTM_GLOBAL_POSITION")]
    Secondary,
}

/// Per-send values that do not come from the sample.
#[derive(Debug, Clone, Copy)]
pub struct Stamp {
    pub time_boot_ms: u32,
    pub time_unix_us: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryMessage {
    Primary(GLOBAL_POSITION_INT_DATA),
    Secondary(UTM_GLOBAL_POSITION_DATA),
}

impl TelemetryMessage {
    pub fn build(
        kind: MessageKind,
        fields: &ScaledFields,
        stamp: Stamp,
        availability: &Availability,
    ) -> Self {
        match kind {
            MessageKind::Primary => Self::Primary(GLOBAL_POSITION_INT_DATA {
                time_boot_ms: stamp.time_boot_ms,
                lat: fields.lat,
                lon: fields.lon,
                alt: fields.alt,
                relative_alt: fields.relative_alt,
                vx: fields.vx,
                vy: fields.vy,
                vz: fields.vz,
                hdg: HEADING_UNKNOWN,
            }),
            MessageKind::Secondary => Self::Secondary(UTM_GLOBAL_POSITION_DATA {
                time: stamp.time_unix_us,
                uas_id: fields.uas_id.0,
                lat: fields.lat,
                lon: fields.lon,
                alt: fields.alt,
                relative_alt: fields.relative_alt,
                vx: fields.vx,
                vy: fields.vy,
                vz: fields.vz,
                h_acc: fields.h_acc,
                v_acc: fields.v_acc,
                vel_acc: fields.vel_acc,
                next_lat: 0,
                next_lon: 0,
                next_alt: 0,
                update_rate: 0,
                flight_state: availability.flight_state,
                flags: availability.flags,
            }),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Primary(_) => MessageKind::Primary,
            Self::Secondary(_) => MessageKind::Secondary,
        }
    }

    pub fn to_mav(&self) -> MavMessage {
        match self {
            Self::Primary(data) => MavMessage::GLOBAL_POSITION_INT(data.clone()),
            Self::Secondary(data) => MavMessage::UTM_GLOBAL_POSITION(data.clone()),
        }
    }
}

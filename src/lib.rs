//! Replays recorded vehicle positions as MAVLink `GLOBAL_POSITION_INT` and
//! `UTM_GLOBAL_POSITION` telemetry.

pub mod config;
pub mod dataset;
pub mod emitter;
pub mod telemetry;
pub mod transport;

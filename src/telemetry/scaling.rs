//! Conversion from the human units of a [`Sample`] to MAVLink fixed-point
//! wire units.
//!
//! Every conversion rounds to the nearest integer and refuses values the
//! destination type cannot hold. Nothing is truncated silently.

use std::any::type_name;

use super::error::ScaleError;
use crate::dataset::{Sample, UasId};

pub const DEG_TO_DEGE7: f64 = 1e7;
pub const M_TO_MM: f64 = 1000.0;
pub const MS_TO_CMS: f64 = 100.0;
pub const ACCURACY_FACTOR: f64 = 1000.0;

/// `hdg` value meaning "heading unknown".
pub const HEADING_UNKNOWN: u16 = u16::MAX;

/// Position fields of one sample, already in wire units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledFields {
    pub lat: i32,
    pub lon: i32,
    pub alt: i32,
    pub relative_alt: i32,
    pub vx: i16,
    pub vy: i16,
    pub vz: i16,
    pub h_acc: u16,
    pub v_acc: u16,
    pub vel_acc: u16,
    pub uas_id: UasId,
}

impl ScaledFields {
    pub fn from_sample(sample: &Sample) -> Result<Self, ScaleError> {
        Ok(Self {
            lat: scale("lat", sample.latitude_deg, DEG_TO_DEGE7)?,
            lon: scale("lon", sample.longitude_deg, DEG_TO_DEGE7)?,
            alt: scale("alt", sample.altitude_m, M_TO_MM)?,
            relative_alt: scale("relative_alt", sample.relative_altitude_m, M_TO_MM)?,
            vx: scale("vx", sample.velocity_north_ms, MS_TO_CMS)?,
            vy: scale("vy", sample.velocity_east_ms, MS_TO_CMS)?,
            vz: scale("vz", sample.velocity_down_ms, MS_TO_CMS)?,
            h_acc: scale("h_acc", sample.horizontal_accuracy_m, ACCURACY_FACTOR)?,
            v_acc: scale("v_acc", sample.vertical_accuracy_m, ACCURACY_FACTOR)?,
            vel_acc: scale("vel_acc", sample.velocity_accuracy_ms, ACCURACY_FACTOR)?,
            uas_id: sample.uas_id,
        })
    }
}

/// Multiply `value` by `factor`, round, and convert into `T`.
pub fn scale<T>(field: &'static str, value: f64, factor: f64) -> Result<T, ScaleError>
where
    T: TryFrom<i64>,
{
    let out_of_range = || ScaleError::FieldOutOfRange {
        field,
        value,
        factor,
        target: type_name::<T>(),
    };

    let scaled = (value * factor).round();
    // i64 bounds as f64; the upper one is exclusive after rounding up.
    if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
        return Err(out_of_range());
    }

    T::try_from(scaled as i64).map_err(|_| out_of_range())
}

/// Milliseconds since `elapsed` started, wrapped to the `u32` wire width.
pub fn time_boot_ms(elapsed: std::time::Duration) -> u32 {
    (elapsed.as_millis() % (1u128 << 32)) as u32
}

/// Microseconds since the Unix epoch for a wall-clock instant.
pub fn unix_time_us(now: chrono::DateTime<chrono::Utc>) -> u64 {
    u64::try_from(now.timestamp_micros()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn degrees_to_dege7() {
        assert_eq!(scale::<i32>("lat", 47.1234567, DEG_TO_DEGE7), Ok(471_234_567));
        assert_eq!(scale::<i32>("lon", -122.4194155, DEG_TO_DEGE7), Ok(-1_224_194_155));
    }

    #[test]
    fn meters_to_millimeters() {
        assert_eq!(scale::<i32>("alt", 12.5, M_TO_MM), Ok(12_500));
    }

    #[test]
    fn velocity_to_cm_per_second() {
        assert_eq!(scale::<i16>("vx", -3.2, MS_TO_CMS), Ok(-320));
    }

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(scale::<i16>("vx", 0.019, MS_TO_CMS), Ok(2));
        assert_eq!(scale::<i16>("vx", -0.019, MS_TO_CMS), Ok(-2));
    }

    #[test]
    fn altitude_beyond_i32_is_rejected() {
        let err = scale::<i32>("alt", 2_147_484.0, M_TO_MM).unwrap_err();
        assert!(matches!(err, ScaleError::FieldOutOfRange { field: "alt", .. }));
    }

    #[test]
    fn velocity_beyond_i16_is_rejected() {
        assert!(scale::<i16>("vz", 400.0, MS_TO_CMS).is_err());
        assert_eq!(scale::<i16>("vz", 327.67, MS_TO_CMS), Ok(i16::MAX));
    }

    #[test]
    fn negative_accuracy_is_rejected() {
        assert!(scale::<u16>("h_acc", -0.5, ACCURACY_FACTOR).is_err());
        assert_eq!(scale::<u16>("h_acc", 65.535, ACCURACY_FACTOR), Ok(u16::MAX));
    }

    #[test]
    fn non_finite_is_rejected() {
        assert!(scale::<i32>("lat", f64::NAN, DEG_TO_DEGE7).is_err());
        assert!(scale::<i32>("lat", f64::INFINITY, DEG_TO_DEGE7).is_err());
        assert!(scale::<i32>("lat", 1e300, DEG_TO_DEGE7).is_err());
    }

    #[test]
    fn boot_time_wraps_at_u32() {
        assert_eq!(time_boot_ms(Duration::from_millis(1_500)), 1_500);
        let wrap = Duration::from_millis(u32::MAX as u64 + 11);
        assert_eq!(time_boot_ms(wrap), 10);
    }

    #[test]
    fn unix_time_is_in_microseconds() {
        let t = chrono::DateTime::from_timestamp(1_700_000_000, 250_000_000).unwrap();
        assert_eq!(unix_time_us(t), 1_700_000_000_250_000);
    }
}

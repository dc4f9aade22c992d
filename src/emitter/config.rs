use crate::config::ConfigError;
use crate::telemetry::Availability;

pub const DEFAULT_POSITION_INTERVAL_MS: u32 = 250;
pub const DEFAULT_UTM_INTERVAL_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterConfig {
    /// Spacing of `GLOBAL_POSITION_INT` messages.
    pub primary_interval_ms: u32,
    /// Spacing of `UTM_GLOBAL_POSITION` messages, a multiple of the above.
    pub secondary_interval_ms: u32,
    pub secondary_enabled: bool,
    /// Only replay samples from this system id.
    pub system_filter: Option<u8>,
    /// Stop after this many passes over the dataset.
    pub max_cycles: Option<u64>,
    pub availability: Availability,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            primary_interval_ms: DEFAULT_POSITION_INTERVAL_MS,
            secondary_interval_ms: DEFAULT_UTM_INTERVAL_MS,
            secondary_enabled: true,
            system_filter: None,
            max_cycles: None,
            availability: Availability::complete(),
        }
    }
}

impl EmitterConfig {
    /// Number of primary messages sent per sample.
    pub fn oversampling_ratio(&self) -> Result<u32, ConfigError> {
        if self.primary_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("position"));
        }
        if self.secondary_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("UTM"));
        }
        if self.secondary_interval_ms % self.primary_interval_ms != 0 {
            return Err(ConfigError::NotMultiple {
                primary_ms: self.primary_interval_ms,
                secondary_ms: self.secondary_interval_ms,
            });
        }
        Ok(self.secondary_interval_ms / self.primary_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(primary: u32, secondary: u32) -> EmitterConfig {
        EmitterConfig {
            primary_interval_ms: primary,
            secondary_interval_ms: secondary,
            ..EmitterConfig::default()
        }
    }

    #[test]
    fn default_ratio_is_four() {
        assert_eq!(EmitterConfig::default().oversampling_ratio().unwrap(), 4);
    }

    #[test]
    fn equal_intervals_give_ratio_one() {
        assert_eq!(config(500, 500).oversampling_ratio().unwrap(), 1);
    }

    #[test]
    fn non_multiple_is_rejected() {
        assert!(matches!(
            config(300, 1000).oversampling_ratio(),
            Err(ConfigError::NotMultiple { .. })
        ));
        // Secondary faster than primary is not a multiple either.
        assert!(config(1000, 250).oversampling_ratio().is_err());
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(matches!(
            config(0, 1000).oversampling_ratio(),
            Err(ConfigError::ZeroInterval("position"))
        ));
        assert!(matches!(
            config(250, 0).oversampling_ratio(),
            Err(ConfigError::ZeroInterval("UTM"))
        ));
    }
}

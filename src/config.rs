use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::dataset::RowPolicy;
use crate::emitter::EmitterConfig;
use crate::transport::{SourceIdentity, DEFAULT_CONNECT_TIMEOUT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("missing required option: {0}")]
    Missing(&'static str),
    #[error("invalid duration {value:?}: {message}")]
    InvalidDuration { value: String, message: String },
    #[error("{0} interval must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("UTM interval {secondary_ms} ms is not a multiple of position interval {primary_ms} ms")]
    NotMultiple { primary_ms: u32, secondary_ms: u32 },
}

/// Every setting the simulator understands, all optional.
///
/// Filled from a YAML file and from the command line; command-line values
/// win.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub input: Option<PathBuf>,
    pub output: Option<String>,
    pub sys_id: Option<u8>,
    pub primary_only: Option<bool>,
    pub position_interval_ms: Option<u32>,
    pub utm_interval_ms: Option<u32>,
    pub connect_timeout: Option<String>,
    pub loops: Option<u64>,
    pub on_invalid_row: Option<RowPolicy>,
    pub source_system: Option<u8>,
    pub source_component: Option<u8>,
}

impl Options {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let options: Options = serde_yaml::from_str(&content)?;
        Ok(options)
    }

    /// Take every value set in `self`, falling back to `base`.
    pub fn or(self, base: Options) -> Options {
        Options {
            input: self.input.or(base.input),
            output: self.output.or(base.output),
            sys_id: self.sys_id.or(base.sys_id),
            primary_only: self.primary_only.or(base.primary_only),
            position_interval_ms: self.position_interval_ms.or(base.position_interval_ms),
            utm_interval_ms: self.utm_interval_ms.or(base.utm_interval_ms),
            connect_timeout: self.connect_timeout.or(base.connect_timeout),
            loops: self.loops.or(base.loops),
            on_invalid_row: self.on_invalid_row.or(base.on_invalid_row),
            source_system: self.source_system.or(base.source_system),
            source_component: self.source_component.or(base.source_component),
        }
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub output: String,
    pub row_policy: RowPolicy,
    pub connect_timeout: Duration,
    pub identity: SourceIdentity,
    pub emitter: EmitterConfig,
}

impl TryFrom<Options> for Settings {
    type Error = ConfigError;

    fn try_from(options: Options) -> Result<Self, Self::Error> {
        let defaults = EmitterConfig::default();
        let identity = SourceIdentity::default();

        let emitter = EmitterConfig {
            primary_interval_ms: options
                .position_interval_ms
                .unwrap_or(defaults.primary_interval_ms),
            secondary_interval_ms: options
                .utm_interval_ms
                .unwrap_or(defaults.secondary_interval_ms),
            secondary_enabled: !options.primary_only.unwrap_or(false),
            system_filter: options.sys_id,
            max_cycles: options.loops,
            ..defaults
        };
        emitter.oversampling_ratio()?;

        let connect_timeout = options
            .connect_timeout
            .as_deref()
            .map(parse_duration)
            .transpose()?
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT);

        Ok(Settings {
            input: options.input.ok_or(ConfigError::Missing("input"))?,
            output: options.output.ok_or(ConfigError::Missing("output"))?,
            row_policy: options.on_invalid_row.unwrap_or_default(),
            connect_timeout,
            identity: SourceIdentity {
                system_id: options.source_system.unwrap_or(identity.system_id),
                component_id: options.source_component.unwrap_or(identity.component_id),
            },
            emitter,
        })
    }
}

fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(s.trim()).map_err(|e| ConfigError::InvalidDuration {
        value: s.to_string(),
        message: e.to_string(),
    })
}

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::error::DatasetError;
use super::sample::{Sample, UasId, UasIdError, UAS_ID_LEN};
use crate::telemetry::ScaledFields;

/// What to do with a row that fails to parse or validate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RowPolicy {
    /// Abort loading on the first bad row.
    #[default]
    FailFast,
    /// Log the bad row and continue with the next one.
    Skip,
}

/// Raw CSV row, before any validation.
#[derive(Debug, Deserialize)]
struct Record {
    lat: String,
    lon: String,
    alt: String,
    relative_alt: String,
    vx: String,
    vy: String,
    vz: String,
    h_acc: String,
    v_acc: String,
    vel_acc: String,
    uas_id: String,
    #[serde(default, alias = "system_id", alias = "sysid")]
    sys_id: Option<String>,
}

/// Samples in replay order. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Result<Self, DatasetError> {
        if samples.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { samples })
    }

    pub fn load(path: &Path, policy: RowPolicy) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        let dataset = Self::from_reader(file, policy)?;
        log::info!("Loaded {} samples from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R, policy: RowPolicy) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut samples = Vec::new();
        for (i, record) in rdr.deserialize::<Record>().enumerate() {
            let row = i + 1;
            let parsed = record
                .map_err(DatasetError::from)
                .and_then(|r| parse_record(row, r));

            match (parsed, policy) {
                (Ok(sample), _) => samples.push(sample),
                (Err(e), RowPolicy::Skip) => log::warn!("Skipping row {}: {}", row, e),
                (Err(e), RowPolicy::FailFast) => return Err(e),
            }
        }

        Self::new(samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn parse_record(row: usize, record: Record) -> Result<Sample, DatasetError> {
    let number = |field: &'static str, value: &str| -> Result<f64, DatasetError> {
        value.trim().parse::<f64>().map_err(|_| DatasetError::InvalidNumber {
            row,
            field,
            value: value.to_string(),
        })
    };

    let uas_id = UasId::from_hex(&record.uas_id).map_err(|e| match e {
        UasIdError::Hex(source) => DatasetError::UasIdHex { row, source },
        UasIdError::Length(actual) => DatasetError::UasIdLength {
            row,
            expected: UAS_ID_LEN,
            actual,
        },
    })?;

    let system_id = match record.sys_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(value.parse::<u8>().map_err(|_| DatasetError::InvalidSystemId {
            row,
            value: value.to_string(),
        })?),
    };

    let sample = Sample {
        latitude_deg: number("lat", &record.lat)?,
        longitude_deg: number("lon", &record.lon)?,
        altitude_m: number("alt", &record.alt)?,
        relative_altitude_m: number("relative_alt", &record.relative_alt)?,
        velocity_north_ms: number("vx", &record.vx)?,
        velocity_east_ms: number("vy", &record.vy)?,
        velocity_down_ms: number("vz", &record.vz)?,
        horizontal_accuracy_m: number("h_acc", &record.h_acc)?,
        vertical_accuracy_m: number("v_acc", &record.v_acc)?,
        velocity_accuracy_ms: number("vel_acc", &record.vel_acc)?,
        uas_id,
        system_id,
    };

    // Reject rows that cannot be encoded before the first message goes out.
    ScaledFields::from_sample(&sample)
        .map_err(|source| DatasetError::OutOfRange { row, source })?;

    Ok(sample)
}

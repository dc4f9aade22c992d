use std::fmt;

/// Byte length of the `uas_id` field of `UTM_GLOBAL_POSITION`.
pub const UAS_ID_LEN: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UasId(pub [u8; UAS_ID_LEN]);

#[derive(Debug, Clone, PartialEq)]
pub enum UasIdError {
    Hex(hex::FromHexError),
    Length(usize),
}

impl UasId {
    pub fn from_hex(text: &str) -> Result<Self, UasIdError> {
        let bytes = hex::decode(text.trim()).map_err(UasIdError::Hex)?;
        let len = bytes.len();
        bytes
            .try_into()
            .map(UasId)
            .map_err(|_| UasIdError::Length(len))
    }
}

impl fmt::Display for UasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// One recorded position observation, in human units.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    pub relative_altitude_m: f64,
    pub velocity_north_ms: f64,
    pub velocity_east_ms: f64,
    pub velocity_down_ms: f64,
    pub horizontal_accuracy_m: f64,
    pub vertical_accuracy_m: f64,
    pub velocity_accuracy_ms: f64,
    pub uas_id: UasId,
    pub system_id: Option<u8>,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} N, {} E, {} m, {} rel_alt; {}, {}, {} m/s; {} h_acc, {} v_acc, {} vel_acc",
            self.latitude_deg,
            self.longitude_deg,
            self.altitude_m,
            self.relative_altitude_m,
            self.velocity_north_ms,
            self.velocity_east_ms,
            self.velocity_down_ms,
            self.horizontal_accuracy_m,
            self.vertical_accuracy_m,
            self.velocity_accuracy_ms
        )
    }
}

use std::time::Duration;

use mavlink::common::MavMessage;
use mavlink::{MavConnection, MavHeader, MavlinkVersion};

use super::error::{ConnectError, TransportError};
use crate::telemetry::TelemetryMessage;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// MAVLink header identity of the simulated vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceIdentity {
    pub system_id: u8,
    pub component_id: u8,
}

impl Default for SourceIdentity {
    fn default() -> Self {
        Self {
            system_id: 1,
            component_id: 0,
        }
    }
}

/// Destination for encoded telemetry. The emitter is its only writer.
pub trait TelemetrySink {
    fn send(&mut self, message: &TelemetryMessage) -> Result<(), TransportError>;
}

pub struct MavlinkSink {
    address: String,
    header: MavHeader,
    connection: Box<dyn MavConnection<MavMessage> + Send + Sync>,
}

impl TelemetrySink for MavlinkSink {
    fn send(&mut self, message: &TelemetryMessage) -> Result<(), TransportError> {
        // Sequence numbers are assigned by the connection.
        self.connection
            .send(&self.header, &message.to_mav())
            .map(|_| ())
            .map_err(|e| TransportError::Write {
                address: self.address.clone(),
                message: e.to_string(),
            })
    }
}

/// Open a MAVLink v2 connection, giving up after `timeout`.
///
/// Dialing blocks, so it runs on the blocking pool.
pub async fn connect(
    address: &str,
    identity: SourceIdentity,
    timeout: Duration,
) -> Result<MavlinkSink, ConnectError> {
    log::info!("Starting MAVLink connection to {}", address);

    let target = address.to_string();
    let dial = tokio::task::spawn_blocking(move || mavlink::connect::<MavMessage>(&target));

    let mut connection = match tokio::time::timeout(timeout, dial).await {
        Ok(Ok(Ok(connection))) => connection,
        Ok(Ok(Err(source))) => {
            return Err(ConnectError::Io {
                address: address.to_string(),
                source,
            })
        }
        Ok(Err(_)) => {
            return Err(ConnectError::Aborted {
                address: address.to_string(),
            })
        }
        Err(_) => {
            return Err(ConnectError::Timeout {
                address: address.to_string(),
                timeout,
            })
        }
    };
    connection.set_protocol_version(MavlinkVersion::V2);

    log::info!(
        "Connected to {} as system {} component {}",
        address,
        identity.system_id,
        identity.component_id
    );

    Ok(MavlinkSink {
        address: address.to_string(),
        header: MavHeader {
            system_id: identity.system_id,
            component_id: identity.component_id,
            sequence: 0,
        },
        connection,
    })
}

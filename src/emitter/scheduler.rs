use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use strum_macros::Display;
use tokio::time::{sleep_until, Instant};

use super::config::EmitterConfig;
use super::error::EmitterError;
use crate::config::ConfigError;
use crate::dataset::{Dataset, Replay, ReplayPosition, Sample};
use crate::telemetry::scaling::{time_boot_ms, unix_time_us};
use crate::telemetry::{MessageKind, ScaledFields, Stamp, TelemetryMessage};
use crate::transport::TelemetrySink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    Shutdown,
    Completed,
    TransportFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped(StopReason),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub primary_sent: u64,
    pub secondary_sent: u64,
    pub skipped: u64,
    pub filtered: u64,
    pub cycles: u64,
}

enum Prepared {
    Emit(ScaledFields),
    Filtered,
    Invalid,
}

struct Session {
    started: Instant,
    next_deadline: Instant,
    summary: RunSummary,
}

impl Session {
    fn stamp(&self) -> Stamp {
        Stamp {
            time_boot_ms: time_boot_ms(Instant::now() - self.started),
            time_unix_us: unix_time_us(Utc::now()),
        }
    }

    // Late sends fire immediately, without a catch-up burst.
    fn advance(&mut self, interval: Duration) {
        self.next_deadline = (self.next_deadline + interval).max(Instant::now());
    }
}

/// Paces one dataset into a sink as interleaved `GLOBAL_POSITION_INT` and
/// `UTM_GLOBAL_POSITION` messages.
///
/// Each sample gets `oversampling_ratio` primary messages, one per primary
/// interval, followed by a single secondary message when enabled. The
/// dataset is replayed from the start after its last sample, and the boot
/// time keeps counting across those wraps.
pub struct Scheduler<S> {
    config: EmitterConfig,
    ratio: u32,
    sink: S,
    state: SchedulerState,
}

impl<S: TelemetrySink> Scheduler<S> {
    pub fn new(config: EmitterConfig, sink: S) -> Result<Self, ConfigError> {
        let ratio = config.oversampling_ratio()?;
        Ok(Self {
            config,
            ratio,
            sink,
            state: SchedulerState::Idle,
        })
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn oversampling_ratio(&self) -> u32 {
        self.ratio
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Emit until `shutdown` resolves, `max_cycles` passes complete, or a
    /// send fails.
    pub async fn run<F>(
        &mut self,
        dataset: &Dataset,
        shutdown: F,
    ) -> Result<RunSummary, EmitterError>
    where
        F: Future<Output = ()>,
    {
        if self.state != SchedulerState::Idle {
            return Err(EmitterError::NotIdle);
        }

        let prepared: Vec<Prepared> = dataset
            .samples()
            .iter()
            .enumerate()
            .map(|(index, sample)| self.prepare(index, sample))
            .collect();
        if !prepared.iter().any(|p| matches!(p, Prepared::Emit(_))) {
            self.state = SchedulerState::Stopped(StopReason::Completed);
            return Err(EmitterError::NothingToEmit);
        }

        tokio::pin!(shutdown);
        self.state = SchedulerState::Running;
        let interval = Duration::from_millis(self.config.primary_interval_ms.into());
        let started = Instant::now();
        let mut session = Session {
            started,
            next_deadline: started,
            summary: RunSummary::default(),
        };

        log::info!(
            "Replaying {} samples: {} position messages every {} ms, UTM {}",
            dataset.len(),
            self.ratio,
            self.config.primary_interval_ms,
            if self.config.secondary_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );

        for (position, sample) in Replay::new(dataset.samples()) {
            session.summary.cycles = position.cycle;
            if self.config.max_cycles.is_some_and(|max| position.cycle >= max) {
                return Ok(self.finish(session, StopReason::Completed));
            }

            let fields = match &prepared[position.index] {
                Prepared::Emit(fields) => fields,
                Prepared::Filtered => {
                    session.summary.filtered += 1;
                    continue;
                }
                Prepared::Invalid => {
                    session.summary.skipped += 1;
                    continue;
                }
            };
            log::debug!("IN: {}", sample);

            for _ in 0..self.ratio {
                if wait_for_deadline(session.next_deadline, &mut shutdown).await {
                    return Ok(self.finish(session, StopReason::Shutdown));
                }
                self.emit(MessageKind::Primary, fields, session.stamp(), position)?;
                session.summary.primary_sent += 1;
                session.advance(interval);
            }

            if self.config.secondary_enabled {
                if wait_for_deadline(session.next_deadline, &mut shutdown).await {
                    return Ok(self.finish(session, StopReason::Shutdown));
                }
                self.emit(MessageKind::Secondary, fields, session.stamp(), position)?;
                session.summary.secondary_sent += 1;
            }
        }

        // Replay only ends for an empty dataset, which Dataset rules out.
        Ok(self.finish(session, StopReason::Completed))
    }

    fn prepare(&self, index: usize, sample: &Sample) -> Prepared {
        if let Some(wanted) = self.config.system_filter {
            if sample.system_id != Some(wanted) {
                log::debug!(
                    "Sample {} is from system {:?}, not {}; not replayed",
                    index,
                    sample.system_id,
                    wanted
                );
                return Prepared::Filtered;
            }
        }

        match ScaledFields::from_sample(sample) {
            Ok(fields) => Prepared::Emit(fields),
            Err(e) => {
                log::warn!("Skipping sample {}: {}", index, e);
                Prepared::Invalid
            }
        }
    }

    fn emit(
        &mut self,
        kind: MessageKind,
        fields: &ScaledFields,
        stamp: Stamp,
        position: ReplayPosition,
    ) -> Result<(), EmitterError> {
        let message = TelemetryMessage::build(kind, fields, stamp, &self.config.availability);

        if let Err(source) = self.sink.send(&message) {
            log::error!(
                "Sending {} for sample {} (cycle {}) failed: {}",
                kind,
                position.index,
                position.cycle,
                source
            );
            self.state = SchedulerState::Stopped(StopReason::TransportFailed);
            return Err(EmitterError::Transport {
                kind,
                cycle: position.cycle,
                index: position.index,
                source,
            });
        }

        log::info!("OUT: {:?}", message);
        Ok(())
    }

    fn finish(&mut self, session: Session, reason: StopReason) -> RunSummary {
        self.state = SchedulerState::Stopped(reason);
        let summary = session.summary;
        log::info!(
            "Emitter stopped ({}): {} position, {} UTM messages over {} cycles",
            reason,
            summary.primary_sent,
            summary.secondary_sent,
            summary.cycles
        );
        summary
    }
}

async fn wait_for_deadline<F>(deadline: Instant, shutdown: &mut std::pin::Pin<&mut F>) -> bool
where
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = shutdown.as_mut() => true,
        _ = sleep_until(deadline) => false,
    }
}

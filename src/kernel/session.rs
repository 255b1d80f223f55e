use std::sync::Arc;
use tokio::time::{interval_at, Duration, Instant, Interval};
use tracing::{debug, info, trace};

use super::aggregator::Aggregator;
use super::event::{PageEvent, TransmissionKind};
use super::record::DataRecord;
use super::transmitter::Transmitter;
use crate::config::Config;
use crate::host::{EventSource, PageEnvironment};
use crate::services::transport::Transport;

pub const TIMER_PERIOD: Duration = Duration::from_millis(1000);

/// One page lifetime: recorders wired to a record, plus the two
/// transmissions that bracket it.
pub struct Session {
    aggregator: Aggregator,
    transmitter: Transmitter,
    closed: bool,
}

impl Session {
    /// Wires recorders and immediately fires the load transmission. The
    /// load payload does not wait for the page `Load` event, so it only
    /// carries the seed, the path and whatever `attach` hooks wrote.
    pub fn start(mut config: Config, env: &dyn PageEnvironment, transport: Arc<dyn Transport>) -> Self {
        let endpoint = config.endpoint();
        let aggregator = Aggregator::from_config(&mut config, env);
        let mut transmitter = Transmitter::new(endpoint, transport);

        info!(
            "Capturevate session started. Endpoint: {}. Recorders: {:?}",
            transmitter.endpoint(),
            aggregator.recorder_names()
        );
        transmitter.transmit(TransmissionKind::Load, aggregator.record());

        Self {
            aggregator,
            transmitter,
            closed: false,
        }
    }

    /// Synchronous step for hosts that drive the session themselves. Such
    /// hosts are also responsible for `SecondElapsed` ticks.
    pub fn handle(&mut self, event: PageEvent) {
        if self.closed {
            debug!("Session closed, dropping {:?}", event);
            return;
        }

        match event {
            PageEvent::Unload => self.unload(),
            event => self.aggregator.dispatch(&event),
        }
    }

    /// Sends the unload transmission and closes the session. Blocks until
    /// the transport has attempted delivery.
    pub fn unload(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.transmitter
            .transmit(TransmissionKind::Unload, self.aggregator.record());
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn record(&self) -> &DataRecord {
        self.aggregator.record()
    }

    pub fn recorder_names(&self) -> Vec<&str> {
        self.aggregator.recorder_names()
    }

    /// Async driver. Pulls events from `source` and, once the page has
    /// loaded, ticks `SecondElapsed` every second. The internal timer is the
    /// only clock: `SecondElapsed` events coming from the source are dropped.
    /// Returns the final record after unload, or after the source closes
    /// (treated as teardown).
    pub async fn run<S: EventSource>(mut self, mut source: S) -> DataRecord {
        let mut ticker: Option<Interval> = None;

        while !self.closed {
            let step = tokio::select! {
                event = source.next_event() => Step::Source(event),
                _ = next_second(&mut ticker) => Step::Tick,
            };

            match step {
                Step::Tick => self.handle(PageEvent::SecondElapsed),
                Step::Source(Some(PageEvent::SecondElapsed)) => {
                    trace!("Ignoring SecondElapsed from event source; the session timer drives it");
                }
                Step::Source(Some(event)) => {
                    if ticker.is_none() && matches!(event, PageEvent::Load { .. }) {
                        ticker = Some(interval_at(Instant::now() + TIMER_PERIOD, TIMER_PERIOD));
                    }
                    self.handle(event);
                }
                Step::Source(None) => {
                    debug!("Event source closed, tearing down");
                    self.unload();
                }
            }
        }

        self.aggregator.into_record()
    }
}

enum Step {
    Source(Option<PageEvent>),
    Tick,
}

async fn next_second(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

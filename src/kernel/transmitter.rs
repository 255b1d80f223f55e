use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::kernel::event::TransmissionKind;
use crate::kernel::record::DataRecord;
use crate::services::transport::{DeliveryMode, OutboundRequest, Transport};

pub const EVENT: &str = "event";

/// Sends record snapshots to the collector, at most once per kind.
pub struct Transmitter {
    endpoint: String,
    transport: Arc<dyn Transport>,
    sent: HashSet<TransmissionKind>,
}

impl Transmitter {
    pub fn new(endpoint: String, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint,
            transport,
            sent: HashSet::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_sent(&self, kind: TransmissionKind) -> bool {
        self.sent.contains(&kind)
    }

    /// Snapshot of `record` with the `event` discriminator merged on top.
    pub fn payload(kind: TransmissionKind, record: &DataRecord) -> DataRecord {
        let mut snapshot = record.clone();
        snapshot.set(EVENT, kind.as_str());
        snapshot
    }

    pub fn mode_for(kind: TransmissionKind) -> DeliveryMode {
        match kind {
            TransmissionKind::Load => DeliveryMode::Async,
            TransmissionKind::Unload => DeliveryMode::BestEffortSync,
        }
    }

    /// Never fails: delivery errors are logged and dropped.
    pub fn transmit(&mut self, kind: TransmissionKind, record: &DataRecord) {
        if !self.sent.insert(kind) {
            debug!("Ignoring repeated {} transmission", kind.as_str());
            return;
        }

        let request = OutboundRequest {
            url: self.endpoint.clone(),
            kind,
            fields: Self::payload(kind, record).to_form_pairs(),
        };
        let mode = Self::mode_for(kind);

        match self.transport.deliver(request, mode) {
            Ok(()) => info!("Sent {} transmission to {} ({:?})", kind.as_str(), self.endpoint, mode),
            Err(e) => warn!("{} transmission to {} failed: {}", kind.as_str(), self.endpoint, e),
        }
    }
}

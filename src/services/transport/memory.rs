use parking_lot::Mutex;

use super::{DeliveryMode, OutboundRequest, Transport};
use crate::error::TransportError;

/// Keeps every request in memory instead of sending it.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<(OutboundRequest, DeliveryMode)>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(OutboundRequest, DeliveryMode)> {
        self.sent.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }
}

impl Transport for MemoryTransport {
    fn deliver(&self, request: OutboundRequest, mode: DeliveryMode) -> Result<(), TransportError> {
        self.sent.lock().push((request, mode));
        Ok(())
    }
}

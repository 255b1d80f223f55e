pub mod http;
pub mod memory;

pub use http::HttpTransport;
pub use memory::MemoryTransport;

use crate::error::TransportError;
use crate::kernel::event::TransmissionKind;

/// How hard the transport should try before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Dispatch and return immediately. The caller never sees the response.
    Async,
    /// Block the caller until the request has been attempted. Used during
    /// teardown, when a detached request would be dropped.
    BestEffortSync,
}

/// One form-encoded POST to the collector.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub kind: TransmissionKind,
    pub fields: Vec<(String, String)>,
}

impl OutboundRequest {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub trait Transport: Send + Sync {
    fn deliver(&self, request: OutboundRequest, mode: DeliveryMode) -> Result<(), TransportError>;
}

use reqwest::Client;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::{DeliveryMode, OutboundRequest, Transport};
use crate::error::TransportError;

/// Form-encoded POSTs over reqwest.
///
/// Async delivery rides the caller's tokio runtime. Blocking delivery runs
/// a blocking client on its own thread and joins it, so it is safe from
/// inside a runtime worker as well as from plain threads.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn dispatch(&self, request: OutboundRequest) -> Result<(), TransportError> {
        let handle = Handle::try_current().map_err(|_| TransportError::NoRuntime)?;
        let client = self.client.clone();

        handle.spawn(async move {
            match client.post(&request.url).form(&request.fields).send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!("{} delivered to {}", request.kind.as_str(), request.url);
                }
                Ok(resp) => {
                    warn!("{} rejected by {}: {}", request.kind.as_str(), request.url, resp.status());
                }
                Err(e) => {
                    warn!("{} delivery to {} failed: {}", request.kind.as_str(), request.url, e);
                }
            }
        });

        Ok(())
    }

    fn deliver_blocking(request: OutboundRequest) -> Result<(), TransportError> {
        let worker = std::thread::Builder::new()
            .name("capturevate-delivery".to_string())
            .spawn(move || -> Result<(), TransportError> {
                // Built and dropped on this thread: the blocking client owns
                // its own runtime and must not be dropped inside another one.
                let client = reqwest::blocking::Client::new();
                let response = client.post(&request.url).form(&request.fields).send()?;
                if !response.status().is_success() {
                    return Err(TransportError::Status(response.status().as_u16()));
                }
                Ok(())
            })?;

        worker.join().map_err(|_| TransportError::WorkerPanicked)?
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn deliver(&self, request: OutboundRequest, mode: DeliveryMode) -> Result<(), TransportError> {
        match mode {
            DeliveryMode::Async => self.dispatch(request),
            DeliveryMode::BestEffortSync => Self::deliver_blocking(request),
        }
    }
}

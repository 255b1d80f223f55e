//! The embedding side of a session: page facts, the event stream and the
//! HTTP transport. A session never touches anything outside these seams.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::kernel::event::PageEvent;
use crate::services::transport::Transport;

/// Synchronous facts about the page, read once at initialization.
pub trait PageEnvironment: Send + Sync {
    fn user_agent(&self) -> String;
    fn location_path(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    pub user_agent: String,
    pub path: String,
}

impl StaticEnvironment {
    pub fn new(user_agent: &str, path: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            path: path.to_string(),
        }
    }
}

impl PageEnvironment for StaticEnvironment {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn location_path(&self) -> String {
        self.path.clone()
    }
}

/// Source of browser-dispatched events. `None` means the page is gone.
#[async_trait]
pub trait EventSource: Send {
    async fn next_event(&mut self) -> Option<PageEvent>;
}

#[async_trait]
impl EventSource for mpsc::Receiver<PageEvent> {
    async fn next_event(&mut self) -> Option<PageEvent> {
        self.recv().await
    }
}

/// Capabilities the host exposes. Either may be absent, in which case
/// initialization stays inert.
#[derive(Clone, Default)]
pub struct Host {
    pub environment: Option<Arc<dyn PageEnvironment>>,
    pub transport: Option<Arc<dyn Transport>>,
}

impl Host {
    pub fn new(environment: Arc<dyn PageEnvironment>, transport: Arc<dyn Transport>) -> Self {
        Self {
            environment: Some(environment),
            transport: Some(transport),
        }
    }

    /// Names of the missing capabilities, for the diagnostic.
    pub(crate) fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.environment.is_none() {
            missing.push("page environment");
        }
        if self.transport.is_none() {
            missing.push("HTTP transport");
        }
        missing
    }
}

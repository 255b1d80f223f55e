use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors a host can see. Only configuration loading returns these;
/// recording and transmission never surface failures to the page.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Cannot read configuration {path}: {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Async delivery requires a running tokio runtime")]
    NoRuntime,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Collector responded with status {0}")]
    Status(u16),

    #[error("Cannot start delivery worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Delivery worker panicked")]
    WorkerPanicked,
}

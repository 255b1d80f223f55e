pub mod config;
pub mod entry;
pub mod error;
pub mod host;
pub mod kernel;
pub mod services;

pub use config::Config;
pub use entry::{capturevate, Invocation, Outcome, VERSION};
pub use host::{EventSource, Host, PageEnvironment, StaticEnvironment};
pub use kernel::event::{PageEvent, TransmissionKind, Viewport};
pub use kernel::record::{DataRecord, Metric};
pub use kernel::recorders::{recorder_fn, BuiltinRecorder, Recorder};
pub use kernel::session::Session;
pub use services::transport::{DeliveryMode, HttpTransport, MemoryTransport, OutboundRequest, Transport};

use super::Recorder;
use crate::host::PageEnvironment;
use crate::kernel::event::PageEvent;
use crate::kernel::record::DataRecord;

pub const USER_AGENT: &str = "userAgent";

/// Captured once, synchronously, at registration. Subscribes to nothing.
pub struct UserAgent;

impl Recorder for UserAgent {
    fn attach(&mut self, record: &mut DataRecord, env: &dyn PageEnvironment) {
        record.set(USER_AGENT, env.user_agent());
    }

    fn observe(&mut self, _event: &PageEvent, _record: &mut DataRecord) {}
}

use super::Recorder;
use crate::kernel::event::PageEvent;
use crate::kernel::record::DataRecord;

pub const PAGE_CLICKS: &str = "pageClicks";

/// Counts every click anywhere in the document. No debounce.
pub struct PageClicks;

impl Recorder for PageClicks {
    fn observe(&mut self, event: &PageEvent, record: &mut DataRecord) {
        if let PageEvent::Click = event {
            record.increment(PAGE_CLICKS);
        }
    }
}

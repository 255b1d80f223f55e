use super::Recorder;
use crate::kernel::event::PageEvent;
use crate::kernel::record::DataRecord;

pub const SECONDS_ON_PAGE: &str = "secondsOnPage";

/// One increment per timer tick, starting once the page has loaded.
pub struct SecondsOnPage {
    loaded: bool,
}

impl SecondsOnPage {
    pub fn new() -> Self {
        Self { loaded: false }
    }
}

impl Default for SecondsOnPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder for SecondsOnPage {
    fn observe(&mut self, event: &PageEvent, record: &mut DataRecord) {
        match event {
            PageEvent::Load { .. } => self.loaded = true,
            PageEvent::SecondElapsed if self.loaded => {
                record.increment(SECONDS_ON_PAGE);
            }
            _ => {}
        }
    }
}

use super::Recorder;
use crate::kernel::event::PageEvent;
use crate::kernel::record::DataRecord;

pub const SCROLL_DISTANCE: &str = "scrollDistance";

/// Deepest vertical scroll offset reached. Despite the key name this is a
/// high-water mark, not the distance travelled.
pub struct ScrollDistance;

impl Recorder for ScrollDistance {
    fn observe(&mut self, event: &PageEvent, record: &mut DataRecord) {
        if let PageEvent::Scroll { scroll_top } = *event {
            record.raise_to(SCROLL_DISTANCE, scroll_top);
        }
    }
}

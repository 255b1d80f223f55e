use super::Recorder;
use crate::kernel::event::{PageEvent, Viewport};
use crate::kernel::record::DataRecord;

pub const WINDOW_WIDTH: &str = "windowWidth";
pub const WINDOW_HEIGHT: &str = "windowHeight";

/// Last known viewport size. Written on load and on every resize.
pub struct WindowSize;

impl WindowSize {
    fn write(viewport: &Viewport, record: &mut DataRecord) {
        record.set(WINDOW_WIDTH, viewport.width);
        record.set(WINDOW_HEIGHT, viewport.height);
    }
}

impl Recorder for WindowSize {
    fn observe(&mut self, event: &PageEvent, record: &mut DataRecord) {
        match event {
            PageEvent::Load { viewport } | PageEvent::Resize { viewport } => {
                Self::write(viewport, record);
            }
            _ => {}
        }
    }
}

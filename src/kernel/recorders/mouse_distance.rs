use super::Recorder;
use crate::kernel::event::PageEvent;
use crate::kernel::record::DataRecord;

pub const MOUSE_DISTANCE: &str = "mouseDistance";
pub const MOUSE_X_DISTANCE: &str = "mouseXDistance";
pub const MOUSE_Y_DISTANCE: &str = "mouseYDistance";

/// Accumulates cursor travel after load: Euclidean total plus absolute
/// per-axis displacement.
///
/// The previous position is seeded from the first observed move, so that
/// move contributes zero (there is no fixed origin).
pub struct MouseDistance {
    loaded: bool,
    last: Option<(f64, f64)>,
}

impl MouseDistance {
    pub fn new() -> Self {
        Self {
            loaded: false,
            last: None,
        }
    }
}

impl Default for MouseDistance {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder for MouseDistance {
    fn observe(&mut self, event: &PageEvent, record: &mut DataRecord) {
        match *event {
            PageEvent::Load { .. } => self.loaded = true,
            PageEvent::MouseMove { offset_x, offset_y } if self.loaded => {
                let (last_x, last_y) = self.last.unwrap_or((offset_x, offset_y));
                let dx = (last_x - offset_x).abs();
                let dy = (last_y - offset_y).abs();

                record.add(MOUSE_X_DISTANCE, dx);
                record.add(MOUSE_Y_DISTANCE, dy);
                record.add(MOUSE_DISTANCE, (dx * dx + dy * dy).sqrt());

                self.last = Some((offset_x, offset_y));
            }
            _ => {}
        }
    }
}

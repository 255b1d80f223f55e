//! Built-in recorders and the catalog that decides which of them run.
//!
//! A recorder never owns the record. The aggregator hands it `&mut` access
//! for the duration of a single hook call, and each recorder only writes
//! its own keys.

pub mod mouse_distance;
pub mod page_clicks;
pub mod scroll_distance;
pub mod seconds_on_page;
pub mod user_agent;
pub mod window_size;

use crate::host::PageEnvironment;
use crate::kernel::event::PageEvent;
use crate::kernel::record::DataRecord;

pub use mouse_distance::MouseDistance;
pub use page_clicks::PageClicks;
pub use scroll_distance::ScrollDistance;
pub use seconds_on_page::SecondsOnPage;
pub use user_agent::UserAgent;
pub use window_size::WindowSize;

pub trait Recorder: Send {
    /// Runs once when the recorder is registered.
    fn attach(&mut self, _record: &mut DataRecord, _env: &dyn PageEnvironment) {}

    fn observe(&mut self, event: &PageEvent, record: &mut DataRecord);
}

/// Adapter so plain closures can be registered as custom recorders.
pub struct FnRecorder<F> {
    observe: F,
}

impl<F> Recorder for FnRecorder<F>
where
    F: FnMut(&PageEvent, &mut DataRecord) + Send,
{
    fn observe(&mut self, event: &PageEvent, record: &mut DataRecord) {
        (self.observe)(event, record)
    }
}

pub fn recorder_fn<F>(observe: F) -> FnRecorder<F>
where
    F: FnMut(&PageEvent, &mut DataRecord) + Send,
{
    FnRecorder { observe }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinRecorder {
    PageClicks,
    SecondsOnPage,
    MouseDistance,
    ScrollDistance,
    WindowSize,
    UserAgent,
}

impl BuiltinRecorder {
    /// Registration order.
    pub const ALL: [BuiltinRecorder; 6] = [
        BuiltinRecorder::PageClicks,
        BuiltinRecorder::SecondsOnPage,
        BuiltinRecorder::MouseDistance,
        BuiltinRecorder::ScrollDistance,
        BuiltinRecorder::WindowSize,
        BuiltinRecorder::UserAgent,
    ];

    /// The name used in the `enabled` config map.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinRecorder::PageClicks => "pageClicks",
            BuiltinRecorder::SecondsOnPage => "secondsOnPage",
            BuiltinRecorder::MouseDistance => "mouseDistance",
            BuiltinRecorder::ScrollDistance => "scrollDistance",
            BuiltinRecorder::WindowSize => "windowSize",
            BuiltinRecorder::UserAgent => "userAgent",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn build(&self) -> Box<dyn Recorder> {
        match self {
            BuiltinRecorder::PageClicks => Box::new(PageClicks),
            BuiltinRecorder::SecondsOnPage => Box::new(SecondsOnPage::new()),
            BuiltinRecorder::MouseDistance => Box::new(MouseDistance::new()),
            BuiltinRecorder::ScrollDistance => Box::new(ScrollDistance),
            BuiltinRecorder::WindowSize => Box::new(WindowSize),
            BuiltinRecorder::UserAgent => Box::new(UserAgent),
        }
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Everything the host can tell a session about the page.
/// Tagged so hosts can stream them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageEvent {
    /// The page (and its resources) finished loading.
    Load { viewport: Viewport },
    Click,
    #[serde(rename_all = "camelCase")]
    MouseMove { offset_x: f64, offset_y: f64 },
    #[serde(rename_all = "camelCase")]
    Scroll { scroll_top: f64 },
    Resize { viewport: Viewport },
    /// One tick of the per-second page timer.
    SecondElapsed,
    /// The page is about to be torn down.
    Unload,
}

/// Which of the two transmissions a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransmissionKind {
    Load,
    Unload,
}

impl TransmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransmissionKind::Load => "load",
            TransmissionKind::Unload => "unload",
        }
    }
}

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::chrome::{DEFAULT_VIEWPORT, Viewport};

/// Replay input: where the session starts and the events it saw, in delivery
/// order.
#[derive(Debug, Deserialize)]
pub struct Timeline {
    pub initial: Option<InitialState>,
    pub events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read timeline {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parse timeline {}", path.display()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InitialState {
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
}

fn default_viewport() -> Viewport {
    DEFAULT_VIEWPORT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimelineEvent {
    Scroll { offset: u64 },
    Resize { width: u32, height: u32 },
}

/// Scroll-only events out of a bare offset list.
pub fn scroll_events(offsets: &[u64]) -> Vec<TimelineEvent> {
    offsets
        .iter()
        .map(|&offset| TimelineEvent::Scroll { offset })
        .collect()
}

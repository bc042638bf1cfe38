use serde::Serialize;

use crate::chrome::{ChromeCommand, ChromePresence};
use crate::timeline::{InitialState, TimelineEvent};

/// Machine-readable account of one replay, written for diffing runs against
/// each other.
#[derive(Debug, Serialize)]
pub struct ReplayTrace {
    /// Where the page came from: `sample`, a file path, or a URL.
    pub page: String,
    /// blake3 of the page as loaded, before any mutation.
    pub input_digest: String,
    pub initial: InitialState,
    pub chrome: ChromePresence,
    pub dark_reader_stripped: bool,
    pub steps: Vec<TraceStep>,
    pub final_offset: u64,
    /// blake3 of the serialized page after the replay.
    pub output_digest: String,
}

#[derive(Debug, Serialize)]
pub struct TraceStep {
    pub index: usize,
    pub event: TimelineEvent,
    /// Signed travel since the previous scroll event. Resize steps have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<i64>,
    pub commands: Vec<ChromeCommand>,
    /// How many commands found their region on the page.
    pub applied: usize,
}

pub fn digest(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

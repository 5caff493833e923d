//! Per-frame generation results.

use serde::{Deserialize, Serialize};

/// A successfully generated frame, tagged with its generation index.
///
/// The index is what orders frames in the output video: assembly must
/// receive frames in ascending index order regardless of the order in
/// which generation attempts completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameResult {
    /// Zero-based frame index within the run.
    pub index: u32,
    /// Encoded image bytes as returned (and decoded from transport
    /// encoding) by the generation service.
    pub payload: Vec<u8>,
}

impl FrameResult {
    pub fn new(index: u32, payload: Vec<u8>) -> Self {
        Self { index, payload }
    }
}

/// Record of a failed frame attempt.
///
/// Kept for diagnostics only; the typed error has already been logged
/// at the frame boundary by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameFailure {
    /// Zero-based frame index within the run.
    pub index: u32,
    /// Human-readable cause.
    pub reason: String,
}

impl FrameFailure {
    pub fn new(index: u32, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

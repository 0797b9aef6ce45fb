use postcard::{from_bytes, from_bytes_cobs, to_allocvec, to_allocvec_cobs};
use serde::{Deserialize, Serialize};

use crate::ProtoError;

// ============================================================================
// Frame Snapshot
// ============================================================================

/// State of the table after one simulated frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u32,
    pub puck: [f32; 2],
    pub puck_vel: [f32; 2],
    pub paddle_left: [f32; 2],
    pub paddle_right: [f32; 2],
    pub score_left: u8,
    pub score_right: u8,
    /// Puck is inside a wall trigger
    pub in_collision: bool,
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl Snapshot {
    /// Serialize snapshot to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        Ok(to_allocvec(self)?)
    }

    /// Deserialize snapshot from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtoError> {
        Ok(from_bytes(bytes)?)
    }

    /// COBS encoded frame terminated by a zero byte, for appending to a recording
    pub fn to_frame(&self) -> Result<Vec<u8>, ProtoError> {
        Ok(to_allocvec_cobs(self)?)
    }

    /// Decode one COBS frame (the buffer is modified in place)
    pub fn from_frame(frame: &mut [u8]) -> Result<Self, ProtoError> {
        Ok(from_bytes_cobs(frame)?)
    }
}

/// Split a recording into its snapshots.
///
/// An unterminated tail (a frame cut off mid write) is dropped.
pub fn read_recording(bytes: &[u8]) -> Result<Vec<Snapshot>, ProtoError> {
    let mut snapshots = Vec::new();
    for chunk in bytes.split_inclusive(|b| *b == 0) {
        if chunk.len() <= 1 || chunk.last() != Some(&0) {
            continue;
        }
        let mut frame = chunk.to_vec();
        snapshots.push(Snapshot::from_frame(&mut frame)?);
    }
    Ok(snapshots)
}

//! Decoding of the radar rig's line protocol.

pub mod line;
pub mod state;

pub use line::{classify, decode_line, START_MARKER};
pub use state::ProtocolState;

/// One (angle, distance) observation as sent by the rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub angle: f64,
    pub distance: f64,
}

/// A single classified line.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    StartMarker,
    Malformed(String),
    Sample(Sample),
}

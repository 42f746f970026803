use crate::{Record, Sample};

/// Two-state gate in front of the sample stream.
///
/// Everything is dropped until the start marker arrives; after that only
/// samples pass. There is no way back to `AwaitingStart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolState {
    #[default]
    AwaitingStart,
    Streaming,
}

impl ProtocolState {
    /// Feed one record, returning the sample it carries if it should be
    /// applied.
    pub fn accept(&mut self, record: &Record) -> Option<Sample> {
        match (*self, record) {
            (ProtocolState::AwaitingStart, Record::StartMarker) => {
                *self = ProtocolState::Streaming;
                None
            }
            (ProtocolState::AwaitingStart, _) => None,
            (ProtocolState::Streaming, Record::Sample(sample)) => Some(*sample),
            (ProtocolState::Streaming, Record::Malformed(line)) => {
                log::debug!("skipping malformed line {line:?}");
                None
            }
            (ProtocolState::Streaming, Record::StartMarker) => None,
        }
    }

    pub fn is_streaming(&self) -> bool {
        *self == ProtocolState::Streaming
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("unsupported platform `{os}`: no serial port enumeration strategy")]
    UnsupportedPlatform { os: String },

    #[error("no usable serial device found")]
    NoDeviceFound,

    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("connection to {port} lost: {source}")]
    ConnectionLost {
        port: String,
        #[source]
        source: std::io::Error,
    },
}

/// A sample whose angle does not map onto a buffer slot.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("angle {angle} outside the 0..=180 sweep")]
pub struct OutOfRangeSample {
    pub angle: f64,
}

pub type Result<T, E = RadarError> = std::result::Result<T, E>;

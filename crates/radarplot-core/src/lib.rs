//! Core functionalities: port discovery, line reading, sample buffer, render loop.

pub mod buffer;
pub mod config;
pub mod connection;
pub mod control;
pub mod error;
pub mod ports;
pub mod render;
pub mod shutdown;

pub use buffer::{SampleBuffer, ANGLE_SLOTS};
pub use config::RadarConfig;
pub use connection::{LineReader, RecordSource, SerialConnection};
pub use control::{CloseAction, ControlSurface};
pub use error::{OutOfRangeSample, RadarError};
pub use ports::{find_candidate_ports, select_port, Platform};
pub use radarplot_decode::{Record, Sample};
pub use render::{Exit, Frame, RadarDisplay, RenderLoop, Step};
pub use shutdown::ShutdownState;

use std::time::{Duration, Instant};

use radarplot_decode::ProtocolState;

use crate::buffer::SampleBuffer;
use crate::config::RadarConfig;
use crate::connection::RecordSource;
use crate::error::Result;
use crate::shutdown::ShutdownState;

/// One throttled repaint: the sweep arm position and the whole buffer.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Current sweep angle in degrees.
    pub angle: f64,
    pub samples: &'a SampleBuffer,
}

impl Frame<'_> {
    pub fn sweep_theta(&self) -> f64 {
        self.angle.to_radians()
    }

    /// The sweep arm always spans the full radial extent.
    pub fn sweep_radius(&self) -> f64 {
        self.samples.max_range()
    }
}

/// Where frames go. The background is owned by the implementation and is
/// expected to be drawn once; `redraw` only repaints the marker and sweep
/// layers.
pub trait RadarDisplay {
    fn redraw(&mut self, frame: &Frame<'_>);

    /// Called once when the start marker arrives.
    fn stream_started(&mut self) {}

    /// Bring back UI chrome hidden while streaming.
    fn restore_chrome(&mut self);

    /// Close the window. May be called more than once.
    fn teardown(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Stop pressed: loop is done, window stays up.
    Stopped,
    /// Close or interrupt: window torn down.
    Closed,
}

/// Outcome of a single loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Read timed out. `warned` is set on the one timeout that logged the
    /// idle warning.
    Idle { warned: bool },
    /// Record dropped by the protocol gate.
    Ignored,
    /// Sample applied to the buffer.
    Sampled { angle: f64, redrawn: bool },
    /// Sample with an angle outside the sweep.
    Rejected { angle: f64 },
    Finished(Exit),
}

pub struct RenderLoop<S, D> {
    source: S,
    display: D,
    buffer: SampleBuffer,
    protocol: ProtocolState,
    shutdown: ShutdownState,
    cadence: f64,
    idle_warn_after: Option<Duration>,
    last_data: Instant,
    idle_warned: bool,
    finished: Option<Exit>,
}

impl<S: RecordSource, D: RadarDisplay> RenderLoop<S, D> {
    pub fn new(source: S, display: D, shutdown: ShutdownState, cfg: &RadarConfig) -> Self {
        Self {
            source,
            display,
            buffer: SampleBuffer::new(cfg.max_range),
            protocol: ProtocolState::default(),
            shutdown,
            cadence: cfg.redraw_cadence(),
            idle_warn_after: cfg.idle_warn_after(),
            last_data: Instant::now(),
            idle_warned: false,
            finished: None,
        }
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn protocol(&self) -> ProtocolState {
        self.protocol
    }

    /// Run one iteration: check shutdown, then read and apply one record.
    ///
    /// A read error tears the display down before it is returned. After the
    /// loop has finished every call returns the same `Finished` step.
    pub fn step(&mut self) -> Result<Step> {
        if let Some(exit) = self.check_shutdown() {
            return Ok(Step::Finished(exit));
        }

        let record = match self.source.read_record() {
            Ok(Some(record)) => record,
            Ok(None) => {
                let warned = self.note_idle();
                return Ok(Step::Idle { warned });
            }
            Err(e) => {
                log::error!("{e}");
                self.display.teardown();
                self.finished = Some(Exit::Closed);
                return Err(e);
            }
        };
        self.last_data = Instant::now();
        self.idle_warned = false;

        let was_streaming = self.protocol.is_streaming();
        let sample = self.protocol.accept(&record);
        if !was_streaming && self.protocol.is_streaming() {
            log::info!("start marker received, streaming");
            self.display.stream_started();
        }
        let Some(sample) = sample else {
            if !self.protocol.is_streaming() {
                log::debug!("ignoring {record:?} before start marker");
            }
            return Ok(Step::Ignored);
        };

        log::trace!("sample {},{}", sample.angle, sample.distance);
        let slot = match SampleBuffer::slot_for(sample.angle) {
            Ok(slot) => slot,
            Err(e) => {
                log::warn!("dropping sample: {e}");
                return Ok(Step::Rejected { angle: sample.angle });
            }
        };
        if let Err(e) = self.buffer.update(slot, sample.distance) {
            log::warn!("dropping sample: {e}");
            return Ok(Step::Rejected { angle: sample.angle });
        }

        let redrawn = sample.angle % self.cadence == 0.0;
        if redrawn {
            self.display.redraw(&Frame {
                angle: sample.angle,
                samples: &self.buffer,
            });
        }
        Ok(Step::Sampled {
            angle: sample.angle,
            redrawn,
        })
    }

    /// Step until the loop finishes or the connection fails.
    pub fn run(&mut self) -> Result<Exit> {
        loop {
            if let Step::Finished(exit) = self.step()? {
                return Ok(exit);
            }
        }
    }

    fn check_shutdown(&mut self) -> Option<Exit> {
        if self.finished.is_some() {
            return self.finished;
        }
        if !self.shutdown.is_stop_requested() {
            return None;
        }
        self.display.restore_chrome();
        let exit = if self.shutdown.is_close_requested() {
            self.display.teardown();
            Exit::Closed
        } else {
            Exit::Stopped
        };
        log::info!("render loop finished: {exit:?}");
        self.finished = Some(exit);
        self.finished
    }

    /// Override the configured idle warning threshold; `None` disables it.
    pub fn set_idle_warn_after(&mut self, limit: Option<Duration>) {
        self.idle_warn_after = limit;
    }

    fn note_idle(&mut self) -> bool {
        let Some(limit) = self.idle_warn_after else {
            return false;
        };
        if !self.idle_warned && self.last_data.elapsed() >= limit {
            let waiting = if self.protocol.is_streaming() {
                "data"
            } else {
                "start marker"
            };
            log::warn!("no {waiting} for {:.1}s", self.last_data.elapsed().as_secs_f64());
            self.idle_warned = true;
            return true;
        }
        false
    }
}

use crate::shutdown::ShutdownState;

/// What the UI should do right after a Close press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// The loop was already stopped; tear the window down now.
    TeardownNow,
    /// The loop is still running; it tears down at its next check.
    Deferred,
}

/// Stop and Close button handlers.
#[derive(Debug, Clone)]
pub struct ControlSurface {
    shutdown: ShutdownState,
}

impl ControlSurface {
    pub fn new(shutdown: ShutdownState) -> Self {
        Self { shutdown }
    }

    pub fn on_stop(&self) {
        if !self.shutdown.is_stop_requested() {
            log::info!("stop requested");
        }
        self.shutdown.request_stop();
    }

    /// A first press while running only arms shutdown, like Stop; pressing
    /// again (or after Stop) closes immediately.
    pub fn on_close(&self) -> CloseAction {
        if self.shutdown.request_close() {
            log::info!("close requested");
            CloseAction::TeardownNow
        } else {
            log::info!("close requested while running, stopping first");
            CloseAction::Deferred
        }
    }
}

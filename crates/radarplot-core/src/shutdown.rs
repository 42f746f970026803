use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Flags {
    stop: bool,
    close: bool,
}

/// Process-wide stop/close flags.
///
/// Cloning shares the same flags. Flags only ever go from false to true.
/// Readers see a consistent pair: `on_close` checks `stop` and sets both
/// under one lock, so an interrupt arriving from the signal thread cannot
/// interleave with it.
#[derive(Debug, Clone, Default)]
pub struct ShutdownState {
    flags: Arc<Mutex<Flags>>,
}

impl ShutdownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stop_requested(&self) -> bool {
        self.flags.lock().stop
    }

    pub fn is_close_requested(&self) -> bool {
        self.flags.lock().close
    }

    pub(crate) fn request_stop(&self) {
        self.flags.lock().stop = true;
    }

    /// Sets both flags and reports whether stop was already set beforehand.
    pub(crate) fn request_close(&self) -> bool {
        let mut flags = self.flags.lock();
        let was_stopped = flags.stop;
        flags.stop = true;
        flags.close = true;
        was_stopped
    }

    /// Ctrl-C: stop and close the display at the next loop check.
    pub fn interrupt(&self) {
        log::info!("interrupt received, shutting down");
        let mut flags = self.flags.lock();
        flags.stop = true;
        flags.close = true;
    }
}

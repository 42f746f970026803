slint::include_modules!();

mod display;
mod plot;
mod settings;

use anyhow::{Context, Result};
use radarplot_core::{
    find_candidate_ports, select_port, CloseAction, ControlSurface, Exit, RadarError, RenderLoop,
    SerialConnection, ShutdownState, Step,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use display::SlintDisplay;

const TICK: Duration = Duration::from_millis(10);
/// Longest a single timer tick may spend stepping before yielding to the UI.
const TICK_BUDGET: Duration = Duration::from_millis(30);

type Radar = RenderLoop<SerialConnection, SlintDisplay>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let shutdown = ShutdownState::new();
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || shutdown.interrupt())
            .context("failed to install interrupt handler")?;
    }

    let cfg = settings::load();

    let port = match &cfg.port {
        Some(port) => port.clone(),
        None => {
            let candidates = find_candidate_ports(cfg.baud_rate)?;
            log::debug!("usable ports: {candidates:?}");
            select_port(candidates)?
        }
    };
    let connection = SerialConnection::open(&port, &cfg)?;

    // Interrupted during discovery or open.
    if shutdown.is_stop_requested() {
        return Ok(());
    }

    let app = MainWindow::new()?;

    let controls = ControlSurface::new(shutdown.clone());
    let display = SlintDisplay::new(&app, &cfg);
    let radar: Rc<RefCell<Option<Radar>>> = Rc::new(RefCell::new(Some(RenderLoop::new(
        connection,
        display,
        shutdown.clone(),
        &cfg,
    ))));
    let fatal: Rc<RefCell<Option<RadarError>>> = Rc::default();

    // Stop button
    {
        let controls = controls.clone();
        app.on_stop_clicked(move || controls.on_stop());
    }

    // Close button
    {
        let app_weak = app.as_weak();
        app.on_close_clicked(move || {
            if controls.on_close() == CloseAction::TeardownNow {
                display::teardown(&app_weak);
            }
        });
    }

    // Render loop, interleaved with UI events on this thread
    let timer = slint::Timer::default();
    {
        let radar = radar.clone();
        let fatal = fatal.clone();
        let app_weak = app.as_weak();
        timer.start(slint::TimerMode::Repeated, TICK, move || {
            if radar.borrow().is_some() {
                pump(&radar, &fatal);
            } else if shutdown.is_close_requested() {
                // Interrupted after the loop already stopped.
                display::teardown(&app_weak);
            }
        });
    }

    app.run()?;
    timer.stop();
    // Dropping the loop closes the serial port if it is still open.
    radar.borrow_mut().take();

    if let Some(e) = fatal.borrow_mut().take() {
        return Err(e).context("radar display stopped");
    }
    Ok(())
}

/// Step the render loop until a read times out, the loop ends, or the tick
/// budget runs out.
fn pump(radar: &RefCell<Option<Radar>>, fatal: &RefCell<Option<RadarError>>) {
    let mut slot = radar.borrow_mut();
    let Some(render_loop) = slot.as_mut() else {
        return;
    };

    let started = Instant::now();
    let outcome = loop {
        match render_loop.step() {
            Ok(Step::Idle { .. }) => break None,
            Ok(Step::Finished(exit)) => break Some(Ok(exit)),
            Ok(_) if started.elapsed() >= TICK_BUDGET => break None,
            Ok(_) => {}
            Err(e) => break Some(Err(e)),
        }
    };

    match outcome {
        None => {}
        Some(Ok(Exit::Stopped)) => {
            log::info!("stopped; close the window to exit");
            *slot = None;
        }
        Some(Ok(Exit::Closed)) => *slot = None,
        Some(Err(e)) => {
            *fatal.borrow_mut() = Some(e);
            *slot = None;
        }
    }
}

use std::rc::Rc;

use radarplot_core::{Frame, RadarConfig, RadarDisplay};
use slint::{ComponentHandle, ModelRc, SharedString, VecModel, Weak};

use crate::plot::PlotGeometry;
use crate::{MainWindow, PlotLabel};

/// Slint-backed display. The grid and labels are set once in [`SlintDisplay::new`];
/// redraws only replace the marker and sweep layers.
pub struct SlintDisplay {
    window: Weak<MainWindow>,
    geometry: PlotGeometry,
}

impl SlintDisplay {
    pub fn new(app: &MainWindow, cfg: &RadarConfig) -> Self {
        let geometry = PlotGeometry::new(cfg.max_range);
        let (vw, vh) = PlotGeometry::viewbox();
        app.set_viewbox_width(vw as f32);
        app.set_viewbox_height(vh as f32);
        app.set_grid_commands(geometry.grid_commands().into());

        let labels: Vec<PlotLabel> = geometry
            .labels()
            .into_iter()
            .map(|l| PlotLabel {
                x: l.x as f32,
                y: l.y as f32,
                text: l.text.into(),
            })
            .collect();
        app.set_labels(ModelRc::from(Rc::new(VecModel::from(labels))));

        Self {
            window: app.as_weak(),
            geometry,
        }
    }

    fn set_status(&self, text: &str, visible: bool) {
        if let Some(app) = self.window.upgrade() {
            app.set_status_text(SharedString::from(text));
            app.set_chrome_visible(visible);
        }
    }
}

impl RadarDisplay for SlintDisplay {
    fn redraw(&mut self, frame: &Frame<'_>) {
        let Some(app) = self.window.upgrade() else {
            return;
        };
        app.set_marker_commands(self.geometry.marker_commands(frame.samples).into());
        app.set_sweep_commands(
            self.geometry
                .sweep_commands(frame.sweep_theta(), frame.sweep_radius())
                .into(),
        );
    }

    fn stream_started(&mut self) {
        self.set_status("Streaming", false);
    }

    fn restore_chrome(&mut self) {
        self.set_status("Stopped", true);
    }

    fn teardown(&mut self) {
        teardown(&self.window);
    }
}

/// Hide the window and leave the event loop.
pub fn teardown(window: &Weak<MainWindow>) {
    if let Some(app) = window.upgrade() {
        if let Err(e) = app.hide() {
            log::warn!("failed to hide window: {e}");
        }
    }
    if let Err(e) = slint::quit_event_loop() {
        log::debug!("event loop already gone: {e}");
    }
}

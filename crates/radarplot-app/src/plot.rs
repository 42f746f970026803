//! Polar plot geometry, expressed as SVG path commands for the slint `Path`
//! layers.

use std::fmt::Write;

use radarplot_core::SampleBuffer;

/// Plot radius in viewbox units.
const RADIUS: f64 = 100.0;
/// Room around the half disc for labels.
const MARGIN: f64 = 14.0;
const MARKER_RADIUS: f64 = 1.6;
const RING_COUNT: usize = 5;
const SPOKE_COUNT: usize = 10;

pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Maps `(theta, r)` in data units onto the half disc.
#[derive(Debug, Clone, Copy)]
pub struct PlotGeometry {
    max_range: f64,
}

impl PlotGeometry {
    pub fn new(max_range: f64) -> Self {
        Self { max_range }
    }

    pub fn viewbox() -> (f64, f64) {
        (2.0 * (RADIUS + MARGIN), RADIUS + 2.0 * MARGIN)
    }

    fn center() -> (f64, f64) {
        (RADIUS + MARGIN, RADIUS + MARGIN)
    }

    /// Radii beyond the plot extent are pinned to its edge.
    pub fn to_view(&self, theta: f64, r: f64) -> (f64, f64) {
        self.project(theta, r.clamp(0.0, self.max_range))
    }

    fn project(&self, theta: f64, r: f64) -> (f64, f64) {
        let (cx, cy) = Self::center();
        let scaled = r * RADIUS / self.max_range;
        (cx + scaled * theta.cos(), cy - scaled * theta.sin())
    }

    /// Range rings at `linspace(0, max, 5)` and spokes at `linspace(0, 180, 10)`.
    pub fn grid_commands(&self) -> String {
        let (cx, cy) = Self::center();
        let mut path = String::new();
        for r in ring_values(self.max_range).skip(1) {
            let rr = r * RADIUS / self.max_range;
            let _ = write!(
                path,
                "M {:.2} {cy:.2} A {rr:.2} {rr:.2} 0 0 0 {:.2} {cy:.2} ",
                cx + rr,
                cx - rr
            );
        }
        for deg in spoke_values() {
            let (x, y) = self.to_view(deg.to_radians(), self.max_range);
            let _ = write!(path, "M {cx:.2} {cy:.2} L {x:.2} {y:.2} ");
        }
        path.trim_end().to_string()
    }

    pub fn labels(&self) -> Vec<Label> {
        let (_, cy) = Self::center();
        let mut labels: Vec<Label> = ring_values(self.max_range)
            .map(|r| {
                let (x, _) = self.to_view(0.0, r);
                Label { x, y: cy + MARGIN / 2.0, text: format!("{r:.0}") }
            })
            .collect();
        labels.extend(spoke_values().map(|deg| {
            let (x, y) = self.project(deg.to_radians(), self.max_range * (1.0 + 0.6 * MARGIN / RADIUS));
            Label { x, y, text: format!("{deg:.0}°") }
        }));
        labels
    }

    /// One small circle per buffer slot.
    pub fn marker_commands(&self, samples: &SampleBuffer) -> String {
        let mut path = String::new();
        let d = 2.0 * MARKER_RADIUS;
        for (theta, r) in samples.polar_points() {
            let (x, y) = self.to_view(theta, r);
            let _ = write!(
                path,
                "M {:.2} {y:.2} a {MARKER_RADIUS} {MARKER_RADIUS} 0 1 0 {d} 0 a {MARKER_RADIUS} {MARKER_RADIUS} 0 1 0 -{d} 0 Z ",
                x - MARKER_RADIUS
            );
        }
        path.trim_end().to_string()
    }

    /// Line from the centre to `radius` at `theta`.
    pub fn sweep_commands(&self, theta: f64, radius: f64) -> String {
        let (cx, cy) = Self::center();
        let (x, y) = self.to_view(theta, radius);
        format!("M {cx:.2} {cy:.2} L {x:.2} {y:.2}")
    }
}

fn ring_values(max_range: f64) -> impl Iterator<Item = f64> {
    (0..RING_COUNT).map(move |i| max_range * i as f64 / (RING_COUNT - 1) as f64)
}

fn spoke_values() -> impl Iterator<Item = f64> {
    (0..SPOKE_COUNT).map(|i| 180.0 * i as f64 / (SPOKE_COUNT - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn polar_to_view() {
        let g = PlotGeometry::new(100.0);
        assert!(close(g.to_view(0.0, 0.0), (114.0, 114.0)));
        assert!(close(g.to_view(0.0, 100.0), (214.0, 114.0)));
        assert!(close(g.to_view(FRAC_PI_2, 50.0), (114.0, 64.0)));
        assert!(close(g.to_view(PI, 100.0), (14.0, 114.0)));
    }

    #[test]
    fn range_is_scaled_and_clamped() {
        let g = PlotGeometry::new(400.0);
        assert!(close(g.to_view(0.0, 200.0), (164.0, 114.0)));
        assert!(close(g.to_view(0.0, 1000.0), (214.0, 114.0)));
    }

    #[test]
    fn grid_has_four_rings_and_ten_spokes() {
        let grid = PlotGeometry::new(100.0).grid_commands();
        assert_eq!(grid.matches('A').count(), 4);
        assert_eq!(grid.matches('L').count(), 10);
    }

    #[test]
    fn labels_match_the_grid() {
        let labels = PlotGeometry::new(100.0).labels();
        let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(&texts[..5], &["0", "25", "50", "75", "100"]);
        assert_eq!(texts[5], "0°");
        assert_eq!(texts[14], "180°");
    }

    #[test]
    fn one_marker_per_slot() {
        let g = PlotGeometry::new(100.0);
        let cmds = g.marker_commands(&SampleBuffer::new(100.0));
        assert_eq!(cmds.matches('M').count(), 181);
    }

    #[test]
    fn vertical_sweep_arm() {
        let g = PlotGeometry::new(100.0);
        assert_eq!(g.sweep_commands(FRAC_PI_2, 100.0), "M 114.00 114.00 L 114.00 14.00");
    }
}

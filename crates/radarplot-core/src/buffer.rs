use crate::error::OutOfRangeSample;

/// Slots for angles 0..=180.
pub const ANGLE_SLOTS: usize = 181;

const PLACEHOLDER: f64 = 1.0;
const NO_RETURN: f64 = 0.0;

/// Latest distance per whole degree of the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    slots: [f64; ANGLE_SLOTS],
    max_range: f64,
}

impl SampleBuffer {
    pub fn new(max_range: f64) -> Self {
        Self {
            slots: [PLACEHOLDER; ANGLE_SLOTS],
            max_range,
        }
    }

    /// Map a wire angle onto its slot: finite and in `[0, 181)`, truncated.
    pub fn slot_for(angle: f64) -> Result<usize, OutOfRangeSample> {
        if angle.is_finite() && (0.0..ANGLE_SLOTS as f64).contains(&angle) {
            Ok(angle.trunc() as usize)
        } else {
            Err(OutOfRangeSample { angle })
        }
    }

    /// Overwrite the slot for `angle`. Distances beyond max range, and NaN,
    /// are stored as 0.0.
    pub fn update(&mut self, angle: usize, distance: f64) -> Result<(), OutOfRangeSample> {
        let slot = self
            .slots
            .get_mut(angle)
            .ok_or(OutOfRangeSample { angle: angle as f64 })?;
        *slot = if distance > self.max_range || distance.is_nan() {
            NO_RETURN
        } else {
            distance
        };
        Ok(())
    }

    pub fn get(&self, angle: usize) -> Option<f64> {
        self.slots.get(angle).copied()
    }

    pub fn max_range(&self) -> f64 {
        self.max_range
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.slots
    }

    /// `(theta in radians, distance)` for every slot, in angle order.
    pub fn polar_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(deg, &r)| ((deg as f64).to_radians(), r))
    }
}

use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Per-level mine density ladder.
///
/// Density grows linearly with the level and saturates at `cap`, so the
/// difficulty ramp flattens out instead of filling the board.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DensitySchedule {
    pub base: f64,
    pub step: f64,
    pub cap: f64,
}

impl DensitySchedule {
    pub fn new(base: f64, step: f64, cap: f64) -> Result<Self> {
        let schedule = Self { base, step, cap };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Default ladder with `base` as the opening difficulty. The cap is
    /// raised to `base` when the opening density already exceeds it.
    pub fn starting_at(base: f64) -> Result<Self> {
        let defaults = Self::default();
        Self::new(base, defaults.step, defaults.cap.max(base))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for density in [self.base, self.cap] {
            if !(density > 0.0 && density < 1.0) {
                return Err(GameError::InvalidDensity { density });
            }
        }
        if !(0.0..1.0).contains(&self.step) {
            return Err(GameError::InvalidDensity { density: self.step });
        }
        if self.cap < self.base {
            return Err(GameError::InvalidDensity { density: self.cap });
        }
        Ok(())
    }

    pub fn density_for(&self, level: u32) -> f64 {
        let steps = level.saturating_sub(1) as f64;
        (self.base + steps * self.step).min(self.cap)
    }
}

impl Default for DensitySchedule {
    fn default() -> Self {
        Self {
            base: 0.2,
            step: 0.05,
            cap: 0.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_climbs_then_saturates() {
        let schedule = DensitySchedule::default();
        assert_eq!(schedule.density_for(1), 0.2);
        assert!((schedule.density_for(3) - 0.3).abs() < 1e-12);
        assert_eq!(schedule.density_for(5), 0.4);
        assert_eq!(schedule.density_for(100), 0.4);
    }

    #[test]
    fn level_zero_is_treated_as_the_first() {
        let schedule = DensitySchedule::default();
        assert_eq!(schedule.density_for(0), schedule.density_for(1));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(DensitySchedule::new(0.0, 0.05, 0.4).is_err());
        assert!(DensitySchedule::new(0.2, 0.05, 1.0).is_err());
        assert!(DensitySchedule::new(0.2, -0.1, 0.4).is_err());
        assert!(DensitySchedule::new(0.5, 0.05, 0.4).is_err());
        assert!(DensitySchedule::new(0.2, 0.0, 0.2).is_ok());
    }

    #[test]
    fn starting_at_lifts_the_cap_when_needed() {
        let schedule = DensitySchedule::starting_at(0.6).unwrap();
        assert_eq!(schedule.density_for(1), 0.6);
        assert_eq!(schedule.cap, 0.6);
    }
}

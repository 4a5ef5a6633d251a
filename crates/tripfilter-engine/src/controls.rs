//! Input controllers that shape raw UI gestures into store values.

use std::ops::RangeInclusive;

use tripfilter_core::types::NumericRange;

/// A single-handle price slider.
///
/// Only the upper bound moves. The lower bound of the current range is carried
/// through unchanged (it sits at the floor unless something else set it), and
/// the upper bound is snapped to the step grid and clamped to
/// `[lower, ceiling]`. The ceiling itself is always a stop, so dragging the
/// handle to the end restores the full range whatever the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSlider {
    bounds: NumericRange,
    step: f64,
}

impl RangeSlider {
    pub fn new(bounds: NumericRange, step: f64) -> Self {
        Self { bounds, step }
    }

    pub fn floor(&self) -> f64 {
        self.bounds.lower()
    }

    pub fn ceiling(&self) -> f64 {
        self.bounds.upper()
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// The range produced by dragging the handle of `current` to `upper`.
    pub fn slide(&self, current: &NumericRange, upper: f64) -> NumericRange {
        if upper.is_nan() {
            return *current;
        }
        let lower = current.lower();
        let snapped = if upper >= self.ceiling() {
            self.ceiling()
        } else if self.step > 0.0 {
            let grid = self.floor() + ((upper - self.floor()) / self.step).round() * self.step;
            // The ceiling is a stop even when the step does not divide the span.
            let ceiling_is_nearer = self.ceiling() - upper < upper - grid;
            if grid < self.ceiling() && grid + self.step > self.ceiling() && ceiling_is_nearer {
                self.ceiling()
            } else {
                grid
            }
        } else {
            upper
        };
        let upper = snapped.min(self.ceiling()).max(lower);
        NumericRange::new(lower, upper).unwrap_or(*current)
    }
}

/// A row of star buttons where clicking the lit star again clears the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingLadder {
    max_stars: u8,
}

impl RatingLadder {
    pub fn new(max_stars: u8) -> Self {
        Self { max_stars }
    }

    pub fn rungs(&self) -> RangeInclusive<u8> {
        1..=self.max_stars
    }

    /// New minimum rating after clicking star `n` while `current` is selected.
    /// A star that is not on the ladder changes nothing.
    pub fn click(&self, current: u8, n: u8) -> u8 {
        if n == 0 || n > self.max_stars {
            return current;
        }
        if current == n {
            0
        } else {
            n
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> RangeSlider {
        RangeSlider::new(NumericRange::new(0.0, 1000.0).unwrap(), 10.0)
    }

    #[test]
    fn slide_keeps_lower_and_snaps_upper() {
        let s = slider();
        let start = NumericRange::new(0.0, 1000.0).unwrap();
        let r = s.slide(&start, 196.0);
        assert_eq!(r.lower(), 0.0);
        assert_eq!(r.upper(), 200.0);
    }

    #[test]
    fn slide_clamps_to_ceiling_and_lower() {
        let s = slider();
        let start = NumericRange::new(0.0, 1000.0).unwrap();
        assert_eq!(s.slide(&start, 5000.0).upper(), 1000.0);
        assert_eq!(s.slide(&start, -40.0).upper(), 0.0);

        let raised = NumericRange::new(300.0, 600.0).unwrap();
        let r = s.slide(&raised, 100.0);
        assert_eq!(r.lower(), 300.0);
        assert_eq!(r.upper(), 300.0);
    }

    #[test]
    fn off_grid_step_still_reaches_the_ceiling() {
        let s = RangeSlider::new(NumericRange::new(0.0, 1000.0).unwrap(), 30.0);
        let full = NumericRange::new(0.0, 1000.0).unwrap();
        let dragged = s.slide(&full, 500.0);
        assert_eq!(dragged.upper(), 510.0);

        assert_eq!(s.slide(&dragged, 1000.0), full);
        assert_eq!(s.slide(&dragged, 996.0), full);
        assert_eq!(s.slide(&dragged, 991.0).upper(), 990.0);
    }

    #[test]
    fn slide_ignores_nan() {
        let s = slider();
        let start = NumericRange::new(0.0, 450.0).unwrap();
        assert_eq!(s.slide(&start, f64::NAN), start);
    }

    #[test]
    fn ladder_toggles_same_star_off() {
        let ladder = RatingLadder::new(5);
        assert_eq!(ladder.click(0, 4), 4);
        assert_eq!(ladder.click(4, 4), 0);
        assert_eq!(ladder.click(4, 2), 2);
        assert_eq!(ladder.rungs().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn ladder_ignores_stars_off_the_ladder() {
        let ladder = RatingLadder::new(5);
        assert_eq!(ladder.click(5, 9), 5);
        assert_eq!(ladder.click(0, 9), 0);
        assert_eq!(ladder.click(3, 0), 3);
    }
}

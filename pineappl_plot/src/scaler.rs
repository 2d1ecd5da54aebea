//! Tick schemes for the relative panels.
//!
//! The uncertainty and pull panels of many figures are compared side by side, so their ticks
//! must be a deterministic function of the data range instead of being chosen by the backend.

/// Range and tick increment of a y-axis. Both limits are multiples of the increment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YLimits {
    /// Lower limit.
    pub min: f64,
    /// Upper limit.
    pub max: f64,
    /// Distance between two major ticks.
    pub inc: f64,
}

/// Computes the tick scheme for the data-only range `[min, max]`.
#[must_use]
pub fn ylimits(min: f64, max: f64) -> YLimits {
    let range = max - min;

    let (min, max, inc) = if range > 100.0 {
        (-50.0, 50.0, 25.0)
    } else if range > 30.5 {
        (min, max, 10.0)
    } else if range > 20.5 {
        (min, max, 5.0)
    } else if range > 10.5 {
        (min, max, 2.0)
    } else if range < 3.0 {
        (min, max, 0.5)
    } else {
        (min, max, 1.0)
    };

    YLimits {
        min: (min / inc).floor() * inc,
        max: (max / inc).ceil() * inc,
        inc,
    }
}

impl YLimits {
    /// Returns the positions of the major ticks, from `min` to `max` inclusive.
    #[must_use]
    pub fn ticks(&self) -> Vec<f64> {
        // rounding protects against a missing last tick for ranges like `[-0.5, 0.5]`
        let steps = ((self.max - self.min) / self.inc).round();

        if !steps.is_finite() || steps < 0.0 {
            return Vec::new();
        }

        // `steps` is a small, non-negative integer
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = steps as u32;

        (0..=steps)
            .map(|step| f64::from(step).mul_add(self.inc, self.min))
            .collect()
    }

    /// Returns the axis range, which adds a margin of five per cent of the tick range above and
    /// below.
    #[must_use]
    pub fn padded(&self) -> (f64, f64) {
        let space = 0.05 * (self.max - self.min);
        (self.min - space, self.max + space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGES: [(f64, f64); 12] = [
        (0.0, 0.0),
        (-0.3, 0.7),
        (-1.2, 1.7),
        (-1.5, 1.5),
        (0.25, 9.75),
        (-5.0, 5.4),
        (-3.3, 12.1),
        (-10.0, 10.4),
        (1.0, 27.5),
        (-2.0, 45.0),
        (-47.0, 52.0),
        (-120.0, 3.0),
    ];

    #[test]
    fn increment_thresholds() {
        assert_eq!(ylimits(0.0, 2.9).inc, 0.5);
        assert_eq!(ylimits(0.0, 3.0).inc, 1.0);
        assert_eq!(ylimits(0.0, 10.5).inc, 1.0);
        assert_eq!(ylimits(0.0, 10.6).inc, 2.0);
        assert_eq!(ylimits(0.0, 20.5).inc, 2.0);
        assert_eq!(ylimits(0.0, 20.6).inc, 5.0);
        assert_eq!(ylimits(0.0, 30.5).inc, 5.0);
        assert_eq!(ylimits(0.0, 30.6).inc, 10.0);
        assert_eq!(ylimits(0.0, 100.0).inc, 10.0);
        assert_eq!(ylimits(0.0, 100.1).inc, 25.0);
    }

    #[test]
    fn increment_is_monotonic_in_range() {
        let mut last = 0.0;

        for tenth in 0..1500 {
            let range = f64::from(tenth) / 10.0;
            let inc = ylimits(-0.5 * range, 0.5 * range).inc;
            assert!(inc >= last, "increment decreases at range {range}");
            last = inc;
        }
    }

    #[test]
    fn limits_are_multiples_of_increment() {
        for (min, max) in RANGES {
            let limits = ylimits(min, max);
            assert_eq!((limits.min / limits.inc).fract(), 0.0);
            assert_eq!((limits.max / limits.inc).fract(), 0.0);
        }
    }

    #[test]
    fn limits_never_clip_data() {
        for (min, max) in RANGES {
            if max - min > 100.0 {
                continue;
            }

            let limits = ylimits(min, max);
            assert!(limits.min <= min);
            assert!(limits.max >= max);
        }
    }

    #[test]
    fn large_ranges_are_fixed() {
        for (min, max) in [(-120.0, 3.0), (0.0, 500.0), (-1e6, 1e6)] {
            assert_eq!(
                ylimits(min, max),
                YLimits {
                    min: -50.0,
                    max: 50.0,
                    inc: 25.0
                }
            );
        }
    }

    #[test]
    fn span_of_47_snaps_to_tens() {
        let limits = ylimits(-2.0, 45.0);

        assert_eq!(limits.inc, 10.0);
        assert_eq!(limits.min, -10.0);
        assert_eq!(limits.max, 50.0);
        assert_eq!(
            limits.ticks(),
            vec![-10.0, 0.0, 10.0, 20.0, 30.0, 40.0, 50.0]
        );
        assert_eq!(limits.padded(), (-13.0, 53.0));
    }

    #[test]
    fn half_unit_ticks() {
        let limits = ylimits(-0.3, 0.7);

        assert_eq!(limits.min, -0.5);
        assert_eq!(limits.max, 1.0);
        assert_eq!(limits.ticks(), vec![-0.5, 0.0, 0.5, 1.0]);
    }
}

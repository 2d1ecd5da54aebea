//! Tick positions and labels of the SVG backend.

use crate::axes::Scale;

/// Major ticks with their labels, and minor ticks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ticks {
    pub major: Vec<f64>,
    pub labels: Vec<String>,
    pub minor: Vec<f64>,
}

/// "Nice numbers" step for a rough tick distance.
fn nice_step(rough: f64) -> f64 {
    let magnitude = 10.0_f64.powf(rough.abs().log10().floor());
    let fraction = rough / magnitude;

    let nice = if fraction <= 1.5 {
        1.0
    } else if fraction <= 3.5 {
        2.0
    } else if fraction <= 7.5 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Number of decimals needed to show multiples of `step`.
fn decimals(step: f64) -> usize {
    (0_u8..10)
        .find(|&decimals| {
            let scaled = step * 10.0_f64.powi(i32::from(decimals));
            (scaled - scaled.round()).abs() < 1e-6
        })
        .map_or(10, usize::from)
}

fn format_tick(value: f64, step: f64) -> String {
    // avoid "-0"
    let value = if value.abs() < step * 1e-3 { 0.0 } else { value };
    let decimals = decimals(step);

    format!("{value:.decimals$}")
}

/// Number of minor intervals between two major ticks.
fn minor_subdivisions(step: f64) -> u32 {
    let mantissa = step / 10.0_f64.powf(step.log10().floor());

    if (mantissa - 2.0).abs() < 1e-9 || (mantissa - 2.5).abs() < 1e-9 {
        4
    } else {
        5
    }
}

/// Returns the values `start + k * step` within `[min, max]`.
fn multiples(start: f64, step: f64, min: f64, max: f64) -> Vec<f64> {
    let tolerance = step * 1e-9;
    let first = ((min - start) / step - 1e-9).ceil();

    (0..)
        .map(|k| f64::from(k).mul_add(step, first.mul_add(step, start)))
        .take_while(|value| *value <= max + tolerance)
        .filter(|value| *value >= min - tolerance)
        .collect()
}

impl Ticks {
    /// Ticks inside `[min, max]` at "nice" distances, aiming at `target` major ticks.
    pub fn linear(min: f64, max: f64, target: u32) -> Self {
        if !(min.is_finite() && max.is_finite() && max > min) {
            return Self::default();
        }

        let step = nice_step((max - min) / f64::from(target.max(2) - 1));

        Self::with_step(min, max, 0.0, step)
    }

    fn with_step(min: f64, max: f64, start: f64, step: f64) -> Self {
        let major = multiples(start, step, min, max);
        let labels = major.iter().map(|&value| format_tick(value, step)).collect();
        let minor_step = step / f64::from(minor_subdivisions(step));
        let minor = multiples(start, minor_step, min, max)
            .into_iter()
            .filter(|value| {
                major
                    .iter()
                    .all(|major| (major - value).abs() > minor_step * 1e-3)
            })
            .collect();

        Self {
            major,
            labels,
            minor,
        }
    }

    /// The given major ticks, evenly spaced, with minor ticks in between.
    pub fn fixed(ticks: &[f64], min: f64, max: f64) -> Self {
        match ticks {
            [first, second, ..] if second > first => {
                let mut result = Self::with_step(min, max, *first, second - first);
                // keep exactly the requested major ticks
                result.major.retain(|value| {
                    ticks
                        .iter()
                        .any(|tick| (tick - value).abs() < (second - first) * 1e-6)
                });
                result.labels = result
                    .major
                    .iter()
                    .map(|&value| format_tick(value, second - first))
                    .collect();
                result
            }
            _ => Self {
                major: ticks.to_vec(),
                labels: ticks.iter().map(|&value| format_tick(value, 1.0)).collect(),
                minor: Vec::new(),
            },
        }
    }

    /// Ticks at every power of ten inside `[min, max]`, and minor ticks at their multiples.
    pub fn log(min: f64, max: f64) -> Self {
        if !(max.is_finite() && min > 0.0 && max > min) {
            return Self::default();
        }

        let low = min.log10().floor();
        let high = max.log10().ceil();

        // decades of finite, positive ranges easily fit into `i32`
        #[allow(clippy::cast_possible_truncation)]
        let (low, high) = (low as i32, high as i32);

        let mut result = Self::default();

        for exponent in low..=high {
            let decade = 10.0_f64.powi(exponent);

            if decade >= min * (1.0 - 1e-9) && decade <= max * (1.0 + 1e-9) {
                result.major.push(decade);
                result.labels.push(format!("10^{exponent}"));
            }

            for factor in 2..=9 {
                let value = f64::from(factor) * decade;

                if value >= min && value <= max {
                    result.minor.push(value);
                }
            }
        }

        result
    }

    /// One tick per category at `y = index`.
    pub fn categorical(categories: &[String]) -> Self {
        Self {
            major: (0..categories.len())
                .map(crate::convert::f64_from_usize)
                .collect(),
            labels: categories.to_vec(),
            minor: Vec::new(),
        }
    }

    /// Ticks for an axis with the given `scale` showing `[min, max]`.
    pub fn auto(scale: Scale, min: f64, max: f64, target: u32) -> Self {
        match scale {
            Scale::Linear => Self::linear(min, max, target),
            Scale::Log => Self::log(min, max),
        }
    }
}

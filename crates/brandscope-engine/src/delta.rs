//! Period-over-period movement for a single KPI.

use brandscope_core::report::{Delta, Direction, Kpi};

use crate::error::EngineError;

/// Compute current-vs-previous movement for one KPI.
///
/// A `previous` of `None` (the prior report did not carry the KPI) or `0.0`
/// yields `percent = 0.0` and `Flat` — division by zero never reaches the
/// report. Each KPI is computed independently of every other.
///
/// # Errors
///
/// Returns [`EngineError::MetricComputation`] when `current` or `previous`
/// is non-finite. Malformed input must stay distinguishable from a
/// legitimate zero, so this propagates instead of defaulting.
pub fn delta(kpi: Kpi, current: f64, previous: Option<f64>) -> Result<Delta, EngineError> {
    if !current.is_finite() {
        return Err(EngineError::MetricComputation {
            kpi,
            value: current,
        });
    }
    if let Some(prev) = previous {
        if !prev.is_finite() {
            return Err(EngineError::MetricComputation { kpi, value: prev });
        }
    }

    let computed = match previous {
        // No previous value to subtract.
        None => Delta {
            absolute: 0.0,
            percent: 0.0,
            direction: Direction::Flat,
        },
        Some(prev) if prev == 0.0 => Delta {
            absolute: current,
            percent: 0.0,
            direction: Direction::Flat,
        },
        Some(prev) => {
            let absolute = current - prev;
            let direction = if current > prev {
                Direction::Up
            } else if current < prev {
                Direction::Down
            } else {
                Direction::Flat
            };
            Delta {
                absolute,
                percent: absolute / prev * 100.0,
                direction,
            }
        }
    };

    Ok(computed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_up() {
        let d = delta(Kpi::Responses, 150.0, Some(100.0)).unwrap();
        assert_eq!(d.absolute, 50.0);
        assert_eq!(d.percent, 50.0);
        assert_eq!(d.direction, Direction::Up);
    }

    #[test]
    fn delta_down() {
        let d = delta(Kpi::Responses, 50.0, Some(100.0)).unwrap();
        assert_eq!(d.absolute, -50.0);
        assert_eq!(d.percent, -50.0);
        assert_eq!(d.direction, Direction::Down);
    }

    #[test]
    fn delta_equal_is_flat() {
        let d = delta(Kpi::Citations, 7.0, Some(7.0)).unwrap();
        assert_eq!(d.absolute, 0.0);
        assert_eq!(d.percent, 0.0);
        assert_eq!(d.direction, Direction::Flat);
    }

    #[test]
    fn delta_zero_previous_is_flat_with_zero_percent() {
        let d = delta(Kpi::Presence, 0.42, Some(0.0)).unwrap();
        assert_eq!(d.percent, 0.0);
        assert_eq!(d.direction, Direction::Flat);
        // the absolute change is still the full current value
        assert_eq!(d.absolute, 0.42);
    }

    #[test]
    fn delta_absent_previous_is_flat_with_zero_percent() {
        let d = delta(Kpi::Presence, 0.42, None).unwrap();
        assert_eq!(d.percent, 0.0);
        assert_eq!(d.direction, Direction::Flat);
        assert_eq!(d.absolute, 0.0);
    }

    #[test]
    fn delta_never_emits_non_finite_percent() {
        for previous in [Some(0.0), None] {
            let d = delta(Kpi::Competitors, 12.0, previous).unwrap();
            assert!(d.percent.is_finite());
            assert!(d.absolute.is_finite());
        }
    }

    #[test]
    fn non_finite_current_is_an_error_naming_the_kpi() {
        let err = delta(Kpi::Citations, f64::NAN, Some(3.0)).unwrap_err();
        assert!(
            matches!(err, EngineError::MetricComputation { kpi: Kpi::Citations, .. }),
            "expected MetricComputation for citations, got: {err:?}"
        );
        assert!(err.to_string().contains("citations"), "got: {err}");
    }

    #[test]
    fn non_finite_previous_is_an_error() {
        let err = delta(Kpi::Responses, 10.0, Some(f64::INFINITY)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MetricComputation {
                kpi: Kpi::Responses,
                ..
            }
        ));
    }
}

//! Evenly spaced sequences.
//!
//! `linspace` builds the input grid; `linspace_counts` builds the trial
//! counts of a sweep. Both pin the last point to `max` exactly so that
//! accumulated rounding never drops the endpoint.

use crate::error::AppError;

/// Generate `steps` linearly spaced points between `min` and `max` (inclusive).
pub fn linspace(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(AppError::input(format!(
            "Invalid range: min={min}, max={max} (must be finite)."
        )));
    }

    match steps {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![min]),
        _ => {}
    }

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out = Vec::new();
    for i in 0..steps - 1 {
        out.push(min + step * i as f64);
    }
    out.push(max);
    Ok(out)
}

/// Linearly spaced integer counts between `min` and `max` (inclusive).
///
/// Intermediate points are truncated toward zero, so small ranges produce
/// repeated counts. The sequence is non-decreasing whenever `min <= max`.
/// Counts are produced lazily; nothing is sized up front from `steps`.
pub fn linspace_counts(min: usize, max: usize, steps: usize) -> impl Iterator<Item = usize> {
    let (lo, hi) = (min as f64, max as f64);
    let step = if steps > 1 {
        (hi - lo) / (steps as f64 - 1.0)
    } else {
        0.0
    };

    (0..steps).map(move |i| {
        if steps > 1 && i == steps - 1 {
            max
        } else {
            (lo + step * i as f64).trunc() as usize
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(0.0, 4.0, 5).unwrap();
        assert_eq!(v, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn linspace_degenerate_lengths() {
        assert!(linspace(0.0, 1.0, 0).unwrap().is_empty());
        assert_eq!(linspace(2.0, 9.0, 1).unwrap(), vec![2.0]);
        assert!(linspace(f64::NAN, 1.0, 3).is_err());
    }

    #[test]
    fn counts_truncate_and_pin_endpoint() {
        let v: Vec<usize> = linspace_counts(2, 250, 20).collect();
        assert_eq!(v.len(), 20);
        assert_eq!(v[0], 2);
        assert_eq!(v[1], 15); // 2 + 248/19 = 15.05...
        assert_eq!(v[19], 250);
        assert!(v.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn counts_repeat_on_small_ranges() {
        let v: Vec<usize> = linspace_counts(2, 5, 20).collect();
        assert_eq!(v.len(), 20);
        assert!(v.windows(2).any(|w| w[0] == w[1]));
        assert!(v.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*v.last().unwrap(), 5);
    }

    #[test]
    fn counts_handle_degenerate_and_huge_step_counts() {
        assert_eq!(linspace_counts(3, 9, 0).count(), 0);
        assert_eq!(linspace_counts(3, 9, 1).collect::<Vec<_>>(), vec![3]);

        let head: Vec<usize> = linspace_counts(2, 10, usize::MAX).take(3).collect();
        assert_eq!(head, vec![2, 2, 2]);
    }
}

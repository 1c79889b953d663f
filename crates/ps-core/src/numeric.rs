use crate::PsError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PsError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PsError::NonFinite { what, value: v })
    }
}

/// `10^x`, the inverse of `log10`.
#[inline]
pub fn exp10(x: Real) -> Real {
    Real::powf(10.0, x)
}

/// Ratio of the last to the first entry of a depth-ordered column.
///
/// Returns `None` for an empty slice.
pub fn tail_head_ratio(values: &[Real]) -> Option<Real> {
    let first = *values.first()?;
    let last = *values.last()?;
    Some(last / first)
}

/// Running sum, `out[i] = values[0] + ... + values[i]`.
pub fn cumulative_sum(values: &[Real]) -> Vec<Real> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

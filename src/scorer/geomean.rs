use crate::error::{AnnealError, AnnealResult};

/// `exp(Σ wᵢ·ln vᵢ / Σ wᵢ)`.
///
/// An x% change in any value moves the result by the same ratio, so
/// heterogeneous metrics (costs, step counts) can be combined. Every value
/// must be strictly positive and finite; anything else is rejected rather
/// than coerced.
pub fn weighted_geo_mean(weights: &[f64], values: &[f64]) -> AnnealResult<f64> {
    if weights.len() != values.len() {
        return Err(AnnealError::Config(format!(
            "geometric mean got {} weights for {} values",
            weights.len(),
            values.len()
        )));
    }
    if values.is_empty() {
        return Err(AnnealError::Config(
            "geometric mean of no values is undefined".into(),
        ));
    }

    let mut weighted_logs = 0.0;
    let mut total_weight = 0.0;
    for (i, (&w, &v)) in weights.iter().zip(values).enumerate() {
        if !(v > 0.0) || !v.is_finite() {
            return Err(AnnealError::Config(format!(
                "geometric mean requires positive finite values, got {} at index {}",
                v, i
            )));
        }
        if !(w >= 0.0) || !w.is_finite() {
            return Err(AnnealError::Config(format!(
                "geometric mean weights must be non-negative, got {} at index {}",
                w, i
            )));
        }
        weighted_logs += w * v.ln();
        total_weight += w;
    }

    if total_weight <= 0.0 {
        return Err(AnnealError::Config(
            "geometric mean weights sum to zero".into(),
        ));
    }

    Ok((weighted_logs / total_weight).exp())
}

/// Unweighted geometric mean.
pub fn geo_mean(values: &[f64]) -> AnnealResult<f64> {
    weighted_geo_mean(&vec![1.0; values.len()], values)
}

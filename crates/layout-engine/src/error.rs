use window_types::Wing;

/// Failures inside a dimension computation. Public calculators catch these,
/// log them, and return empty results.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LayoutError {
    #[error("non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} collapsed to {value} mm")]
    DegenerateSpan { what: String, value: f64 },

    #[error("wing {wing:?} has no plan in the resolved topology")]
    MissingWing { wing: Wing },
}

/// Rejects NaN and infinities produced by chained arithmetic.
pub(crate) fn finite(what: &'static str, value: f64) -> Result<f64, LayoutError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LayoutError::NonFinite { what, value })
    }
}

use crate::foundation::error::{ProgressError, ProgressResult};

pub use kurbo::BezPath;

/// Side length of the normalized coordinate square every geometry is authored in.
pub const VIEW_BOX_SIZE: f64 = 100.0;

/// `viewBox` attribute of every root svg.
pub const VIEW_BOX: &str = "0 0 100 100";

/// Outcome of clamping a caller-supplied progress value into `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clamped {
    /// Value in `[0, 1]`.
    pub value: f64,
    /// True when the input was outside `[0, 1]`.
    pub adjusted: bool,
}

/// Clamp `value` into `[0, 1]`. Non-finite input is a validation error.
pub fn clamp_progress(value: f64) -> ProgressResult<Clamped> {
    if !value.is_finite() {
        return Err(ProgressError::validation(format!(
            "progress must be a finite number, got {value}"
        )));
    }
    let clamped = value.clamp(0.0, 1.0);
    Ok(Clamped {
        value: clamped,
        adjusted: clamped != value,
    })
}

/// Attribute text for a number (`1.0` renders as `1`).
pub fn fmt_num(v: f64) -> String {
    if v == 0.0 {
        // Avoid "-0".
        return "0".to_owned();
    }
    format!("{v}")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

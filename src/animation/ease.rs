/// Easing curve applied to normalized animation time.
///
/// Serialized names follow the common `easeIn`/`easeOut` vocabulary; the bare names alias the
/// cubic variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[default]
    #[serde(rename = "linear")]
    /// Constant speed.
    Linear,
    #[serde(rename = "easeInQuad")]
    /// Quadratic, accelerating.
    InQuad,
    #[serde(rename = "easeOutQuad")]
    /// Quadratic, decelerating.
    OutQuad,
    #[serde(rename = "easeInOutQuad")]
    /// Quadratic, accelerating then decelerating.
    InOutQuad,
    #[serde(rename = "easeInCubic", alias = "easeIn")]
    /// Cubic, accelerating.
    InCubic,
    #[serde(rename = "easeOutCubic", alias = "easeOut")]
    /// Cubic, decelerating.
    OutCubic,
    #[serde(rename = "easeInOutCubic", alias = "easeInOut")]
    /// Cubic, accelerating then decelerating.
    InOutCubic,
}

impl Ease {
    /// Map normalized time `t` (clamped to `[0, 1]`) to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => ease_in(t, 2),
            Self::OutQuad => ease_out(t, 2),
            Self::InOutQuad => ease_in_out(t, 2),
            Self::InCubic => ease_in(t, 3),
            Self::OutCubic => ease_out(t, 3),
            Self::InOutCubic => ease_in_out(t, 3),
        }
    }
}

fn ease_in(t: f64, degree: i32) -> f64 {
    t.powi(degree)
}

fn ease_out(t: f64, degree: i32) -> f64 {
    1.0 - (1.0 - t).powi(degree)
}

fn ease_in_out(t: f64, degree: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(degree - 1) * t.powi(degree)
    } else {
        1.0 - (2.0 - 2.0 * t).powi(degree) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

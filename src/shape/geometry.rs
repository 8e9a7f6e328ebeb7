//! Geometry hooks: per-shape path descriptions in the normalized 0..100 coordinate space.

use std::str::FromStr;

use crate::{
    config::options::Options,
    foundation::core::{BezPath, VIEW_BOX_SIZE, fmt_num},
    foundation::error::{ProgressError, ProgressResult},
};

/// Per-shape geometry capability injected into [`crate::Shape`].
///
/// Both hooks must be pure functions of the options. The provided implementations fail with
/// [`ProgressError::UnimplementedGeometry`]; a concrete shape overrides both.
pub trait Geometry {
    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "shape"
    }

    /// Default options user patches are merged over.
    fn defaults(&self) -> Options {
        Options::default()
    }

    /// SVG path data of the primary (progress) path.
    fn path_string(&self, _opts: &Options) -> ProgressResult<String> {
        Err(ProgressError::UnimplementedGeometry("path_string"))
    }

    /// SVG path data of the trail drawn underneath the primary path.
    fn trail_string(&self, _opts: &Options) -> ProgressResult<String> {
        Err(ProgressError::UnimplementedGeometry("trail_string"))
    }
}

/// Radius that keeps the widest stroke inside the view box.
fn inset_radius(opts: &Options) -> f64 {
    VIEW_BOX_SIZE / 2.0 - opts.widest_stroke() / 2.0
}

/// Full circle starting at 12 o'clock, drawn clockwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct Circle;

impl Geometry for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn path_string(&self, opts: &Options) -> ProgressResult<String> {
        let r = fmt_num(inset_radius(opts));
        let d = fmt_num(inset_radius(opts) * 2.0);
        Ok(format!(
            "M 50,50 m 0,-{r} a {r},{r} 0 1 1 0,{d} a {r},{r} 0 1 1 0,-{d}"
        ))
    }

    fn trail_string(&self, opts: &Options) -> ProgressResult<String> {
        self.path_string(opts)
    }
}

/// Upper half circle from 9 o'clock to 3 o'clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SemiCircle;

impl Geometry for SemiCircle {
    fn name(&self) -> &'static str {
        "semicircle"
    }

    fn path_string(&self, opts: &Options) -> ProgressResult<String> {
        let r = fmt_num(inset_radius(opts));
        let d = fmt_num(inset_radius(opts) * 2.0);
        Ok(format!("M 50,50 m -{r},0 a {r},{r} 0 1 1 {d},0"))
    }

    fn trail_string(&self, opts: &Options) -> ProgressResult<String> {
        self.path_string(opts)
    }
}

/// Horizontal line across the middle of the view box.
#[derive(Clone, Copy, Debug, Default)]
pub struct Line;

impl Geometry for Line {
    fn name(&self) -> &'static str {
        "line"
    }

    fn path_string(&self, _opts: &Options) -> ProgressResult<String> {
        Ok("M 0,50 L 100,50".to_owned())
    }

    fn trail_string(&self, opts: &Options) -> ProgressResult<String> {
        self.path_string(opts)
    }
}

/// Arbitrary user path data, used for both the primary path and the trail.
#[derive(Clone, Debug)]
pub struct CustomPath {
    d: String,
}

impl CustomPath {
    /// Validate `d` as svg path data.
    pub fn new(d: impl Into<String>) -> ProgressResult<Self> {
        let d = d.into();
        let parsed = BezPath::from_svg(&d)
            .map_err(|e| ProgressError::validation(format!("invalid path data: {e}")))?;
        if parsed.elements().is_empty() {
            return Err(ProgressError::validation("path data must not be empty"));
        }
        Ok(Self { d })
    }
}

impl Geometry for CustomPath {
    fn name(&self) -> &'static str {
        "path"
    }

    fn path_string(&self, _opts: &Options) -> ProgressResult<String> {
        Ok(self.d.clone())
    }

    fn trail_string(&self, _opts: &Options) -> ProgressResult<String> {
        Ok(self.d.clone())
    }
}

/// Built-in shapes selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Full circle.
    Circle,
    /// Upper half circle.
    SemiCircle,
    /// Horizontal line.
    Line,
}

impl ShapeKind {
    /// Boxed geometry implementing this kind.
    pub fn geometry(self) -> Box<dyn Geometry> {
        match self {
            Self::Circle => Box::new(Circle),
            Self::SemiCircle => Box::new(SemiCircle),
            Self::Line => Box::new(Line),
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "semicircle" | "semi-circle" => Ok(Self::SemiCircle),
            "line" => Ok(Self::Line),
            other => Err(ProgressError::validation(format!(
                "unknown shape kind '{other}' (expected circle, semicircle or line)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/geometry.rs"]
mod tests;

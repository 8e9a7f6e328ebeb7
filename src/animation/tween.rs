//! Progress engines: interpolate a progress value over time and apply it to the primary path.

use kurbo::Shape as _;

use crate::{
    animation::ease::Ease,
    config::options::{Options, StrokeStyle},
    foundation::color::Rgba8,
    foundation::core::{BezPath, fmt_num},
    foundation::error::{ProgressError, ProgressResult},
    surface::document::{Document, NodeId},
};

/// Arc-length accuracy used when measuring the primary path.
const LENGTH_ACCURACY: f64 = 1e-3;

/// Values handed to step callbacks after each applied frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepState {
    /// Committed progress in `[0, 1]`.
    pub progress: f64,
    /// Interpolated stroke color when both `from.color` and `to.color` are set.
    pub color: Option<Rgba8>,
    /// Interpolated stroke width when both `from.width` and `to.width` are set.
    pub width: Option<f64>,
}

/// Result of advancing a running animation by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// State applied by this frame.
    pub state: StepState,
    /// True on the frame that reached the target.
    pub finished: bool,
}

/// Timing and stroke interpolation parameters of one animation.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec {
    /// Animation length; zero or less finishes on the first frame.
    pub duration_ms: f64,
    /// Curve applied to normalized time.
    pub easing: Ease,
    /// Stroke style at the start of the tween.
    pub from: StrokeStyle,
    /// Stroke style at the end of the tween.
    pub to: StrokeStyle,
}

impl TweenSpec {
    /// Timing and stroke tween taken from resolved shape options.
    pub fn from_options(opts: &Options) -> Self {
        Self {
            duration_ms: opts.duration as f64,
            easing: opts.easing,
            from: opts.from.clone(),
            to: opts.to.clone(),
        }
    }

    /// Check the stroke tween colors without starting anything.
    pub fn validate(&self) -> ProgressResult<()> {
        StrokeTween::parse(&self.from, &self.to).map(|_| ())
    }
}

/// Animation engine bound to a single path element.
///
/// Engines never schedule work themselves; the owning shape drives [`ProgressEngine::advance`]
/// from host frame callbacks.
pub trait ProgressEngine {
    /// Apply `progress` immediately and cancel any running animation.
    fn set(&mut self, doc: &mut Document, progress: f64) -> ProgressResult<StepState>;

    /// Last committed progress.
    fn value(&self) -> f64;

    /// Begin animating from the committed value towards `target`.
    fn start(&mut self, target: f64, spec: &TweenSpec, now_ms: f64) -> ProgressResult<()>;

    /// Apply the frame for `now_ms`. `None` when nothing is running.
    fn advance(&mut self, doc: &mut Document, now_ms: f64) -> ProgressResult<Option<Frame>>;

    /// Cancel the running animation, keeping the last applied state. True if one was running.
    fn stop(&mut self) -> bool;

    /// True while an animation is in flight.
    fn is_running(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct StrokeTween {
    colors: Option<(Rgba8, Rgba8)>,
    widths: Option<(f64, f64)>,
}

impl StrokeTween {
    fn parse(from: &StrokeStyle, to: &StrokeStyle) -> ProgressResult<Self> {
        let colors = match (&from.color, &to.color) {
            (Some(a), Some(b)) => Some((Rgba8::parse(a)?, Rgba8::parse(b)?)),
            _ => None,
        };
        let widths = match (from.width, to.width) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        };
        Ok(Self { colors, widths })
    }

    fn at(&self, progress: f64) -> StepState {
        StepState {
            progress,
            color: self.colors.map(|(a, b)| Rgba8::lerp(a, b, progress)),
            width: self.widths.map(|(a, b)| a + (b - a) * progress),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Running {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
    easing: Ease,
    stroke: StrokeTween,
}

/// Dash-offset engine: reveals the path by shrinking `stroke-dashoffset` from its full length.
#[derive(Debug)]
pub struct PathTween {
    path: NodeId,
    length: f64,
    committed: f64,
    stroke: StrokeTween,
    running: Option<Running>,
}

impl PathTween {
    /// Measure `path`, install the dash array and apply progress 0.
    pub fn attach(doc: &mut Document, path: NodeId, opts: &Options) -> ProgressResult<Self> {
        let d = doc
            .attribute(path, "d")
            .ok_or_else(|| ProgressError::validation("progress path has no `d` attribute"))?;
        let bez = BezPath::from_svg(d)
            .map_err(|e| ProgressError::validation(format!("invalid path data: {e}")))?;
        let length = bez.perimeter(LENGTH_ACCURACY);

        let dash = fmt_num(length);
        doc.set_attribute(path, "stroke-dasharray", format!("{dash} {dash}"))?;

        let mut engine = Self {
            path,
            length,
            committed: 0.0,
            stroke: StrokeTween::parse(&opts.from, &opts.to)?,
            running: None,
        };
        engine.apply(doc, engine.stroke.at(0.0))?;
        Ok(engine)
    }

    /// Measured arc length of the path in normalized units.
    pub fn length(&self) -> f64 {
        self.length
    }

    fn apply(&mut self, doc: &mut Document, state: StepState) -> ProgressResult<()> {
        let offset = self.length * (1.0 - state.progress);
        doc.set_attribute(self.path, "stroke-dashoffset", fmt_num(offset))?;
        if let Some(color) = state.color {
            doc.set_attribute(self.path, "stroke", color.to_css())?;
        }
        if let Some(width) = state.width {
            doc.set_attribute(self.path, "stroke-width", fmt_num(width))?;
        }
        self.committed = state.progress;
        Ok(())
    }
}

impl ProgressEngine for PathTween {
    fn set(&mut self, doc: &mut Document, progress: f64) -> ProgressResult<StepState> {
        self.running = None;
        let state = self.stroke.at(progress);
        self.apply(doc, state)?;
        Ok(state)
    }

    fn value(&self) -> f64 {
        self.committed
    }

    fn start(&mut self, target: f64, spec: &TweenSpec, now_ms: f64) -> ProgressResult<()> {
        let stroke = StrokeTween::parse(&spec.from, &spec.to)?;
        self.running = Some(Running {
            from: self.committed,
            to: target,
            start_ms: now_ms,
            duration_ms: spec.duration_ms.max(0.0),
            easing: spec.easing,
            stroke,
        });
        Ok(())
    }

    fn advance(&mut self, doc: &mut Document, now_ms: f64) -> ProgressResult<Option<Frame>> {
        let Some(run) = self.running else {
            return Ok(None);
        };
        let t = if run.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - run.start_ms) / run.duration_ms).clamp(0.0, 1.0)
        };
        let finished = t >= 1.0;
        let progress = if finished {
            run.to
        } else {
            run.from + (run.to - run.from) * run.easing.apply(t)
        };

        let state = run.stroke.at(progress);
        self.apply(doc, state)?;
        if finished {
            self.running = None;
        }
        Ok(Some(Frame { state, finished }))
    }

    fn stop(&mut self) -> bool {
        self.running.take().is_some()
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;

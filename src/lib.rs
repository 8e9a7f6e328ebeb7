//! progressvg draws progress indicators (circle, semi-circle, line or any custom path) as
//! vector trees and animates them frame by frame.
//!
//! The crate is headless. A [`Host`] owns a small element tree ([`Document`]) plus a frame
//! loop; the embedding application calls [`Host::tick`] once per display frame. Shapes attach
//! to a container element in that tree:
//!
//! - Resolve user options over shape defaults ([`resolve`], [`OptionsPatch`])
//! - Build and attach a shape ([`Shape::new`] or [`ShapeBuilder`])
//! - Drive it with [`Shape::set`], [`Shape::animate`] and [`Shape::set_text`]
//! - Render its current state offline ([`rasterize_shape`], [`encode_png`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod render;
pub(crate) mod shape;
pub(crate) mod surface;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{BezPath, Clamped, VIEW_BOX, VIEW_BOX_SIZE, clamp_progress};
pub use crate::foundation::error::{ProgressError, ProgressResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::{Frame, PathTween, ProgressEngine, StepState, TweenSpec};
pub use crate::config::options::{
    DEFAULT_COLOR, DEFAULT_DURATION_MS, DEFAULT_TEXT_CLASS, DEFAULT_TRAIL_COLOR, Options,
    StrokeStyle, TextOptions, TrailStyle,
};
pub use crate::config::resolve::{OptionsPatch, StrokePatch, TextPatch, resolve};
pub use crate::render::raster::{Raster, encode_png, rasterize_markup, rasterize_shape};
pub use crate::render::svg::SVG_NS;
pub use crate::shape::builder::ShapeBuilder;
pub use crate::shape::geometry::{Circle, CustomPath, Geometry, Line, SemiCircle, ShapeKind};
pub use crate::shape::instance::{
    AnimateOpts, AnimationOutcome, Container, DoneFn, Shape, StepFn,
};
pub use crate::surface::document::{Document, Element, NodeData, NodeId};
pub use crate::surface::frames::FrameHandle;
pub use crate::surface::host::Host;

use std::rc::Rc;

use crate::{
    animation::tween::StepState,
    config::resolve::OptionsPatch,
    foundation::error::{ProgressError, ProgressResult},
    shape::{
        geometry::{Geometry, ShapeKind},
        instance::{Container, Shape, StepFn},
    },
    surface::host::Host,
};

/// Step-by-step construction of a [`Shape`].
///
/// Geometry and container are mandatory; [`ShapeBuilder::build`] reports a missing one as
/// [`ProgressError::ConstructorMisuse`].
pub struct ShapeBuilder {
    host: Host,
    container: Option<Container>,
    geometry: Option<Box<dyn Geometry>>,
    options: OptionsPatch,
    step: Option<StepFn>,
}

impl ShapeBuilder {
    /// Start a builder for a shape hosted by `host`.
    pub fn new(host: &Host) -> Self {
        Self {
            host: host.clone(),
            container: None,
            geometry: None,
            options: OptionsPatch::default(),
            step: None,
        }
    }

    /// Set the element the shape attaches to.
    pub fn container(mut self, container: impl Into<Container>) -> Self {
        self.container = Some(container.into());
        self
    }

    /// Use a custom geometry.
    pub fn geometry(mut self, geometry: impl Geometry + 'static) -> Self {
        self.geometry = Some(Box::new(geometry));
        self
    }

    /// Use a built-in shape.
    pub fn kind(mut self, kind: ShapeKind) -> Self {
        self.geometry = Some(kind.geometry());
        self
    }

    /// Set the user option patch.
    pub fn options(mut self, options: OptionsPatch) -> Self {
        self.options = options;
        self
    }

    /// Default step callback, used by `set` and by animations that do not bring their own.
    pub fn on_step(mut self, f: impl Fn(&StepState, &Shape) + 'static) -> Self {
        self.step = Some(Rc::new(f));
        self
    }

    /// Construct the shape.
    pub fn build(self) -> ProgressResult<Shape> {
        let geometry = self.geometry.ok_or_else(|| {
            ProgressError::constructor_misuse("a shape needs a geometry (circle, line, ...)")
        })?;
        let container = self
            .container
            .ok_or_else(|| ProgressError::constructor_misuse("a shape needs a container"))?;
        Shape::construct(
            &self.host,
            container,
            geometry.as_ref(),
            &self.options,
            self.step,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/builder.rs"]
mod tests;

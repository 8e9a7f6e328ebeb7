//! The progress shape instance: lifecycle guard, text overlay and the animation bridge.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    animation::{
        ease::Ease,
        tween::{PathTween, ProgressEngine, StepState, TweenSpec},
    },
    config::{
        options::{Options, StrokeStyle},
        resolve::{OptionsPatch, resolve},
    },
    foundation::core::clamp_progress,
    foundation::error::{ProgressError, ProgressResult},
    render::svg::create_text_container,
    shape::{
        geometry::Geometry,
        renderer::{VectorTree, build_tree},
    },
    surface::{
        document::{Document, NodeId},
        frames::FrameHandle,
        host::Host,
    },
};

/// Step callback: receives the applied state and the shape that owns the animation.
pub type StepFn = Rc<dyn Fn(&StepState, &Shape)>;

/// Completion callback of one `animate` call.
pub type DoneFn = Box<dyn FnOnce(AnimationOutcome)>;

/// How an animation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The target progress was reached.
    Completed,
    /// Superseded by `animate`/`set`, or stopped by `stop`/`destroy`.
    Cancelled,
}

/// Where a shape gets attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Container {
    /// `#id`, `.class` or tag selector resolved against the host document.
    Selector(String),
    /// Direct element handle.
    Node(NodeId),
}

impl From<&str> for Container {
    fn from(s: &str) -> Self {
        Self::Selector(s.to_owned())
    }
}

impl From<String> for Container {
    fn from(s: String) -> Self {
        Self::Selector(s)
    }
}

impl From<NodeId> for Container {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl Container {
    fn resolve(&self, doc: &Document) -> ProgressResult<NodeId> {
        match self {
            Self::Selector(sel) => doc
                .query_selector(sel)
                .ok_or_else(|| ProgressError::container_not_found(format!("selector '{sel}'"))),
            Self::Node(id) => doc
                .element(*id)
                .map(|_| *id)
                .ok_or_else(|| ProgressError::container_not_found(format!("node {id:?}"))),
        }
    }
}

/// Per-call overrides for [`Shape::animate_with`]. Unset fields fall back to the shape options.
#[derive(Clone, Default)]
pub struct AnimateOpts {
    /// Duration in ms.
    pub duration: Option<u64>,
    /// Easing curve.
    pub easing: Option<Ease>,
    /// Stroke style at the start; replaces the shape's `from`.
    pub from: Option<StrokeStyle>,
    /// Stroke style at the end; replaces the shape's `to`.
    pub to: Option<StrokeStyle>,
    /// Step callback for this animation only.
    pub step: Option<StepFn>,
}

impl std::fmt::Debug for AnimateOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimateOpts")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("step", &self.step.is_some())
            .finish()
    }
}

impl AnimateOpts {
    /// Set the duration in ms.
    pub fn duration(mut self, ms: u64) -> Self {
        self.duration = Some(ms);
        self
    }

    /// Set the easing curve.
    pub fn easing(mut self, easing: Ease) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Set the start stroke style.
    pub fn from(mut self, style: StrokeStyle) -> Self {
        self.from = Some(style);
        self
    }

    /// Set the end stroke style.
    pub fn to(mut self, style: StrokeStyle) -> Self {
        self.to = Some(style);
        self
    }

    /// Set the per-animation step callback.
    pub fn step(mut self, f: impl Fn(&StepState, &Shape) + 'static) -> Self {
        self.step = Some(Rc::new(f));
        self
    }

    fn spec(&self, opts: &Options) -> TweenSpec {
        let base = TweenSpec::from_options(opts);
        TweenSpec {
            duration_ms: self.duration.map_or(base.duration_ms, |ms| ms as f64),
            easing: self.easing.unwrap_or(base.easing),
            from: self.from.clone().unwrap_or(base.from),
            to: self.to.clone().unwrap_or(base.to),
        }
    }
}

/// A rendered progress indicator bound to a host surface.
///
/// `Shape` is a cheap handle; clones refer to the same instance. Once [`Shape::destroy`] has
/// run, every operation on any clone fails with [`ProgressError::DestroyedObject`].
#[derive(Clone)]
pub struct Shape {
    inner: Rc<RefCell<Lifecycle>>,
}

enum Lifecycle {
    Alive(Box<Parts>),
    Destroyed,
}

struct Parts {
    host: Host,
    name: &'static str,
    options: Options,
    container: NodeId,
    tree: VectorTree,
    text: Option<NodeId>,
    engine: Box<dyn ProgressEngine>,
    step: Option<StepFn>,
    flight: Option<Flight>,
}

/// The one animation an instance may have in flight.
struct Flight {
    frame: FrameHandle,
    step: Option<StepFn>,
    on_done: Option<DoneFn>,
}

enum FrameOutcome {
    Idle,
    Applied {
        state: StepState,
        step: Option<StepFn>,
        done: Option<DoneFn>,
    },
    Failed(Option<DoneFn>),
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.inner.borrow() {
            Lifecycle::Alive(p) => f
                .debug_struct("Shape")
                .field("kind", &p.name)
                .field("svg", &p.tree.svg)
                .field("animating", &p.flight.is_some())
                .finish(),
            Lifecycle::Destroyed => f.write_str("Shape(destroyed)"),
        }
    }
}

impl Parts {
    fn checked_progress(&self, progress: f64) -> ProgressResult<f64> {
        let clamped = clamp_progress(progress)?;
        if clamped.adjusted && self.options.warnings {
            tracing::warn!(
                shape = self.name,
                requested = progress,
                applied = clamped.value,
                "progress outside [0, 1] was clamped"
            );
        }
        Ok(clamped.value)
    }

    /// Cancel the in-flight animation, handing back its completion callback.
    fn cancel_flight(&mut self) -> Option<DoneFn> {
        let flight = self.flight.take()?;
        self.host.cancel_frame(flight.frame);
        self.engine.stop();
        tracing::debug!(shape = self.name, "animation cancelled");
        flight.on_done
    }
}

fn schedule_frame(host: &Host, owner: Weak<RefCell<Lifecycle>>) -> FrameHandle {
    host.request_frame(move |now| {
        if let Some(inner) = owner.upgrade() {
            Shape { inner }.run_frame(now);
        }
    })
}

impl Shape {
    /// Resolve options, build the vector tree, bind the engine and attach to `container`.
    ///
    /// Fails with [`ProgressError::ContainerNotFound`] before anything is created when the
    /// container does not resolve, and leaves the container untouched on any other failure.
    pub fn new(
        host: &Host,
        container: impl Into<Container>,
        geometry: &dyn Geometry,
        user: &OptionsPatch,
    ) -> ProgressResult<Self> {
        Self::construct(host, container.into(), geometry, user, None)
    }

    #[tracing::instrument(skip_all, fields(shape = geometry.name()))]
    pub(crate) fn construct(
        host: &Host,
        container: Container,
        geometry: &dyn Geometry,
        user: &OptionsPatch,
        step: Option<StepFn>,
    ) -> ProgressResult<Self> {
        let options = resolve(&geometry.defaults(), user);
        options.validate()?;

        let (container, tree, engine) = {
            let mut doc = host.document_mut();
            let container = container.resolve(&doc)?;
            let tree = build_tree(&mut doc, geometry, &options)?;
            let engine = match PathTween::attach(&mut doc, tree.path, &options) {
                Ok(engine) => engine,
                Err(err) => {
                    doc.release(tree.svg)?;
                    return Err(err);
                }
            };
            doc.append_child(container, tree.svg)?;
            (container, tree, engine)
        };

        let initial_text = options.text.value.clone();
        let shape = Self {
            inner: Rc::new(RefCell::new(Lifecycle::Alive(Box::new(Parts {
                host: host.clone(),
                name: geometry.name(),
                options,
                container,
                tree,
                text: None,
                engine: Box::new(engine),
                step,
                flight: None,
            })))),
        };

        if !initial_text.is_empty()
            && let Err(err) = shape.set_text(initial_text)
        {
            shape.destroy()?;
            return Err(err);
        }
        tracing::debug!(trail = tree.trail.is_some(), "shape attached");
        Ok(shape)
    }

    fn with_alive<R>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut Parts) -> ProgressResult<R>,
    ) -> ProgressResult<R> {
        match &mut *self.inner.borrow_mut() {
            Lifecycle::Alive(parts) => f(parts),
            Lifecycle::Destroyed => Err(ProgressError::DestroyedObject(op)),
        }
    }

    /// True once [`Shape::destroy`] has run on any clone.
    pub fn is_destroyed(&self) -> bool {
        matches!(&*self.inner.borrow(), Lifecycle::Destroyed)
    }

    /// Animate to `progress` with the shape's default duration and easing.
    pub fn animate(&self, progress: f64) -> ProgressResult<()> {
        self.start_animation(progress, AnimateOpts::default(), None)
    }

    /// Animate to `progress` with per-call overrides.
    pub fn animate_with(&self, progress: f64, opts: AnimateOpts) -> ProgressResult<()> {
        self.start_animation(progress, opts, None)
    }

    /// Like [`Shape::animate_with`], calling `on_done` once the animation completes or is
    /// cancelled.
    pub fn animate_then(
        &self,
        progress: f64,
        opts: AnimateOpts,
        on_done: impl FnOnce(AnimationOutcome) + 'static,
    ) -> ProgressResult<()> {
        self.start_animation(progress, opts, Some(Box::new(on_done)))
    }

    fn start_animation(
        &self,
        progress: f64,
        opts: AnimateOpts,
        on_done: Option<DoneFn>,
    ) -> ProgressResult<()> {
        let owner = Rc::downgrade(&self.inner);
        let superseded = self.with_alive("animate", move |p| {
            let target = p.checked_progress(progress)?;
            let spec = opts.spec(&p.options);
            spec.validate()?;

            let superseded = p.cancel_flight();
            p.engine.start(target, &spec, p.host.now_ms())?;
            let frame = schedule_frame(&p.host, owner);
            p.flight = Some(Flight {
                frame,
                step: opts.step.or_else(|| p.step.clone()),
                on_done,
            });
            tracing::debug!(
                shape = p.name,
                from = p.engine.value(),
                to = target,
                duration_ms = spec.duration_ms,
                "animation started"
            );
            Ok(superseded)
        })?;

        if let Some(done) = superseded {
            done(AnimationOutcome::Cancelled);
        }
        Ok(())
    }

    fn run_frame(&self, now_ms: f64) {
        let outcome = match &mut *self.inner.borrow_mut() {
            Lifecycle::Alive(parts) => self.advance_parts(parts, now_ms),
            Lifecycle::Destroyed => FrameOutcome::Idle,
        };

        match outcome {
            FrameOutcome::Idle => {}
            FrameOutcome::Applied { state, step, done } => {
                if let Some(step) = step {
                    step(&state, self);
                }
                if let Some(done) = done {
                    done(AnimationOutcome::Completed);
                }
            }
            FrameOutcome::Failed(done) => {
                if let Some(done) = done {
                    done(AnimationOutcome::Cancelled);
                }
            }
        }
    }

    fn advance_parts(&self, p: &mut Parts, now_ms: f64) -> FrameOutcome {
        if p.flight.is_none() {
            return FrameOutcome::Idle;
        }
        let advanced = {
            let mut doc = p.host.document_mut();
            p.engine.advance(&mut doc, now_ms)
        };
        let frame = match advanced {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                p.flight = None;
                return FrameOutcome::Idle;
            }
            Err(err) => {
                tracing::warn!(shape = p.name, error = %err, "animation frame failed");
                return FrameOutcome::Failed(p.cancel_flight());
            }
        };

        let step = p.flight.as_ref().and_then(|f| f.step.clone());
        let done = if frame.finished {
            tracing::debug!(shape = p.name, value = frame.state.progress, "animation finished");
            p.flight.take().and_then(|f| f.on_done)
        } else {
            let next = schedule_frame(&p.host, Rc::downgrade(&self.inner));
            if let Some(flight) = p.flight.as_mut() {
                flight.frame = next;
            }
            None
        };
        FrameOutcome::Applied {
            state: frame.state,
            step,
            done,
        }
    }

    /// Cancel the running animation, leaving the path where it is. No-op when idle.
    pub fn stop(&self) -> ProgressResult<()> {
        let cancelled = self.with_alive("stop", |p| Ok(p.cancel_flight()))?;
        if let Some(done) = cancelled {
            done(AnimationOutcome::Cancelled);
        }
        Ok(())
    }

    /// Apply `progress` immediately, cancelling any running animation.
    pub fn set(&self, progress: f64) -> ProgressResult<()> {
        let (state, cancelled, step) = self.with_alive("set", |p| {
            let value = p.checked_progress(progress)?;
            let cancelled = p.cancel_flight();
            let state = {
                let mut doc = p.host.document_mut();
                p.engine.set(&mut doc, value)?
            };
            Ok((state, cancelled, p.step.clone()))
        })?;

        if let Some(done) = cancelled {
            done(AnimationOutcome::Cancelled);
        }
        if let Some(step) = step {
            step(&state, self);
        }
        Ok(())
    }

    /// Last committed progress in `[0, 1]`.
    pub fn value(&self) -> ProgressResult<f64> {
        self.with_alive("value", |p| Ok(p.engine.value()))
    }

    /// Replace the overlay text, creating the text element on first use.
    pub fn set_text(&self, text: impl Into<String>) -> ProgressResult<()> {
        let text = text.into();
        self.with_alive("set_text", |p| {
            let mut doc = p.host.document_mut();
            let node = match p.text {
                Some(node) => node,
                None => {
                    let node = create_text_container(&mut doc, &p.options, p.container)?;
                    if let Err(err) = doc.append_child(p.container, node) {
                        doc.release(node)?;
                        return Err(err);
                    }
                    p.text = Some(node);
                    node
                }
            };

            let children = doc.children(node).to_vec();
            match children.as_slice() {
                [] => {}
                [old] => doc.release(*old)?,
                more => {
                    return Err(ProgressError::validation(format!(
                        "text element holds {} children, expected at most one",
                        more.len()
                    )));
                }
            }
            let content = doc.create_text(text);
            doc.append_child(node, content)?;
            Ok(())
        })
    }

    /// Stop animating, detach and release every node, and refuse all further calls.
    ///
    /// Calling `destroy` on an already destroyed shape fails.
    pub fn destroy(&self) -> ProgressResult<()> {
        let previous = std::mem::replace(&mut *self.inner.borrow_mut(), Lifecycle::Destroyed);
        let mut parts = match previous {
            Lifecycle::Alive(parts) => parts,
            Lifecycle::Destroyed => return Err(ProgressError::DestroyedObject("destroy")),
        };

        let cancelled = parts.cancel_flight();
        {
            let mut doc = parts.host.document_mut();
            let owned = std::iter::once(parts.tree.svg).chain(parts.text);
            for node in owned {
                if doc.contains(node) {
                    doc.release(node)?;
                }
            }
        }
        tracing::debug!(shape = parts.name, "shape destroyed");
        drop(parts);

        if let Some(done) = cancelled {
            done(AnimationOutcome::Cancelled);
        }
        Ok(())
    }

    /// Copy of the resolved options.
    pub fn options(&self) -> ProgressResult<Options> {
        self.with_alive("options", |p| Ok(p.options.clone()))
    }

    /// True while an animation is in flight.
    pub fn is_animating(&self) -> ProgressResult<bool> {
        self.with_alive("is_animating", |p| Ok(p.flight.is_some()))
    }

    /// Root svg element.
    pub fn svg_node(&self) -> ProgressResult<NodeId> {
        self.with_alive("svg_node", |p| Ok(p.tree.svg))
    }

    /// Primary progress path.
    pub fn path_node(&self) -> ProgressResult<NodeId> {
        self.with_alive("path_node", |p| Ok(p.tree.path))
    }

    /// Trail path, when the options request one.
    pub fn trail_node(&self) -> ProgressResult<Option<NodeId>> {
        self.with_alive("trail_node", |p| Ok(p.tree.trail))
    }

    /// Text element, once text has been set.
    pub fn text_node(&self) -> ProgressResult<Option<NodeId>> {
        self.with_alive("text_node", |p| Ok(p.text))
    }

    /// Markup of the root svg including its inline style.
    pub fn svg_markup(&self) -> ProgressResult<String> {
        self.with_alive("svg_markup", |p| {
            Ok(p.host.document().outer_markup(p.tree.svg))
        })
    }

    /// Markup of the root svg without inline style, for standalone vector output.
    pub fn vector_markup(&self) -> ProgressResult<String> {
        self.with_alive("vector_markup", |p| {
            Ok(p.host.document().vector_markup(p.tree.svg))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/instance.rs"]
mod tests;

//! Primitive-creation helpers for the vector tree. These only create and style nodes; where the
//! nodes end up is decided by the shape renderer.

use crate::{
    config::options::Options,
    foundation::core::{VIEW_BOX, fmt_num},
    foundation::error::{ProgressError, ProgressResult},
    surface::document::{Document, NodeId},
};

/// Namespace of the root svg element.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Stroke/fill styling of one path element.
#[derive(Clone, Copy, Debug)]
pub struct PathStyle<'a> {
    pub d: &'a str,
    pub stroke: &'a str,
    pub stroke_width: f64,
    /// `None` renders a fully transparent fill.
    pub fill: Option<&'a str>,
}

/// Detached root `svg` element in the normalized coordinate space.
pub fn create_svg_view(doc: &mut Document, opts: &Options) -> ProgressResult<NodeId> {
    let svg = doc.create_element("svg");
    doc.set_attribute(svg, "xmlns", SVG_NS)?;
    doc.set_attribute(svg, "viewBox", VIEW_BOX)?;
    for (prop, value) in &opts.svg_style {
        doc.set_style(svg, prop.as_str(), value.as_str())?;
    }
    Ok(svg)
}

/// Detached `path` element.
pub fn create_path(doc: &mut Document, style: &PathStyle<'_>) -> ProgressResult<NodeId> {
    let path = doc.create_element("path");
    doc.set_attribute(path, "d", style.d)?;
    doc.set_attribute(path, "stroke", style.stroke)?;
    doc.set_attribute(path, "stroke-width", fmt_num(style.stroke_width))?;
    match style.fill {
        Some(fill) => doc.set_attribute(path, "fill", fill)?,
        None => doc.set_attribute(path, "fill-opacity", "0")?,
    }
    Ok(path)
}

/// Detached text container element, styled per `text.autoStyle`.
///
/// With auto-style the element is centered over `container`, which is made a positioning
/// context when `text.autoStyleContainer` is set.
pub fn create_text_container(
    doc: &mut Document,
    opts: &Options,
    container: NodeId,
) -> ProgressResult<NodeId> {
    if doc.element(container).is_none() {
        return Err(ProgressError::container_not_found(format!(
            "text container {container:?}"
        )));
    }
    let text = doc.create_element("div");
    match style_text(doc, opts, container, text) {
        Ok(()) => Ok(text),
        Err(err) => {
            doc.release(text)?;
            Err(err)
        }
    }
}

fn style_text(
    doc: &mut Document,
    opts: &Options,
    container: NodeId,
    text: NodeId,
) -> ProgressResult<()> {
    doc.set_attribute(text, "class", opts.text.class_name.as_str())?;
    if !opts.text.auto_style {
        return Ok(());
    }

    if opts.text.auto_style_container {
        doc.set_style(container, "position", "relative")?;
    }
    doc.set_style(text, "color", opts.text_color())?;
    doc.set_style(text, "position", "absolute")?;
    doc.set_style(text, "left", "50%")?;
    doc.set_style(text, "top", "50%")?;
    doc.set_style(text, "padding", "0")?;
    doc.set_style(text, "margin", "0")?;
    doc.set_style(text, "transform", "translate(-50%, -50%)")?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;

use crate::{
    config::options::Options,
    foundation::error::ProgressResult,
    render::svg::{PathStyle, create_path, create_svg_view},
    shape::geometry::Geometry,
    surface::document::{Document, NodeId},
};

/// Nodes of one rendered shape. The root is detached until the caller attaches it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct VectorTree {
    pub svg: NodeId,
    pub path: NodeId,
    pub trail: Option<NodeId>,
}

/// Build the vector tree for `geometry` without attaching it anywhere.
///
/// Geometry hooks run before any node is created, so a failing hook leaves the document
/// untouched.
pub(crate) fn build_tree(
    doc: &mut Document,
    geometry: &dyn Geometry,
    opts: &Options,
) -> ProgressResult<VectorTree> {
    let trail_d = if opts.has_trail() {
        Some(geometry.trail_string(opts)?)
    } else {
        None
    };
    let path_d = geometry.path_string(opts)?;

    let svg = create_svg_view(doc, opts)?;
    match populate(doc, svg, trail_d.as_deref(), &path_d, opts) {
        Ok((trail, path)) => {
            tracing::debug!(shape = geometry.name(), trail = trail.is_some(), "built vector tree");
            Ok(VectorTree { svg, path, trail })
        }
        Err(err) => {
            doc.release(svg)?;
            Err(err)
        }
    }
}

fn populate(
    doc: &mut Document,
    svg: NodeId,
    trail_d: Option<&str>,
    path_d: &str,
    opts: &Options,
) -> ProgressResult<(Option<NodeId>, NodeId)> {
    let trail = match trail_d {
        Some(d) => {
            let style = opts.trail_style();
            let trail = create_path(
                doc,
                &PathStyle {
                    d,
                    stroke: &style.color,
                    stroke_width: style.width,
                    fill: None,
                },
            )?;
            doc.append_child(svg, trail)?;
            Some(trail)
        }
        None => None,
    };

    let path = create_path(
        doc,
        &PathStyle {
            d: path_d,
            stroke: &opts.color,
            stroke_width: opts.stroke_width,
            fill: opts.fill.as_deref(),
        },
    )?;
    doc.append_child(svg, path)?;
    Ok((trail, path))
}

#[cfg(test)]
#[path = "../../tests/unit/shape/renderer.rs"]
mod tests;

use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    foundation::core::VIEW_BOX_SIZE,
    foundation::error::{ProgressError, ProgressResult},
};

/// Primary stroke color.
pub const DEFAULT_COLOR: &str = "#555";
/// Trail stroke color used when only `trailWidth` is set.
pub const DEFAULT_TRAIL_COLOR: &str = "#eee";
/// Class of the text element.
pub const DEFAULT_TEXT_CLASS: &str = "progressbar-text";
/// Animation duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 800;

/// Fully resolved configuration of one shape.
///
/// Every instance owns its own copy; see [`crate::resolve`] for how user patches are merged
/// over defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Stroke color of the primary path.
    pub color: String,
    /// Stroke width of the primary path, in normalized units.
    pub stroke_width: f64,
    /// Trail stroke color; a trail is drawn when this or `trail_width` is set.
    pub trail_color: Option<String>,
    /// Trail stroke width; a trail is drawn when this or `trail_color` is set.
    pub trail_width: Option<f64>,
    /// Fill of the primary path; transparent when unset.
    pub fill: Option<String>,
    /// Overlay text settings.
    pub text: TextOptions,
    /// Inline style applied to the root svg.
    pub svg_style: BTreeMap<String, String>,
    /// Log a warning when a progress value outside `[0, 1]` gets clamped.
    pub warnings: bool,
    /// Default animation duration in milliseconds.
    pub duration: u64,
    /// Default easing of `animate`.
    pub easing: Ease,
    /// Stroke style at progress 0.
    pub from: StrokeStyle,
    /// Stroke style at progress 1.
    pub to: StrokeStyle,
}

/// Text overlay settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    /// Position the text absolutely at the center of the container.
    pub auto_style: bool,
    /// Give the container `position: relative` when auto-styled text is created.
    pub auto_style_container: bool,
    /// Text color; falls back to [`Options::color`].
    pub color: Option<String>,
    /// Initial text; empty means no text node is created at construction.
    pub value: String,
    /// Class attribute of the text element.
    pub class_name: String,
}

/// Optional stroke overrides tweened alongside progress.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyle {
    /// Stroke color as CSS text.
    pub color: Option<String>,
    /// Stroke width in normalized units.
    pub width: Option<f64>,
}

/// Stroke styling of the trail, derived from [`Options`] without touching it.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailStyle {
    /// Trail stroke color.
    pub color: String,
    /// Trail stroke width.
    pub width: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_owned(),
            stroke_width: 1.0,
            trail_color: None,
            trail_width: None,
            fill: None,
            text: TextOptions::default(),
            svg_style: default_svg_style(),
            warnings: false,
            duration: DEFAULT_DURATION_MS,
            easing: Ease::Linear,
            from: StrokeStyle::default(),
            to: StrokeStyle::default(),
        }
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            auto_style: true,
            auto_style_container: true,
            color: None,
            value: String::new(),
            class_name: DEFAULT_TEXT_CLASS.to_owned(),
        }
    }
}

fn default_svg_style() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("display".to_owned(), "block".to_owned()),
        ("width".to_owned(), "100%".to_owned()),
    ])
}

impl Options {
    /// True when either trail option is set.
    pub fn has_trail(&self) -> bool {
        self.trail_color.is_some() || self.trail_width.is_some()
    }

    /// Trail styling: light neutral color and the primary stroke width unless overridden.
    pub fn trail_style(&self) -> TrailStyle {
        TrailStyle {
            color: self
                .trail_color
                .clone()
                .unwrap_or_else(|| DEFAULT_TRAIL_COLOR.to_owned()),
            width: self.trail_width.unwrap_or(self.stroke_width),
        }
    }

    /// The wider of the primary and trail strokes.
    pub fn widest_stroke(&self) -> f64 {
        match self.trail_width {
            Some(w) if w > self.stroke_width => w,
            _ => self.stroke_width,
        }
    }

    /// Text color, falling back to the stroke color.
    pub fn text_color(&self) -> &str {
        self.text.color.as_deref().unwrap_or(&self.color)
    }

    /// Reject widths and names no shape can render.
    pub fn validate(&self) -> ProgressResult<()> {
        fn check_width(name: &str, w: f64) -> ProgressResult<()> {
            if !w.is_finite() || w < 0.0 {
                return Err(ProgressError::validation(format!(
                    "{name} must be a finite, non-negative number, got {w}"
                )));
            }
            if w > VIEW_BOX_SIZE {
                return Err(ProgressError::validation(format!(
                    "{name} {w} is wider than the {VIEW_BOX_SIZE}-unit view box"
                )));
            }
            Ok(())
        }

        check_width("strokeWidth", self.stroke_width)?;
        if let Some(w) = self.trail_width {
            check_width("trailWidth", w)?;
        }
        for (name, style) in [("from", &self.from), ("to", &self.to)] {
            if let Some(w) = style.width {
                check_width(&format!("{name}.width"), w)?;
            }
        }
        if self.color.trim().is_empty() {
            return Err(ProgressError::validation("color must be non-empty"));
        }
        if self.text.class_name.trim().is_empty() {
            return Err(ProgressError::validation("text.className must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;

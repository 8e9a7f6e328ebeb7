//! Recursive merge of user option patches over shape defaults.
//!
//! A patch mirrors [`Options`] with every field optional. An absent field inherits the default;
//! for nullable fields an explicit JSON `null` clears the default instead. Nested groups
//! (`text`, `svgStyle`, `from`, `to`) merge key by key rather than being replaced wholesale.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::{
    animation::ease::Ease,
    config::options::{Options, StrokeStyle, TextOptions},
    foundation::error::ProgressResult,
};

/// User-supplied overrides for [`Options`].
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptionsPatch {
    /// Overrides `color`.
    pub color: Option<String>,
    /// Overrides `strokeWidth`.
    pub stroke_width: Option<f64>,
    /// Overrides `trailColor`; `Some(None)` clears it.
    #[serde(default, deserialize_with = "present")]
    pub trail_color: Option<Option<String>>,
    /// Overrides `trailWidth`; `Some(None)` clears it.
    #[serde(default, deserialize_with = "present")]
    pub trail_width: Option<Option<f64>>,
    /// Overrides `fill`; `Some(None)` clears it.
    #[serde(default, deserialize_with = "present")]
    pub fill: Option<Option<String>>,
    /// Merged key by key into `text`.
    pub text: Option<TextPatch>,
    /// Merged key by key into `svgStyle`.
    pub svg_style: Option<BTreeMap<String, String>>,
    /// Overrides `warnings`.
    pub warnings: Option<bool>,
    /// Overrides `duration` (ms).
    pub duration: Option<u64>,
    /// Overrides `easing`.
    pub easing: Option<Ease>,
    /// Merged into `from`.
    pub from: Option<StrokePatch>,
    /// Merged into `to`.
    pub to: Option<StrokePatch>,
}

/// User overrides for [`TextOptions`].
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextPatch {
    /// Overrides `autoStyle`.
    pub auto_style: Option<bool>,
    /// Overrides `autoStyleContainer`.
    pub auto_style_container: Option<bool>,
    /// Overrides `color`; `Some(None)` clears it.
    #[serde(default, deserialize_with = "present")]
    pub color: Option<Option<String>>,
    /// Overrides `value`.
    pub value: Option<String>,
    /// Overrides `className`.
    pub class_name: Option<String>,
}

/// User overrides for [`StrokeStyle`].
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrokePatch {
    /// Overrides `color`; `Some(None)` clears it.
    #[serde(default, deserialize_with = "present")]
    pub color: Option<Option<String>>,
    /// Overrides `width`; `Some(None)` clears it.
    #[serde(default, deserialize_with = "present")]
    pub width: Option<Option<f64>>,
}

// Maps a present key (even `null`) to `Some`, so `Option<Option<T>>` tells absent from null.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl OptionsPatch {
    /// Parse a patch from a JSON value. Unknown keys are rejected.
    pub fn from_json(value: serde_json::Value) -> ProgressResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a patch from JSON text.
    pub fn from_json_str(s: &str) -> ProgressResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Set the primary stroke color.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the primary stroke width.
    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Set the trail color.
    pub fn trail_color(mut self, color: impl Into<String>) -> Self {
        self.trail_color = Some(Some(color.into()));
        self
    }

    /// Set the trail width.
    pub fn trail_width(mut self, width: f64) -> Self {
        self.trail_width = Some(Some(width));
        self
    }

    /// Set the primary path fill.
    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(Some(fill.into()));
        self
    }

    /// Set the initial overlay text.
    pub fn text_value(mut self, value: impl Into<String>) -> Self {
        self.text.get_or_insert_with(TextPatch::default).value = Some(value.into());
        self
    }
}

fn pick<T: Clone>(user: &Option<T>, default: &T) -> T {
    user.as_ref().unwrap_or(default).clone()
}

/// Merge `user` over `defaults` into a freshly allocated [`Options`].
///
/// Neither input is modified, and the result shares no data with either.
pub fn resolve(defaults: &Options, user: &OptionsPatch) -> Options {
    Options {
        color: pick(&user.color, &defaults.color),
        stroke_width: pick(&user.stroke_width, &defaults.stroke_width),
        trail_color: pick(&user.trail_color, &defaults.trail_color),
        trail_width: pick(&user.trail_width, &defaults.trail_width),
        fill: pick(&user.fill, &defaults.fill),
        text: resolve_text(&defaults.text, user.text.as_ref()),
        svg_style: resolve_map(&defaults.svg_style, user.svg_style.as_ref()),
        warnings: pick(&user.warnings, &defaults.warnings),
        duration: pick(&user.duration, &defaults.duration),
        easing: pick(&user.easing, &defaults.easing),
        from: resolve_stroke(&defaults.from, user.from.as_ref()),
        to: resolve_stroke(&defaults.to, user.to.as_ref()),
    }
}

fn resolve_text(defaults: &TextOptions, user: Option<&TextPatch>) -> TextOptions {
    let Some(user) = user else {
        return defaults.clone();
    };
    TextOptions {
        auto_style: pick(&user.auto_style, &defaults.auto_style),
        auto_style_container: pick(&user.auto_style_container, &defaults.auto_style_container),
        color: pick(&user.color, &defaults.color),
        value: pick(&user.value, &defaults.value),
        class_name: pick(&user.class_name, &defaults.class_name),
    }
}

fn resolve_stroke(defaults: &StrokeStyle, user: Option<&StrokePatch>) -> StrokeStyle {
    let Some(user) = user else {
        return defaults.clone();
    };
    StrokeStyle {
        color: pick(&user.color, &defaults.color),
        width: pick(&user.width, &defaults.width),
    }
}

fn resolve_map(
    defaults: &BTreeMap<String, String>,
    user: Option<&BTreeMap<String, String>>,
) -> BTreeMap<String, String> {
    let mut out = defaults.clone();
    if let Some(user) = user {
        out.extend(user.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/config/resolve.rs"]
mod tests;

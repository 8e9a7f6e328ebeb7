use serde_json::json;

use super::*;

#[test]
fn empty_patch_yields_defaults() {
    let defaults = Options::default();
    let merged = resolve(&defaults, &OptionsPatch::default());
    assert_eq!(merged, defaults);
}

#[test]
fn user_scalars_override_defaults() {
    let defaults = Options::default();
    let patch = OptionsPatch::from_json(json!({
        "color": "#000",
        "strokeWidth": 6.0,
        "trailColor": "#eee",
        "duration": 1400,
        "easing": "easeInOut"
    }))
    .unwrap();
    let merged = resolve(&defaults, &patch);
    assert_eq!(merged.color, "#000");
    assert_eq!(merged.stroke_width, 6.0);
    assert_eq!(merged.trail_color.as_deref(), Some("#eee"));
    assert_eq!(merged.trail_width, None);
    assert_eq!(merged.duration, 1400);
    assert_eq!(merged.easing, Ease::InOutCubic);
}

#[test]
fn text_sub_keys_merge_independently() {
    let mut defaults = Options::default();
    defaults.text.color = Some("#f00".to_owned());
    let patch = OptionsPatch::from_json(json!({"text": {"value": "42%"}})).unwrap();
    let merged = resolve(&defaults, &patch);
    assert_eq!(merged.text.value, "42%");
    assert_eq!(merged.text.color.as_deref(), Some("#f00"));
    assert!(merged.text.auto_style);
    assert_eq!(merged.text.class_name, "progressbar-text");
}

#[test]
fn explicit_null_clears_nullable_default() {
    let defaults = Options {
        trail_color: Some("#ddd".to_owned()),
        fill: Some("#fafafa".to_owned()),
        ..Options::default()
    };
    let patch = OptionsPatch::from_json(json!({"trailColor": null})).unwrap();
    let merged = resolve(&defaults, &patch);
    assert_eq!(merged.trail_color, None);
    assert_eq!(merged.fill.as_deref(), Some("#fafafa"));
}

#[test]
fn svg_style_merges_per_key() {
    let patch = OptionsPatch::from_json(json!({"svgStyle": {"width": "50%", "height": "2em"}}))
        .unwrap();
    let merged = resolve(&Options::default(), &patch);
    assert_eq!(merged.svg_style["display"], "block");
    assert_eq!(merged.svg_style["width"], "50%");
    assert_eq!(merged.svg_style["height"], "2em");
}

#[test]
fn stroke_tween_states_merge_per_key() {
    let defaults = Options {
        from: StrokeStyle {
            color: Some("#aaa".to_owned()),
            width: Some(1.0),
        },
        ..Options::default()
    };
    let patch = OptionsPatch::from_json(json!({"from": {"width": 3.0}, "to": {"color": "#f00"}}))
        .unwrap();
    let merged = resolve(&defaults, &patch);
    assert_eq!(merged.from.color.as_deref(), Some("#aaa"));
    assert_eq!(merged.from.width, Some(3.0));
    assert_eq!(merged.to.color.as_deref(), Some("#f00"));
    assert_eq!(merged.to.width, None);
}

#[test]
fn resolve_leaves_inputs_untouched_and_unaliased() {
    let defaults = Options::default();
    let defaults_before = defaults.clone();
    let patch = OptionsPatch::default().color("#111").text_value("hi");
    let patch_before = patch.clone();

    let mut a = resolve(&defaults, &patch);
    let b = resolve(&defaults, &patch);
    a.text.value.push_str(" there");
    a.svg_style.insert("opacity".to_owned(), "0.5".to_owned());

    assert_eq!(defaults, defaults_before);
    assert_eq!(patch, patch_before);
    assert_eq!(b.text.value, "hi");
    assert!(!b.svg_style.contains_key("opacity"));
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(OptionsPatch::from_json(json!({"colour": "#000"})).is_err());
    assert!(OptionsPatch::from_json_str("{\"text\": {\"bogus\": 1}}").is_err());
}

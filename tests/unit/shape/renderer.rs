use super::*;
use crate::{
    foundation::error::ProgressError,
    shape::geometry::{Circle, Line},
};

#[test]
fn no_trail_options_means_single_path() {
    let mut doc = Document::new();
    let tree = build_tree(&mut doc, &Circle, &Options::default()).unwrap();
    assert!(tree.trail.is_none());
    assert_eq!(doc.children(tree.svg), &[tree.path]);
    assert_eq!(doc.parent(tree.svg), None);
}

#[test]
fn trail_precedes_primary_path() {
    let mut doc = Document::new();
    let opts = Options {
        color: "#000".to_owned(),
        trail_color: Some("#eee".to_owned()),
        ..Options::default()
    };
    let tree = build_tree(&mut doc, &Line, &opts).unwrap();
    let trail = tree.trail.unwrap();
    assert_eq!(doc.children(tree.svg), &[trail, tree.path]);
    assert_eq!(doc.attribute(trail, "stroke"), Some("#eee"));
    assert_eq!(doc.attribute(tree.path, "stroke"), Some("#000"));
}

#[test]
fn trail_width_alone_enables_trail_with_defaults() {
    let mut doc = Document::new();
    let opts = Options {
        trail_width: Some(0.5),
        stroke_width: 4.0,
        fill: Some("#fafafa".to_owned()),
        ..Options::default()
    };
    let before = opts.clone();
    let tree = build_tree(&mut doc, &Circle, &opts).unwrap();
    let trail = tree.trail.unwrap();

    assert_eq!(doc.attribute(trail, "stroke"), Some("#eee"));
    assert_eq!(doc.attribute(trail, "stroke-width"), Some("0.5"));
    // Trail fill is always transparent, even when the primary path is filled.
    assert_eq!(doc.attribute(trail, "fill-opacity"), Some("0"));
    assert_eq!(doc.attribute(trail, "fill"), None);
    assert_eq!(doc.attribute(tree.path, "fill"), Some("#fafafa"));
    assert_eq!(doc.attribute(tree.path, "stroke-width"), Some("4"));
    assert_eq!(opts, before);
}

#[test]
fn failing_geometry_creates_no_nodes() {
    struct NoTrail;
    impl Geometry for NoTrail {
        fn path_string(&self, _opts: &Options) -> ProgressResult<String> {
            Ok("M 0,0 L 1,1".to_owned())
        }
    }

    let mut doc = Document::new();
    let live = doc.len();
    let opts = Options {
        trail_color: Some("#eee".to_owned()),
        ..Options::default()
    };
    let err = build_tree(&mut doc, &NoTrail, &opts).unwrap_err();
    assert!(matches!(err, ProgressError::UnimplementedGeometry("trail_string")));
    assert_eq!(doc.len(), live);

    // Without a trail the missing hook is never consulted.
    assert!(build_tree(&mut doc, &NoTrail, &Options::default()).is_ok());
}

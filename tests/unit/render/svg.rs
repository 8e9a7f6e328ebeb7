use super::*;

#[test]
fn svg_view_uses_normalized_view_box_and_style() {
    let mut doc = Document::new();
    let svg = create_svg_view(&mut doc, &Options::default()).unwrap();
    assert_eq!(doc.tag(svg), Some("svg"));
    assert_eq!(doc.attribute(svg, "viewBox"), Some("0 0 100 100"));
    assert_eq!(doc.attribute(svg, "xmlns"), Some(SVG_NS));
    assert_eq!(doc.style(svg, "display"), Some("block"));
    assert_eq!(doc.style(svg, "width"), Some("100%"));
    assert_eq!(doc.parent(svg), None);
}

#[test]
fn path_without_fill_is_transparent() {
    let mut doc = Document::new();
    let p = create_path(
        &mut doc,
        &PathStyle {
            d: "M 0,50 L 100,50",
            stroke: "#000",
            stroke_width: 2.0,
            fill: None,
        },
    )
    .unwrap();
    assert_eq!(doc.attribute(p, "d"), Some("M 0,50 L 100,50"));
    assert_eq!(doc.attribute(p, "stroke"), Some("#000"));
    assert_eq!(doc.attribute(p, "stroke-width"), Some("2"));
    assert_eq!(doc.attribute(p, "fill-opacity"), Some("0"));
    assert_eq!(doc.attribute(p, "fill"), None);
}

#[test]
fn path_with_fill_sets_fill() {
    let mut doc = Document::new();
    let p = create_path(
        &mut doc,
        &PathStyle {
            d: "M 0,0",
            stroke: "#000",
            stroke_width: 0.5,
            fill: Some("#abc"),
        },
    )
    .unwrap();
    assert_eq!(doc.attribute(p, "fill"), Some("#abc"));
    assert_eq!(doc.attribute(p, "fill-opacity"), None);
    assert_eq!(doc.attribute(p, "stroke-width"), Some("0.5"));
}

#[test]
fn auto_styled_text_is_centered_and_colored() {
    let mut doc = Document::new();
    let container = doc.create_element("div");
    let opts = Options {
        color: "#123".to_owned(),
        ..Options::default()
    };
    let t = create_text_container(&mut doc, &opts, container).unwrap();
    assert_eq!(doc.attribute(t, "class"), Some("progressbar-text"));
    assert_eq!(doc.style(t, "position"), Some("absolute"));
    assert_eq!(doc.style(t, "transform"), Some("translate(-50%, -50%)"));
    assert_eq!(doc.style(t, "color"), Some("#123"));
    assert_eq!(doc.style(container, "position"), Some("relative"));
}

#[test]
fn unstyled_text_only_gets_class() {
    let mut doc = Document::new();
    let container = doc.create_element("div");
    let mut opts = Options::default();
    opts.text.auto_style = false;
    opts.text.class_name = "label".to_owned();
    let t = create_text_container(&mut doc, &opts, container).unwrap();
    assert_eq!(doc.attribute(t, "class"), Some("label"));
    assert_eq!(doc.style(t, "position"), None);
    assert_eq!(doc.style(container, "position"), None);
}

#[test]
fn released_container_allocates_no_text_node() {
    let mut doc = Document::new();
    let container = doc.create_element("div");
    doc.release(container).unwrap();
    let live = doc.len();

    let err = create_text_container(&mut doc, &Options::default(), container).unwrap_err();
    assert!(matches!(err, ProgressError::ContainerNotFound(_)));
    assert_eq!(doc.len(), live);
}

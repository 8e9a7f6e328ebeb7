use super::*;
use crate::{shape::geometry::Line, surface::document::NodeId};

fn host_with_bar() -> (Host, NodeId) {
    let host = Host::new();
    let bar = {
        let mut doc = host.document_mut();
        let div = doc.create_element("div");
        doc.set_attribute(div, "class", "bar").unwrap();
        let root = doc.root();
        doc.append_child(root, div).unwrap();
        div
    };
    (host, bar)
}

#[test]
fn missing_geometry_is_constructor_misuse() {
    let (host, bar) = host_with_bar();
    let err = ShapeBuilder::new(&host).container(bar).build().unwrap_err();
    assert!(matches!(err, ProgressError::ConstructorMisuse(_)));
    assert!(host.document().children(bar).is_empty());
}

#[test]
fn missing_container_is_constructor_misuse() {
    let (host, _) = host_with_bar();
    let err = ShapeBuilder::new(&host).geometry(Line).build().unwrap_err();
    assert!(matches!(err, ProgressError::ConstructorMisuse(_)));
}

#[test]
fn builds_from_kind_and_runs_default_step() {
    let (host, bar) = host_with_bar();
    let steps = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = std::rc::Rc::clone(&steps);

    let shape = ShapeBuilder::new(&host)
        .container(".bar")
        .kind("semicircle".parse().unwrap())
        .options(OptionsPatch::default().color("#123456"))
        .on_step(move |_, _| counter.set(counter.get() + 1))
        .build()
        .unwrap();

    assert_eq!(host.document().children(bar), &[shape.svg_node().unwrap()]);
    assert_eq!(shape.options().unwrap().color, "#123456");

    shape.set(0.4).unwrap();
    assert_eq!(steps.get(), 1);
    shape.animate_with(1.0, Default::default()).unwrap();
    host.run_until_idle(100.0, 20);
    assert_eq!(steps.get(), 1 + 8);
}

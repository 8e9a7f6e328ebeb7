use super::*;

struct Bare;
impl Geometry for Bare {}

#[test]
fn bare_geometry_hooks_are_unimplemented() {
    let opts = Options::default();
    assert!(matches!(
        Bare.path_string(&opts),
        Err(ProgressError::UnimplementedGeometry("path_string"))
    ));
    assert!(matches!(
        Bare.trail_string(&opts),
        Err(ProgressError::UnimplementedGeometry("trail_string"))
    ));
    assert_eq!(Bare.name(), "shape");
}

#[test]
fn circle_radius_accounts_for_widest_stroke() {
    let opts = Options {
        stroke_width: 2.0,
        trail_width: Some(6.0),
        ..Options::default()
    };
    assert_eq!(
        Circle.path_string(&opts).unwrap(),
        "M 50,50 m 0,-47 a 47,47 0 1 1 0,94 a 47,47 0 1 1 0,-94"
    );
    assert_eq!(
        Circle.trail_string(&opts).unwrap(),
        Circle.path_string(&opts).unwrap()
    );
}

#[test]
fn default_circle_uses_fractional_radius() {
    let d = Circle.path_string(&Options::default()).unwrap();
    assert_eq!(
        d,
        "M 50,50 m 0,-49.5 a 49.5,49.5 0 1 1 0,99 a 49.5,49.5 0 1 1 0,-99"
    );
}

#[test]
fn semicircle_spans_the_diameter() {
    let opts = Options {
        stroke_width: 4.0,
        ..Options::default()
    };
    assert_eq!(
        SemiCircle.path_string(&opts).unwrap(),
        "M 50,50 m -48,0 a 48,48 0 1 1 96,0"
    );
}

#[test]
fn geometry_output_parses_as_path_data() {
    let opts = Options::default();
    for g in [ShapeKind::Circle, ShapeKind::SemiCircle, ShapeKind::Line] {
        let d = g.geometry().path_string(&opts).unwrap();
        assert!(BezPath::from_svg(&d).is_ok(), "{d}");
    }
}

#[test]
fn custom_path_validates_data() {
    assert!(CustomPath::new("M 0,0 L 10,10").is_ok());
    assert!(CustomPath::new("not a path").is_err());
    assert!(CustomPath::new("").is_err());
    let p = CustomPath::new("M 0,0 L 10,10").unwrap();
    assert_eq!(p.trail_string(&Options::default()).unwrap(), "M 0,0 L 10,10");
}

#[test]
fn shape_kind_parses_names() {
    assert_eq!("Circle".parse::<ShapeKind>().unwrap(), ShapeKind::Circle);
    assert_eq!(
        "semi-circle".parse::<ShapeKind>().unwrap(),
        ShapeKind::SemiCircle
    );
    assert_eq!(" line ".parse::<ShapeKind>().unwrap(), ShapeKind::Line);
    assert!("hexagon".parse::<ShapeKind>().is_err());
    assert_eq!(ShapeKind::SemiCircle.geometry().name(), "semicircle");
}

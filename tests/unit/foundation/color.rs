use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(Rgba8::parse("#eee").unwrap(), Rgba8::rgb(0xee, 0xee, 0xee));
    assert_eq!(Rgba8::parse("#FF0000").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(
        Rgba8::parse("#0000ff80").unwrap(),
        Rgba8 {
            r: 0,
            g: 0,
            b: 255,
            a: 128
        }
    );
}

#[test]
fn parses_rgb_functions() {
    assert_eq!(Rgba8::parse("rgb(1, 2, 3)").unwrap(), Rgba8::rgb(1, 2, 3));
    let c = Rgba8::parse("rgba(10,20,30,0.5)").unwrap();
    assert_eq!(c.a, 128);
}

#[test]
fn rejects_garbage() {
    assert!(Rgba8::parse("#12").is_err());
    assert!(Rgba8::parse("#gggggg").is_err());
    assert!(Rgba8::parse("teal").is_err());
    assert!(Rgba8::parse("rgb(1,2)").is_err());
}

#[test]
fn lerp_hits_endpoints_and_midpoint() {
    let a = Rgba8::rgb(0, 0, 0);
    let b = Rgba8::rgb(255, 100, 10);
    assert_eq!(Rgba8::lerp(a, b, 0.0), a);
    assert_eq!(Rgba8::lerp(a, b, 1.0), b);
    assert_eq!(Rgba8::lerp(a, b, 0.5), Rgba8::rgb(128, 50, 5));
}

#[test]
fn css_output() {
    assert_eq!(Rgba8::rgb(255, 0, 16).to_css(), "#ff0010");
    let half = Rgba8 {
        r: 1,
        g: 2,
        b: 3,
        a: 128,
    };
    assert_eq!(half.to_css(), "rgba(1, 2, 3, 0.502)");
}

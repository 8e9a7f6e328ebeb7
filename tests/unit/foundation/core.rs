use super::*;

#[test]
fn clamp_progress_keeps_in_range_values() {
    for v in [0.0, 0.25, 1.0] {
        let c = clamp_progress(v).unwrap();
        assert_eq!(c.value, v);
        assert!(!c.adjusted);
    }
}

#[test]
fn clamp_progress_flags_out_of_range() {
    let hi = clamp_progress(1.5).unwrap();
    assert_eq!(hi.value, 1.0);
    assert!(hi.adjusted);

    let lo = clamp_progress(-0.1).unwrap();
    assert_eq!(lo.value, 0.0);
    assert!(lo.adjusted);
}

#[test]
fn clamp_progress_rejects_non_finite() {
    assert!(clamp_progress(f64::NAN).is_err());
    assert!(clamp_progress(f64::INFINITY).is_err());
}

#[test]
fn numbers_render_without_trailing_zeroes() {
    assert_eq!(fmt_num(1.0), "1");
    assert_eq!(fmt_num(0.5), "0.5");
    assert_eq!(fmt_num(-0.0), "0");
    assert_eq!(fmt_num(49.5), "49.5");
}

use super::*;

#[test]
fn oscillator_stays_within_range() {
    let osc = Oscillator {
        speed: 2.2,
        range: 13.0,
    };
    for f in 0..2000 {
        let v = osc.offset(f as f64);
        assert!((0.0..=13.0).contains(&v));
    }
    assert!((osc.offset(0.0) - 6.5).abs() < 1e-12);
}

#[test]
fn fixed_axis_has_no_offset() {
    assert_eq!(AxisMotion::Fixed.offset(123.0), 0.0);
    let osc = Oscillator {
        speed: 1.0,
        range: 200.0,
    };
    assert_eq!(AxisMotion::Oscillate(osc).offset(10.0), osc.offset(10.0));
}

#[test]
fn bubble_envelope_boundaries() {
    let env = FadeEnvelope::BUBBLE;
    assert_eq!(env.alpha(0.0), 0.0);
    assert!((env.alpha(0.05) - 0.5).abs() < 1e-12);
    assert_eq!(env.alpha(0.1), 1.0);
    assert_eq!(env.alpha(0.4), 1.0);
    assert_eq!(env.alpha(0.7), 1.0);
    assert!((env.alpha(0.85) - 0.5).abs() < 1e-9);
    assert!(env.alpha(1.0).abs() < 1e-12);
    assert_eq!(env.alpha(1.5), 0.0);
}

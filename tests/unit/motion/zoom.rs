use super::*;
use crate::foundation::core::Point;

#[test]
fn scale_starts_at_base() {
    let z = ZoomMotion::default();
    assert_eq!(z.scale(0.0), 1.3);
}

#[test]
fn scale_is_periodic_and_bounded() {
    let z = ZoomMotion::default();
    let cycle = z.cycle_secs();
    for i in 0..200 {
        let t = i as f64 * 0.173;
        let s = z.scale(t);
        assert!((1.0 - 1e-12..=1.6 + 1e-12).contains(&s), "scale {s} at {t}");
        assert!((s - z.scale(t + cycle)).abs() < 1e-9);
    }
    let peak = z.scale(std::f64::consts::FRAC_PI_2 * z.period);
    assert!((peak - 1.6).abs() < 1e-12);
}

#[test]
fn validate_rejects_degenerate_motion() {
    assert!(ZoomMotion::default().validate().is_ok());
    let bad_period = ZoomMotion {
        period: 0.0,
        ..ZoomMotion::default()
    };
    assert!(bad_period.validate().is_err());
    let collapsing = ZoomMotion {
        base: 0.2,
        amplitude: 0.3,
        period: 3.0,
    };
    assert!(collapsing.validate().is_err());
}

#[test]
fn transform_keeps_canvas_center_fixed() {
    let canvas = Canvas::default();
    let z = ZoomMotion::default();
    let aff = z.transform(canvas, 1.7);
    let c = canvas.center();
    let mapped = aff * c;
    assert!((mapped.x - c.x).abs() < 1e-9 && (mapped.y - c.y).abs() < 1e-9);

    let corner = aff * Point::new(0.0, 0.0);
    let s = z.scale(1.7);
    assert!((corner.x - c.x * (1.0 - s)).abs() < 1e-9);
}

#[test]
fn fit_to_canvas_resizes_exactly() {
    let canvas = Canvas {
        width: 8,
        height: 16,
    };
    let img = PreparedImage::solid(3, 5, [10, 20, 30, 255]).unwrap();
    let out = fit_to_canvas(&img, canvas).unwrap();
    assert_eq!((out.width, out.height), (8, 16));
    assert_eq!(out.rgba8_premul.len(), 8 * 16 * 4);
    assert_eq!(&out.rgba8_premul[0..4], &[10, 20, 30, 255]);

    let same = fit_to_canvas(&out, canvas).unwrap();
    assert!(std::sync::Arc::ptr_eq(&same.rgba8_premul, &out.rgba8_premul));
}

use super::*;

#[test]
fn frame_range_rejects_reversed_bounds() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert_eq!(
        FrameRange::new(FrameIndex(4), FrameIndex(4))
            .unwrap()
            .len_frames(),
        0
    );
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn ntsc_frame_times_use_the_rational_rate() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.frame_time_secs(FrameIndex(30)) - 1.001).abs() < 1e-12);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());
    assert_eq!(Fps::default(), Fps::integer(24).unwrap());
}

#[test]
fn frames_covering_stays_within_one_frame() {
    let fps = Fps::integer(24).unwrap();
    for secs in [0.5, 1.0, 9.0, 27.02, 13.37] {
        let frames = fps.frames_covering(secs);
        let covered = fps.frames_to_secs(frames);
        assert!((covered - secs).abs() <= fps.frame_duration_secs());
    }
    assert_eq!(fps.frames_covering(0.5), 12);
    assert_eq!(fps.frames_covering(0.001), 1);
}

#[test]
fn canvas_defaults_to_portrait() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (720, 1280));
    assert_eq!(c.center(), Point::new(360.0, 640.0));
}

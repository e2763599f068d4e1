use super::*;
use crate::style::caption::Anchor;

#[test]
fn empty_object_yields_defaults() {
    let cfg = RenderConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, RenderConfig::default());
    assert_eq!(cfg.canvas, Canvas::PORTRAIT_720);
    assert_eq!(cfg.fps, Fps { num: 24, den: 1 });
    assert_eq!(cfg.motion, ZoomMotion::default());
    assert_eq!(cfg.audio_file, "voice.mp3");
    assert_eq!(cfg.caption.font_size, 40.0);
}

#[test]
fn partial_override_keeps_other_defaults() {
    let json = r##"{
        "fps": {"num": 30, "den": 1},
        "drop_policy": "redistribute",
        "caption": {"font_color": "#ffffff", "positionY": "bottom"},
        "motion": {"amplitude": 0.1}
    }"##;
    let cfg = RenderConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.fps.num, 30);
    assert_eq!(cfg.drop_policy, DropPolicy::Redistribute);
    assert_eq!(cfg.caption.position_y, Anchor::End);
    assert_eq!(cfg.caption.position_x, Anchor::Center);
    assert_eq!(cfg.caption.font_color.to_rgba8(), [255, 255, 255, 255]);
    assert_eq!(cfg.motion.amplitude, 0.1);
    assert_eq!(cfg.motion.base, 1.3);
}

#[test]
fn odd_canvas_is_rejected() {
    let err = RenderConfig::from_reader(r#"{"canvas": {"width": 721, "height": 1280}}"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, ReelError::InvalidInput(_)));
}

#[test]
fn zero_fps_and_bad_motion_are_rejected() {
    let mut cfg = RenderConfig::default();
    cfg.fps = Fps { num: 0, den: 1 };
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.motion.period = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.threads = Some(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_invalid_input() {
    let err = RenderConfig::from_reader("{ nope".as_bytes()).unwrap_err();
    assert!(err.to_string().starts_with("invalid input:"));
}

#[test]
fn missing_file_is_missing_asset() {
    let err = RenderConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ReelError::MissingAsset(_)));
}

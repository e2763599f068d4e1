use super::*;
use serde_json::json;

#[test]
fn defaults_follow_short_form_look() {
    let s = CaptionStyle::default();
    assert_eq!(s.font_size, 40.0);
    assert_eq!(s.font_color, ColorDef::YELLOW);
    assert_eq!(s.stroke_width, 0.0);
    assert_eq!(s.stroke_color, ColorDef::BLACK);
    assert_eq!(s.position_x, Anchor::Center);
    assert_eq!(s.position_y, Anchor::Center);
    s.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults_and_accepts_camel_case_positions() {
    let s: CaptionStyle = serde_json::from_value(json!({
        "font": "fonts/liberation-sans.ttf",
        "font_size": 60,
        "font_color": "white",
        "positionX": "left",
        "positionY": 900
    }))
    .unwrap();
    assert_eq!(s.font, "fonts/liberation-sans.ttf");
    assert_eq!(s.font_size, 60.0);
    assert_eq!(s.font_color.to_rgba8(), [255, 255, 255, 255]);
    assert_eq!(s.position_x, Anchor::Start);
    assert_eq!(s.position_y, Anchor::Px(900.0));
    assert_eq!(s.stroke_color, ColorDef::BLACK);
}

#[test]
fn anchor_resolves_leading_edge() {
    assert_eq!(Anchor::Start.resolve(720.0, 100.0), 0.0);
    assert_eq!(Anchor::Center.resolve(720.0, 100.0), 310.0);
    assert_eq!(Anchor::End.resolve(720.0, 100.0), 620.0);
    assert_eq!(Anchor::Px(42.0).resolve(720.0, 100.0), 42.0);
}

#[test]
fn anchor_rejects_unknown_names() {
    assert!(serde_json::from_value::<Anchor>(json!("diagonal")).is_err());
    assert_eq!(
        serde_json::from_value::<Anchor>(json!("Bottom")).unwrap(),
        Anchor::End
    );
}

#[test]
fn validate_rejects_bad_sizes() {
    let s = CaptionStyle {
        font_size: 0.0,
        ..CaptionStyle::default()
    };
    assert!(s.validate().is_err());

    let s = CaptionStyle {
        stroke_width: -1.0,
        ..CaptionStyle::default()
    };
    assert!(s.validate().is_err());

    let s = CaptionStyle {
        max_width_ratio: 1.5,
        ..CaptionStyle::default()
    };
    assert!(s.validate().is_err());

    let s = CaptionStyle {
        font: "  ".to_owned(),
        ..CaptionStyle::default()
    };
    assert!(s.validate().is_err());
}

#[test]
fn font_accepts_family_names() {
    let s: CaptionStyle = serde_json::from_value(json!({"font": "liberation-sans"})).unwrap();
    assert_eq!(s.font, "liberation-sans");
    s.validate().unwrap();
}

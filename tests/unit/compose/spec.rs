use std::path::PathBuf;
use std::sync::Arc;

use super::*;
use crate::assets::discover::ImageAsset;
use crate::caption::overlay::build_overlays;
use crate::style::caption::CaptionStyle;
use crate::timeline::allocator::allocate;
use crate::transcript::words::TimedWord;

fn spec(duration: f64, fps: u32) -> RenderSpec {
    let images = (0..3)
        .map(|index| ImageAsset {
            index,
            path: PathBuf::from(format!("{index}.png")),
        })
        .collect::<Vec<_>>();
    RenderSpec {
        segments: allocate(&images, duration).unwrap(),
        overlays: build_overlays(
            &[TimedWord::new("Hi", 0.0, 0.5)],
            Arc::new(CaptionStyle::default()),
        ),
        audio: AudioTrack::new("voice.mp3", duration).unwrap(),
        canvas: Canvas::default(),
        fps: Fps::integer(fps).unwrap(),
    }
}

#[test]
fn frame_count_rounds_audio_duration() {
    assert_eq!(spec(9.0, 24).frame_count(), 216);
    assert_eq!(spec(1.03, 24).frame_count(), 25);
    assert_eq!(spec(0.01, 24).frame_count(), 1);
}

#[test]
fn output_duration_within_one_frame_of_audio() {
    for d in [0.5, 1.01, 7.3, 27.02, 61.77] {
        let s = spec(d, 24);
        let out = s.fps.frames_to_secs(s.frame_count());
        assert!((out - d).abs() <= 1.0 / 24.0, "d={d} out={out}");
    }
}

#[test]
fn frame_times_step_by_frame_interval() {
    let s = spec(9.0, 24);
    assert_eq!(s.frame_time(FrameIndex(0)), 0.0);
    assert!((s.frame_time(FrameIndex(48)) - 2.0).abs() < 1e-12);
    assert_eq!(s.frame_range().len_frames(), 216);
    assert!((s.visual_duration_secs() - 9.0).abs() < 1e-9);
}

#[test]
fn serializes_for_plan_output() {
    let v = serde_json::to_value(spec(9.0, 24)).unwrap();
    assert_eq!(v["segments"].as_array().unwrap().len(), 3);
    assert_eq!(v["overlays"][0]["text"], "Hi");
    assert_eq!(v["fps"]["num"], 24);
}

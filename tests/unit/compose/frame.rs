use std::path::PathBuf;

use super::*;
use crate::assets::decode::PreparedImage;
use crate::assets::discover::ImageAsset;
use crate::assets::media::AudioTrack;
use crate::foundation::core::{Canvas, Fps};
use crate::timeline::segment::TimelineSegment;

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn close(px: Option<[u8; 4]>, expected: [u8; 4]) -> bool {
    px.is_some_and(|p| p.iter().zip(expected).all(|(a, b)| a.abs_diff(b) <= 2))
}

fn canvas() -> Canvas {
    Canvas {
        width: 40,
        height: 80,
    }
}

fn segment(index: usize, start: f64, duration: f64) -> TimelineSegment {
    TimelineSegment {
        image: ImageAsset {
            index,
            path: PathBuf::from(format!("images/{index}.png")),
        },
        start,
        end: start + duration,
    }
}

fn banded(left: [u8; 4], rest: [u8; 4], band: u32) -> PreparedImage {
    let c = canvas();
    let mut bytes = Vec::with_capacity((c.width * c.height * 4) as usize);
    for _y in 0..c.height {
        for x in 0..c.width {
            bytes.extend_from_slice(if x < band { &left } else { &rest });
        }
    }
    PreparedImage::from_premul(c.width, c.height, bytes).unwrap()
}

fn scene(clips: Vec<MotionClip>, audio_secs: f64) -> Scene {
    let spec = RenderSpec {
        segments: clips.iter().map(|c| c.segment.clone()).collect(),
        overlays: Vec::new(),
        audio: AudioTrack::new("voice.mp3", audio_secs).unwrap(),
        canvas: canvas(),
        fps: Fps::integer(24).unwrap(),
    };
    Scene::new(
        spec,
        &clips,
        CaptionSet::default(),
        ZoomMotion::default(),
        ColorDef::BLACK,
    )
    .unwrap()
}

fn two_clip_scene() -> Scene {
    scene(
        vec![
            MotionClip {
                segment: segment(0, 0.0, 1.0),
                image: PreparedImage::solid(40, 80, RED).unwrap(),
            },
            MotionClip {
                segment: segment(1, 1.0, 1.0),
                image: PreparedImage::solid(40, 80, GREEN).unwrap(),
            },
        ],
        3.0,
    )
}

#[test]
fn active_segment_fills_the_frame() {
    let s = two_clip_scene();
    let mut comp = FrameCompositor::new();

    let f0 = comp.render_frame(&s, FrameIndex(0)).unwrap();
    assert_eq!((f0.width, f0.height), (40, 80));
    assert!(close(f0.pixel(20, 40), RED));
    assert!(close(f0.pixel(0, 0), RED));

    let f24 = comp.render_frame(&s, FrameIndex(24)).unwrap();
    assert!(close(f24.pixel(20, 40), GREEN));
}

#[test]
fn tail_after_visual_track_shows_background() {
    let s = two_clip_scene();
    let mut comp = FrameCompositor::new();
    let tail = comp.render_at(&s, 2.5).unwrap();
    assert_eq!(tail.pixel(20, 40), Some([0, 0, 0, 255]));
    assert_eq!(tail.pixel(39, 79), Some([0, 0, 0, 255]));
}

#[test]
fn zoom_crops_the_image_edges() {
    // A 4px blue band on the left edge is pushed out of frame at scale >= 1.3.
    let s = scene(
        vec![MotionClip {
            segment: segment(0, 0.0, 2.0),
            image: banded(BLUE, RED, 4),
        }],
        2.0,
    );
    let mut comp = FrameCompositor::new();
    let f = comp.render_at(&s, 0.0).unwrap();
    assert!(close(f.pixel(0, 40), RED));
    assert!(close(f.pixel(20, 40), RED));
}

#[test]
fn rendering_is_deterministic_across_compositors() {
    let s = two_clip_scene();
    let a = FrameCompositor::new()
        .render_frame(&s, FrameIndex(7))
        .unwrap();
    let mut reused = FrameCompositor::new();
    let _ = reused.render_frame(&s, FrameIndex(30)).unwrap();
    let b = reused.render_frame(&s, FrameIndex(7)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn misaligned_scene_is_rejected() {
    let clips = vec![MotionClip {
        segment: segment(0, 0.0, 1.0),
        image: PreparedImage::solid(40, 80, RED).unwrap(),
    }];
    let spec = RenderSpec {
        segments: vec![segment(0, 0.0, 0.5), segment(1, 0.5, 0.5)],
        overlays: Vec::new(),
        audio: AudioTrack::new("voice.mp3", 1.0).unwrap(),
        canvas: canvas(),
        fps: Fps::default(),
    };
    let err = Scene::new(
        spec,
        &clips,
        CaptionSet::default(),
        ZoomMotion::default(),
        ColorDef::BLACK,
    )
    .err()
    .unwrap();
    assert!(matches!(err, ReelError::InvalidInput(_)));
}

#[test]
fn save_png_writes_straight_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 255, 255],
    };
    frame.save_png(&path).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(back.get_pixel(1, 0).0, [0, 0, 255, 255]);
    assert_eq!(frame.pixel(2, 0), None);
}

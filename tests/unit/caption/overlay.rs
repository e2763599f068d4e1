use super::*;

fn words() -> Vec<TimedWord> {
    vec![
        TimedWord::new(" Hello", 0.0, 0.4),
        TimedWord::new(" world", 0.4, 0.9),
        TimedWord::new(" again", 0.85, 1.2),
    ]
}

#[test]
fn one_overlay_per_word_in_order() {
    let style = Arc::new(CaptionStyle::default());
    let overlays = build_overlays(&words(), style.clone());
    assert_eq!(overlays.len(), 3);
    assert_eq!(overlays[0].text, " Hello");
    assert_eq!(overlays[1].start, 0.4);
    assert_eq!(overlays[2].end, 1.2);
    assert!(overlays.iter().all(|o| Arc::ptr_eq(&o.style, &style)));
}

#[test]
fn visibility_is_half_open() {
    let overlays = build_overlays(&words(), Arc::new(CaptionStyle::default()));
    let first = &overlays[0];
    assert!(first.is_visible(0.0));
    assert!(first.is_visible(0.399));
    assert!(!first.is_visible(0.4));
    assert!(!first.is_visible(-0.01));
    assert!((first.duration() - 0.4).abs() < 1e-12);
}

#[test]
fn adjacent_words_never_overlap_at_boundary() {
    let overlays = build_overlays(&words(), Arc::new(CaptionStyle::default()));
    assert_eq!(visible_at(&overlays, 0.4).collect::<Vec<_>>(), vec![1]);
    assert_eq!(visible_at(&overlays, 0.87).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(visible_at(&overlays, 1.2).count(), 0);
}

#[test]
fn zero_length_word_is_never_visible() {
    let overlays = build_overlays(
        &[TimedWord::new("blink", 1.0, 1.0)],
        Arc::new(CaptionStyle::default()),
    );
    assert!(!overlays[0].is_visible(1.0));
}

#[test]
fn empty_transcript_yields_no_overlays() {
    assert!(build_overlays(&[], Arc::new(CaptionStyle::default())).is_empty());
}

use crate::assets::discover::ImageAsset;
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::segment::TimelineSegment;

/// What happens to the visual timeline when images are dropped after allocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPolicy {
    /// Survivors keep the original uniform duration and play back-to-back; the visual track ends
    /// early and the tail shows the background.
    #[default]
    ShortenVisual,
    /// Re-split the audio duration uniformly across the survivors.
    Redistribute,
}

/// Split `audio_duration` uniformly across `images`, in order.
///
/// Segment `i` covers `[i * D / N, (i + 1) * D / N)`; the last segment ends exactly at `D`.
/// Fails with [`ReelError::InvalidInput`] when there are no images or the duration is not a finite
/// positive number.
#[tracing::instrument(skip(images), fields(images = images.len()))]
pub fn allocate(images: &[ImageAsset], audio_duration: f64) -> ReelResult<Vec<TimelineSegment>> {
    if images.is_empty() {
        return Err(ReelError::invalid_input(
            "cannot allocate a timeline without images",
        ));
    }
    if !audio_duration.is_finite() || audio_duration <= 0.0 {
        return Err(ReelError::invalid_input(format!(
            "audio duration must be finite and > 0, got {audio_duration}"
        )));
    }

    let n = images.len();
    let boundary = |i: usize| {
        if i == n {
            audio_duration
        } else {
            (i as f64) * audio_duration / (n as f64)
        }
    };
    let segments = images
        .iter()
        .enumerate()
        .map(|(i, image)| TimelineSegment {
            image: image.clone(),
            start: boundary(i),
            end: boundary(i + 1),
        })
        .collect::<Vec<_>>();
    tracing::debug!(
        segment_secs = audio_duration / n as f64,
        "allocated uniform timeline"
    );
    Ok(segments)
}

/// Rebuild the timeline after some segments were dropped.
///
/// `survivors` keep their relative order. Returns an empty timeline when nothing survived.
pub fn reflow(
    survivors: &[TimelineSegment],
    audio_duration: f64,
    policy: DropPolicy,
) -> ReelResult<Vec<TimelineSegment>> {
    if survivors.is_empty() {
        return Ok(Vec::new());
    }
    match policy {
        DropPolicy::ShortenVisual => {
            let mut cursor = 0.0;
            Ok(survivors
                .iter()
                .map(|s| {
                    let start = cursor;
                    cursor += s.duration();
                    TimelineSegment {
                        image: s.image.clone(),
                        start,
                        end: cursor,
                    }
                })
                .collect())
        }
        DropPolicy::Redistribute => {
            let images = survivors.iter().map(|s| s.image.clone()).collect::<Vec<_>>();
            allocate(&images, audio_duration)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/allocator.rs"]
mod tests;

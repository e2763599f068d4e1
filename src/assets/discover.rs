use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ReelError, ReelResult};

/// Sub-directory of a media directory that holds the still images.
pub const IMAGES_DIR: &str = "images";
/// Default voice-track file name inside a media directory.
pub const DEFAULT_AUDIO_FILE: &str = "voice.mp3";

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// One still image in display order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ImageAsset {
    /// 0-based, contiguous display index.
    pub index: usize,
    /// Source file path.
    pub path: PathBuf,
}

/// Assets discovered in a media directory.
#[derive(Clone, Debug)]
pub struct MediaBundle {
    /// Media directory root.
    pub root: PathBuf,
    /// Voice-track path.
    pub audio_path: PathBuf,
    /// Images in display order (may be empty; the allocator rejects that).
    pub images: Vec<ImageAsset>,
}

impl MediaBundle {
    /// Discover `<root>/images/*` and `<root>/<audio_file>`.
    ///
    /// Images are ordered by natural filename sort (`2.png` before `10.png`). A missing audio file
    /// or images directory is a [`ReelError::MissingAsset`]; an empty images directory is not an
    /// error at this stage.
    #[tracing::instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn discover(root: impl AsRef<Path>, audio_file: &str) -> ReelResult<Self> {
        let root = root.as_ref();
        let audio_path = root.join(audio_file);
        if !audio_path.is_file() {
            return Err(ReelError::missing_asset(format!(
                "audio file '{}' does not exist",
                audio_path.display()
            )));
        }

        let image_dir = root.join(IMAGES_DIR);
        let entries = std::fs::read_dir(&image_dir).map_err(|e| {
            ReelError::missing_asset(format!(
                "read images directory '{}': {e}",
                image_dir.display()
            ))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                ReelError::missing_asset(format!(
                    "list images directory '{}': {e}",
                    image_dir.display()
                ))
            })?;
            let path = entry.path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        sort_natural(&mut paths);

        let images = paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| ImageAsset { index, path })
            .collect::<Vec<_>>();
        tracing::debug!(images = images.len(), "discovered media directory");

        Ok(Self {
            root: root.to_path_buf(),
            audio_path,
            images,
        })
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Sort paths by file name using [`natural_cmp`].
pub fn sort_natural(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| {
        let an = a.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let bn = b.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        natural_cmp(&an, &bn)
    });
}

/// Compare strings treating runs of ASCII digits as numbers.
///
/// Equal numeric values with different zero padding fall back to plain string order so the sort
/// stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.char_indices().peekable();
    let mut bi = b.char_indices().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some((sa, ca)), Some((sb, cb))) => {
                if ca.is_ascii_digit() && cb.is_ascii_digit() {
                    let ea = digit_run_end(a, sa);
                    let eb = digit_run_end(b, sb);
                    let na = a[sa..ea].trim_start_matches('0');
                    let nb = b[sb..eb].trim_start_matches('0');
                    let ord = na.len().cmp(&nb.len()).then_with(|| na.cmp(nb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    while ai.peek().is_some_and(|&(i, _)| i < ea) {
                        ai.next();
                    }
                    while bi.peek().is_some_and(|&(i, _)| i < eb) {
                        bi.next();
                    }
                } else {
                    let ord = ca.cmp(&cb);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    ai.next();
                    bi.next();
                }
            }
        }
    }
}

fn digit_run_end(s: &str, start: usize) -> usize {
    s[start..]
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| start + i)
        .unwrap_or(s.len())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/discover.rs"]
mod tests;

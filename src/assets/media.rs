use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{ReelError, ReelResult};

/// A single audio resource with a known duration. Read-only to the pipeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AudioTrack {
    /// Source path, muxed into the output as-is.
    pub path: PathBuf,
    /// Total duration in seconds.
    pub duration_secs: f64,
}

impl AudioTrack {
    /// Create an audio track, rejecting undefined or non-positive durations.
    pub fn new(path: impl Into<PathBuf>, duration_secs: f64) -> ReelResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ReelError::invalid_input(format!(
                "audio duration must be finite and > 0, got {duration_secs}"
            )));
        }
        Ok(Self {
            path: path.into(),
            duration_secs,
        })
    }
}

/// Probe the container duration of an audio file through `ffprobe`.
///
/// Returns `Ok(None)` when `ffprobe` reads the file but reports no duration.
pub fn media_duration_secs(path: &Path) -> ReelResult<Option<f64>> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: Option<ProbeFormat>,
    }

    if !path.is_file() {
        return Err(ReelError::missing_asset(format!(
            "audio file '{}' does not exist",
            path.display()
        )));
    }

    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_entries",
            "format=duration",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            ReelError::missing_asset(format!(
                "failed to run ffprobe (is it installed and on PATH?): {e}"
            ))
        })?;
    if !out.status.success() {
        return Err(ReelError::missing_asset(format!(
            "ffprobe could not read '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| ReelError::missing_asset(format!("ffprobe json parse failed: {e}")))?;
    Ok(parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.trim().parse::<f64>().ok()))
}

/// Return `true` when `ffprobe` can be invoked from `PATH`.
pub fn is_ffprobe_on_path() -> bool {
    Command::new("ffprobe")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;

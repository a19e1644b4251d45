//! Capabilities backed by external binaries: duration probing and stream-copy
//! concatenation.

use crate::error::MergeError;
use crate::srt::secs_to_duration;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;

pub trait MediaTools {
    /// Playback duration of a single media file.
    fn probe_duration(&self, video: &Path) -> Result<Duration>;

    /// Joins `parts` in the given order into `output` without re-encoding.
    fn concatenate(&self, parts: &[PathBuf], output: &Path) -> Result<()>;
}

pub struct Ffmpeg {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

impl MediaTools for Ffmpeg {
    fn probe_duration(&self, video: &Path) -> Result<Duration> {
        let mut cmd = Command::new(&self.ffprobe);
        cmd.args(&[
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(video);
        debug!("Executing: {}", command_line(&cmd));

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute {}", self.ffprobe.display()))?;
        if !output.status.success() {
            return Err(MergeError::ToolFailed {
                tool: self.ffprobe.display().to_string(),
                status: output.status,
            })
            .with_context(|| format!("Failed to probe '{}'", video.display()));
        }

        parse_probe_output(&String::from_utf8_lossy(&output.stdout))
            .with_context(|| format!("Failed to probe '{}'", video.display()))
    }

    fn concatenate(&self, parts: &[PathBuf], output: &Path) -> Result<()> {
        let mut manifest = tempfile::Builder::new()
            .prefix("concat_list")
            .suffix(".txt")
            .tempfile()
            .context("Failed to create concat list")?;
        for part in parts {
            // ffmpeg resolves relative entries against the list's own directory.
            let part = std::fs::canonicalize(part)
                .with_context(|| format!("Failed to resolve '{}'", part.display()))?;
            writeln!(manifest, "{}", manifest_entry(&part))
                .context("Failed to write concat list")?;
        }
        manifest.flush().context("Failed to write concat list")?;

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(&["-f", "concat", "-safe", "0", "-i"])
            .arg(manifest.path())
            .args(&["-c", "copy"])
            .arg(output)
            .arg("-y");
        debug!("Executing: {}", command_line(&cmd));

        let status = cmd
            .status()
            .with_context(|| format!("Failed to execute {}", self.ffmpeg.display()))?;
        if !status.success() {
            return Err(MergeError::ToolFailed {
                tool: self.ffmpeg.display().to_string(),
                status,
            }
            .into());
        }
        Ok(())
    }
}

fn parse_probe_output(stdout: &str) -> Result<Duration> {
    let text = stdout.trim();
    match text.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs_to_duration(secs)),
        _ => Err(MergeError::InvalidProbeOutput(text.to_string()).into()),
    }
}

/// One line of an ffmpeg concat demuxer script. Single quotes cannot appear
/// inside a quoted string, so they are closed, escaped and reopened.
fn manifest_entry(path: &Path) -> String {
    format!(
        "file '{}'",
        path.to_string_lossy().replace('\'', r"'\''")
    )
}

fn command_line(cmd: &Command) -> String {
    format!(
        "{} {}",
        cmd.get_program().to_string_lossy(),
        cmd.get_args()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    )
}

#[cfg(test)]
pub(crate) mod fake {
    use super::MediaTools;

    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use anyhow::{anyhow, Result};

    /// Reports durations by file name and records every call.
    #[derive(Default)]
    pub struct FakeTools {
        durations: HashMap<String, f64>,
        pub probed: RefCell<Vec<PathBuf>>,
        pub concatenated: RefCell<Vec<(Vec<PathBuf>, PathBuf)>>,
    }

    impl FakeTools {
        pub fn with_durations(durations: &[(&str, f64)]) -> Self {
            Self {
                durations: durations
                    .iter()
                    .map(|(name, secs)| (name.to_string(), *secs))
                    .collect(),
                ..Self::default()
            }
        }
    }

    impl MediaTools for FakeTools {
        fn probe_duration(&self, video: &Path) -> Result<Duration> {
            self.probed.borrow_mut().push(video.to_path_buf());
            let name = video
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.durations
                .get(&name)
                .map(|secs| Duration::from_secs_f64(*secs))
                .ok_or_else(|| anyhow!("no duration for {}", name))
        }

        fn concatenate(&self, parts: &[PathBuf], output: &Path) -> Result<()> {
            self.concatenated
                .borrow_mut()
                .push((parts.to_vec(), output.to_path_buf()));
            std::fs::write(output, b"")?;
            Ok(())
        }
    }
}

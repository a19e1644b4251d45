use std::error::Error;
use std::fmt;
use std::process::ExitStatus;

#[derive(Debug)]
pub enum MergeError {
    NoVideoParts(String),
    PartCountMismatch { videos: usize, subtitles: usize },
    ToolFailed { tool: String, status: ExitStatus },
    InvalidProbeOutput(String),
}

impl Error for MergeError {}

impl fmt::Display for MergeError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MergeError::NoVideoParts(identifier) => {
                write!(fmt, "No video parts found for {}", identifier)
            }
            MergeError::PartCountMismatch { videos, subtitles } => write!(
                fmt,
                "Found {} video part(s) but {} subtitle part(s)",
                videos, subtitles
            ),
            MergeError::ToolFailed { tool, status } => {
                write!(fmt, "{} failed with {}", tool, status)
            }
            MergeError::InvalidProbeOutput(output) => {
                write!(fmt, "Unexpected duration reported by ffprobe: '{}'", output)
            }
        }
    }
}

use crate::error::MergeError;
use crate::media::MediaTools;
use crate::parser::Parser;
use crate::serialiser::format_seconds;
use crate::srt::Subtitle;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub video: PathBuf,
    pub subtitle: Option<PathBuf>,
}

/// Pairs the i-th video part with the i-th subtitle part. Having no subtitles
/// at all is fine; any other difference in counts is rejected.
pub fn pair_segments(videos: Vec<PathBuf>, subtitles: Vec<PathBuf>) -> Result<Vec<Segment>> {
    if subtitles.is_empty() {
        return Ok(videos
            .into_iter()
            .map(|video| Segment {
                video,
                subtitle: None,
            })
            .collect());
    }
    if subtitles.len() != videos.len() {
        return Err(MergeError::PartCountMismatch {
            videos: videos.len(),
            subtitles: subtitles.len(),
        }
        .into());
    }
    Ok(videos
        .into_iter()
        .zip(subtitles)
        .map(|(video, subtitle)| Segment {
            video,
            subtitle: Some(subtitle),
        })
        .collect())
}

/// Concatenates the subtitles of all segments, shifting each segment by the
/// total duration of the segments before it, and renumbers the result.
pub fn merge_subtitles(segments: &[Segment], tools: &dyn MediaTools) -> Result<Vec<Subtitle>> {
    let parser = Parser::new();
    let mut merged = Vec::new();
    let mut offset = Duration::ZERO;

    for (i, segment) in segments.iter().enumerate() {
        if let Some(path) = &segment.subtitle {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open subtitle file: '{}'", path.display()))?;
            let mut subs = parser.parse(&data);
            if offset > Duration::ZERO {
                debug!(
                    "Offsetting '{}' by {}",
                    path.display(),
                    format_seconds(offset.as_secs_f64())
                );
                for sub in subs.iter_mut() {
                    sub.shift(offset);
                }
            }
            merged.extend(subs);
        }

        if i + 1 < segments.len() {
            offset += tools.probe_duration(&segment.video)?;
        }
    }

    Ok(generate_seqnum(merged))
}

fn generate_seqnum(subs: Vec<Subtitle>) -> Vec<Subtitle> {
    let mut seqnum = 0;
    subs.into_iter()
        .map(|mut s| {
            seqnum += 1;
            s.sequence_number = seqnum;
            s
        })
        .collect()
}

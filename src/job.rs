use crate::discovery::find_parts;
use crate::error::MergeError;
use crate::media::MediaTools;
use crate::merger::{merge_subtitles, pair_segments};
use crate::serialiser;

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

pub struct MergeConfig {
    pub identifier: String,
    pub directory: PathBuf,
}

impl MergeConfig {
    pub fn video_output(&self) -> PathBuf {
        self.directory.join(format!("{}.mp4", self.identifier))
    }

    pub fn subtitle_output(&self) -> PathBuf {
        self.directory.join(format!("{}.srt", self.identifier))
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub video: PathBuf,
    pub subtitles: Option<PathBuf>,
}

pub fn run(config: &MergeConfig, tools: &dyn MediaTools) -> Result<Outcome> {
    let videos = find_parts(&config.directory, &config.identifier, "mp4")?;
    if videos.is_empty() {
        return Err(MergeError::NoVideoParts(config.identifier.clone()).into());
    }
    let subtitles = find_parts(&config.directory, &config.identifier, "srt")?;

    info!("Found {} video part(s):", videos.len());
    for video in &videos {
        info!("  - {}", video.display());
    }
    let has_subtitles = !subtitles.is_empty();
    if has_subtitles {
        info!("Found {} subtitle part(s):", subtitles.len());
        for subtitle in &subtitles {
            info!("  - {}", subtitle.display());
        }
    }
    let segments = pair_segments(videos, subtitles)?;

    let video_output = config.video_output();
    info!("Concatenating videos to {}...", video_output.display());
    let parts: Vec<PathBuf> = segments.iter().map(|s| s.video.clone()).collect();
    tools
        .concatenate(&parts, &video_output)
        .with_context(|| format!("Failed to create '{}'", video_output.display()))?;
    info!("✓ Created {}", video_output.display());

    let subtitle_output = if has_subtitles {
        let output = config.subtitle_output();
        info!("Concatenating subtitles to {}...", output.display());
        let subs = merge_subtitles(&segments, tools)?;
        serialiser::serialise(&subs, &output)?;
        info!("✓ Created {}", output.display());
        Some(output)
    } else {
        info!("No subtitle files found, skipping subtitle concatenation.");
        None
    };

    info!("✓ Done!");
    Ok(Outcome {
        video: video_output,
        subtitles: subtitle_output,
    })
}

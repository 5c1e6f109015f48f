// SPDX-License-Identifier: MIT OR Apache-2.0
//! Beatmap data consumed by the timeline tracks.

use crate::clock::{MediaClock, TrackClock};
use crate::control_point::ControlPointInfo;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A break period of a beatmap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakPeriod {
    /// Start time in milliseconds
    pub start_time: f64,
    /// End time in milliseconds, expected to be >= `start_time`
    pub end_time: f64,
}

impl BreakPeriod {
    /// Create a break period
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self { start_time, end_time }
    }
}

/// Descriptive metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeatmapMetadata {
    /// Song title
    pub title: String,
    /// Song artist
    pub artist: String,
    /// Difficulty name
    pub version: String,
}

/// Editable beatmap content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Beatmap {
    /// Descriptive metadata
    pub metadata: BeatmapMetadata,
    /// Control points in declared order
    pub control_points: ControlPointInfo,
    /// Break periods in declared order
    pub breaks: Vec<BreakPeriod>,
    /// Bookmark times in milliseconds
    pub bookmarks: Vec<i32>,
}

impl Beatmap {
    /// Parse a beatmap from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Load a beatmap file
    pub fn load(path: &Path) -> Result<Self> {
        let beatmap: Self = crate::error::read_ron(path)?;
        tracing::info!(
            "Loaded beatmap {:?}: {} control points, {} breaks, {} bookmarks",
            path,
            beatmap.control_points.len(),
            beatmap.breaks.len(),
            beatmap.bookmarks.len()
        );
        Ok(beatmap)
    }

    /// Display name, "Artist - Title [Version]"
    pub fn display_name(&self) -> String {
        let m = &self.metadata;
        format!("{} - {} [{}]", m.artist, m.title, m.version)
    }
}

/// A beatmap paired with the clock of its audio track
pub struct WorkingBeatmap {
    /// Beatmap content
    pub beatmap: Beatmap,
    /// Playback clock, shared with the host
    pub clock: Arc<dyn MediaClock>,
}

impl WorkingBeatmap {
    /// Pair a beatmap with a clock
    pub fn new(beatmap: Beatmap, clock: Arc<dyn MediaClock>) -> Self {
        Self { beatmap, clock }
    }

    /// An empty beatmap with a zero-length clock
    pub fn dummy() -> Self {
        Self::new(Beatmap::default(), Arc::new(TrackClock::new(0.0)))
    }
}

impl std::fmt::Debug for WorkingBeatmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingBeatmap")
            .field("beatmap", &self.beatmap.display_name())
            .field("length", &self.clock.length())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_point::ControlPoint;

    #[test]
    fn test_parse_partial_ron() {
        let beatmap = Beatmap::from_ron("(bookmarks: [100, 500], breaks: [(start_time: 10.0, end_time: 20.0)])").unwrap();
        assert_eq!(beatmap.bookmarks, vec![100, 500]);
        assert_eq!(beatmap.breaks, vec![BreakPeriod::new(10.0, 20.0)]);
        assert!(beatmap.control_points.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("beatline_beatmap_{}.ron", std::process::id()));
        std::fs::write(
            &path,
            "(metadata: (title: \"Test\", artist: \"Someone\", version: \"Easy\"), \
             control_points: [(time: 0.0, value: Timing(beat_length: 500.0, meter: 4))], \
             bookmarks: [250])",
        )
        .unwrap();

        let beatmap = Beatmap::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(beatmap.display_name(), "Someone - Test [Easy]");
        assert_eq!(beatmap.control_points.points(), &[ControlPoint::timing(0.0, 500.0, 4)]);
        assert_eq!(beatmap.bookmarks, vec![250]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("beatline_no_such_beatmap.ron");
        assert!(matches!(Beatmap::load(&path), Err(crate::error::TimelineError::Io { .. })));
    }

    #[test]
    fn test_invalid_ron_is_error() {
        assert!(Beatmap::from_ron("(bookmarks: [oops])").is_err());
    }

    #[test]
    fn test_dummy_has_zero_length() {
        assert_eq!(WorkingBeatmap::dummy().clock.length(), 0.0);
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track definitions for the timeline.
//!
//! A track is one lane of markers. It keeps its own [`TimeScale`], rebuilt
//! together with its markers on every beatmap change, so the markers are
//! never laid out against the previous beatmap's length.

use crate::beatmap::WorkingBeatmap;
use crate::binding::BeatmapObserver;
use crate::control_point::{ControlPoint, ControlPointInfo};
use crate::marker::{IntervalMarker, Marker, MarkerKind, PointMarker};
use crate::scale::TimeScale;
use crate::style::{colour, TimelineColours, TimelineStyle};
use egui::{Color32, Rect};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Type of track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    /// Timing and non-timing control points
    ControlPoints,
    /// Bookmarks
    Bookmarks,
    /// Break periods
    Breaks,
}

impl TrackKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::ControlPoints => "Control Points",
            Self::Bookmarks => "Bookmarks",
            Self::Breaks => "Breaks",
        }
    }
}

/// Marker storage and coordinate space of one lane
#[derive(Debug, Clone)]
pub struct Track {
    /// Track kind
    pub kind: TrackKind,
    scale: TimeScale,
    markers: Vec<Marker>,
}

impl Track {
    /// Create an empty track
    pub fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            scale: TimeScale::default(),
            markers: Vec::new(),
        }
    }

    /// Drop all markers and adopt the scale for a new asset length
    pub fn reset(&mut self, length: f64) {
        self.markers.clear();
        self.scale = TimeScale::from_length(length);
    }

    /// Append a marker
    pub fn add(&mut self, marker: impl Into<Marker>) {
        self.markers.push(marker.into());
    }

    /// Markers in insertion order
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers of one kind, in insertion order
    pub fn markers_of(&self, kind: MarkerKind) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.kind() == kind)
    }

    /// Get marker count
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Coordinate space of this track
    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }

    /// Paint every marker into the lane
    pub fn paint(&self, painter: &egui::Painter, lane: Rect, style: &TimelineStyle) {
        for marker in &self.markers {
            marker.paint(painter, &self.scale, lane, style);
        }
    }
}

/// A track that populates itself from a beatmap
pub trait TimelineTrack {
    /// Shared track state
    fn track(&self) -> &Track;

    /// Shared track state, mutably
    fn track_mut(&mut self) -> &mut Track;

    /// Add the markers for a beatmap to the (already cleared) track
    fn load_beatmap(&mut self, beatmap: &WorkingBeatmap);

    /// Clear, rescale and repopulate
    fn reload(&mut self, beatmap: &WorkingBeatmap) {
        self.track_mut().reset(beatmap.clock.length());
        self.load_beatmap(beatmap);

        let track = self.track();
        tracing::debug!(
            "Reloaded {} track: {} markers over {:.0}ms",
            track.kind.name(),
            track.marker_count(),
            track.scale().duration()
        );
    }
}

impl<T: TimelineTrack + ?Sized> BeatmapObserver for T {
    fn beatmap_changed(&mut self, beatmap: &WorkingBeatmap) {
        self.reload(beatmap);
    }
}

/// Splits control points into the ones worth drawing.
///
/// Returns every timing point in declared order, then the distinct
/// non-timing points that do not land exactly on a timing point. Non-timing
/// points are grouped sound, effect, difficulty and ordered by time within a
/// group; among equal points the first declared one is kept.
pub fn visible_control_points(info: &ControlPointInfo) -> (Vec<&ControlPoint>, Vec<&ControlPoint>) {
    let timing: Vec<&ControlPoint> = info.timing_points().collect();

    let mut grouped: Vec<&ControlPoint> = info.non_timing_points().collect();
    grouped.sort_by(|a, b| a.kind().cmp(&b.kind()).then(a.time.total_cmp(&b.time)));

    let distinct: IndexSet<&ControlPoint> = grouped.into_iter().collect();
    let non_timing = distinct
        .into_iter()
        .filter(|point| {
            info.timing_point_at(point.time)
                .map_or(true, |timing| timing.time != point.time)
        })
        .collect();

    (timing, non_timing)
}

/// Timing and non-timing control point markers
#[derive(Debug, Clone)]
pub struct ControlPointTrack {
    base: Track,
    timing_colour: Color32,
    non_timing_colour: Color32,
}

impl ControlPointTrack {
    /// Create an empty track
    pub fn new(colours: &TimelineColours) -> Self {
        Self {
            base: Track::new(TrackKind::ControlPoints),
            timing_colour: colour(colours.timing_point),
            non_timing_colour: colour(colours.non_timing_point),
        }
    }
}

impl TimelineTrack for ControlPointTrack {
    fn track(&self) -> &Track {
        &self.base
    }

    fn track_mut(&mut self) -> &mut Track {
        &mut self.base
    }

    fn load_beatmap(&mut self, beatmap: &WorkingBeatmap) {
        let (timing, non_timing) = visible_control_points(&beatmap.beatmap.control_points);

        for point in timing {
            self.base
                .add(PointMarker::new(point.time, MarkerKind::Timing, self.timing_colour));
        }
        for point in non_timing {
            self.base
                .add(PointMarker::new(point.time, MarkerKind::NonTiming, self.non_timing_colour));
        }
    }
}

/// Bookmark markers
#[derive(Debug, Clone)]
pub struct BookmarkTrack {
    base: Track,
    colour: Color32,
}

impl BookmarkTrack {
    /// Create an empty track
    pub fn new(colours: &TimelineColours) -> Self {
        Self {
            base: Track::new(TrackKind::Bookmarks),
            colour: colour(colours.bookmark),
        }
    }
}

impl TimelineTrack for BookmarkTrack {
    fn track(&self) -> &Track {
        &self.base
    }

    fn track_mut(&mut self) -> &mut Track {
        &mut self.base
    }

    fn load_beatmap(&mut self, beatmap: &WorkingBeatmap) {
        for &bookmark in &beatmap.beatmap.bookmarks {
            self.base
                .add(PointMarker::new(f64::from(bookmark), MarkerKind::Bookmark, self.colour));
        }
    }
}

/// Break period intervals
#[derive(Debug, Clone)]
pub struct BreakTrack {
    base: Track,
    colour: Color32,
}

impl BreakTrack {
    /// Create an empty track
    pub fn new(colours: &TimelineColours) -> Self {
        Self {
            base: Track::new(TrackKind::Breaks),
            colour: colour(colours.break_period),
        }
    }
}

impl TimelineTrack for BreakTrack {
    fn track(&self) -> &Track {
        &self.base
    }

    fn track_mut(&mut self) -> &mut Track {
        &mut self.base
    }

    fn load_beatmap(&mut self, beatmap: &WorkingBeatmap) {
        for period in &beatmap.beatmap.breaks {
            self.base.add(IntervalMarker::new(
                period.start_time,
                period.end_time,
                MarkerKind::Break,
                self.colour,
            ));
        }
    }
}

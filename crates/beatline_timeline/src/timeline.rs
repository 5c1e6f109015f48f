// SPDX-License-Identifier: MIT OR Apache-2.0
//! The timeline root: scale ownership, asset changes and seeking.

use crate::beatmap::WorkingBeatmap;
use crate::binding::{BeatmapBinding, BeatmapObserver};
use crate::scale::TimeScale;
use crate::style::TimelineStyle;
use crate::track::{BookmarkTrack, BreakTrack, ControlPointTrack, TimelineTrack};
use egui::{Pos2, Rect};
use std::sync::Arc;

/// Pointer input routed to the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down(Pos2),
    /// Drag gesture recognised
    DragStart(Pos2),
    /// Pointer moved during a drag
    Drag(Pos2),
    /// Drag gesture finished
    DragEnd(Pos2),
}

/// Drag operation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragOperation {
    /// Not dragging
    #[default]
    None,
    /// Scrubbing the playback position
    Seek,
}

/// Marker following the playback position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackMarker {
    time: f64,
}

impl PlaybackMarker {
    /// Raw playback time shown by the marker
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Position as a fraction of the content width, unclamped
    pub fn relative_position(&self, scale: &TimeScale) -> f32 {
        scale.to_relative(self.time)
    }
}

/// Multi-track timing timeline
pub struct Timeline {
    binding: BeatmapBinding,
    beatmap: Arc<WorkingBeatmap>,
    seen_generation: u64,
    scale: TimeScale,
    style: TimelineStyle,
    control_points: ControlPointTrack,
    bookmarks: BookmarkTrack,
    breaks: BreakTrack,
    playback_marker: PlaybackMarker,
    drag_op: DragOperation,
}

impl Timeline {
    /// Create a timeline bound to the host's beatmap
    pub fn new(binding: BeatmapBinding, style: TimelineStyle) -> Self {
        let (beatmap, seen_generation) = binding.snapshot();

        let mut timeline = Self {
            control_points: ControlPointTrack::new(&style.colours),
            bookmarks: BookmarkTrack::new(&style.colours),
            breaks: BreakTrack::new(&style.colours),
            binding,
            beatmap: beatmap.clone(),
            seen_generation,
            scale: TimeScale::default(),
            style,
            playback_marker: PlaybackMarker::default(),
            drag_op: DragOperation::None,
        };
        timeline.beatmap_changed(&beatmap);
        timeline.playback_marker.time = beatmap.clock.current_time();
        timeline
    }

    /// Per-frame update: apply a pending beatmap change, then follow playback
    pub fn update(&mut self) {
        if let Some(beatmap) = self.binding.changed_since(&mut self.seen_generation) {
            self.beatmap = beatmap.clone();
            self.beatmap_changed(&beatmap);
        }

        self.playback_marker.time = self.beatmap.clock.current_time();
    }

    /// Handle a pointer event inside `content`, returning the time sought to
    pub fn on_pointer(&mut self, event: PointerEvent, content: Rect) -> Option<f64> {
        match event {
            PointerEvent::Down(pos) => self.seek_to_position(pos, content),
            PointerEvent::DragStart(_) => {
                self.drag_op = DragOperation::Seek;
                None
            }
            PointerEvent::Drag(pos) => match self.drag_op {
                DragOperation::Seek => self.seek_to_position(pos, content),
                DragOperation::None => None,
            },
            PointerEvent::DragEnd(_) => {
                self.drag_op = DragOperation::None;
                None
            }
        }
    }

    /// Time under a screen position, clamped to the content span
    pub fn time_at(&self, pos: Pos2, content: Rect) -> Option<f64> {
        let width = content.width();
        if width <= 0.0 {
            return None;
        }

        let local_x = (pos.x - content.min.x).clamp(0.0, width);
        Some(f64::from(local_x) / f64::from(width) * self.beatmap.clock.length())
    }

    fn seek_to_position(&self, pos: Pos2, content: Rect) -> Option<f64> {
        let time = self.time_at(pos, content)?;

        tracing::trace!("Seeking to {:.1}ms", time);
        self.beatmap.clock.seek(time);
        Some(time)
    }

    /// Region of `rect` mapped to time, excluding horizontal padding
    pub fn content_rect(&self, rect: Rect) -> Rect {
        let padding = self.style.contents_padding.min(rect.width() / 2.0);
        Rect::from_min_max(
            Pos2::new(rect.min.x + padding, rect.min.y),
            Pos2::new(rect.max.x - padding, rect.max.y),
        )
    }

    /// Shared time scale
    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }

    /// Visual style
    pub fn style(&self) -> &TimelineStyle {
        &self.style
    }

    /// Beatmap the tracks were built from
    pub fn beatmap(&self) -> &Arc<WorkingBeatmap> {
        &self.beatmap
    }

    /// Playback marker
    pub fn playback_marker(&self) -> &PlaybackMarker {
        &self.playback_marker
    }

    /// Whether a seek drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag_op == DragOperation::Seek
    }

    /// Control point track
    pub fn control_point_track(&self) -> &ControlPointTrack {
        &self.control_points
    }

    /// Bookmark track
    pub fn bookmark_track(&self) -> &BookmarkTrack {
        &self.bookmarks
    }

    /// Break track
    pub fn break_track(&self) -> &BreakTrack {
        &self.breaks
    }

    /// All tracks in reload order
    pub fn tracks(&self) -> [&dyn TimelineTrack; 3] {
        [&self.control_points, &self.bookmarks, &self.breaks]
    }
}

impl BeatmapObserver for Timeline {
    fn beatmap_changed(&mut self, beatmap: &WorkingBeatmap) {
        self.scale = TimeScale::from_length(beatmap.clock.length());

        self.control_points.beatmap_changed(beatmap);
        self.bookmarks.beatmap_changed(beatmap);
        self.breaks.beatmap_changed(beatmap);

        tracing::debug!(
            "Timeline loaded {} over {:.0}ms",
            beatmap.beatmap.display_name(),
            self.scale.duration()
        );
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("beatmap", &self.beatmap)
            .field("scale", &self.scale)
            .field("playback_marker", &self.playback_marker)
            .field("drag_op", &self.drag_op)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::{Beatmap, BreakPeriod};
    use crate::clock::{MediaClock, TrackClock};
    use crate::control_point::ControlPoint;
    use crate::marker::MarkerKind;
    use egui::pos2;
    use parking_lot::Mutex;

    /// Clock that records seeks and reports a fixed current time
    struct RecordingClock {
        length: f64,
        current: Mutex<f64>,
        seeks: Mutex<Vec<f64>>,
    }

    impl RecordingClock {
        fn new(length: f64) -> Arc<Self> {
            Arc::new(Self {
                length,
                current: Mutex::new(0.0),
                seeks: Mutex::new(Vec::new()),
            })
        }

        fn set_current(&self, time: f64) {
            *self.current.lock() = time;
        }

        fn seeks(&self) -> Vec<f64> {
            self.seeks.lock().clone()
        }
    }

    impl MediaClock for RecordingClock {
        fn length(&self) -> f64 {
            self.length
        }

        fn current_time(&self) -> f64 {
            *self.current.lock()
        }

        fn seek(&self, time: f64) {
            self.seeks.lock().push(time);
        }
    }

    fn content() -> Rect {
        Rect::from_min_max(pos2(15.0, 0.0), pos2(415.0, 50.0))
    }

    fn timeline_with(beatmap: Beatmap, clock: Arc<RecordingClock>) -> Timeline {
        let binding = BeatmapBinding::new(WorkingBeatmap::new(beatmap, clock));
        Timeline::new(binding, TimelineStyle::default())
    }

    #[test]
    fn test_pointer_down_seeks_proportionally() {
        let clock = RecordingClock::new(4000.0);
        let mut timeline = timeline_with(Beatmap::default(), clock.clone());

        assert_eq!(timeline.on_pointer(PointerEvent::Down(pos2(115.0, 25.0)), content()), Some(1000.0));
        assert_eq!(timeline.on_pointer(PointerEvent::Down(pos2(415.0, 25.0)), content()), Some(4000.0));
        assert_eq!(clock.seeks(), vec![1000.0, 4000.0]);
    }

    #[test]
    fn test_repeated_events_seek_identically() {
        let clock = RecordingClock::new(3000.0);
        let mut timeline = timeline_with(Beatmap::default(), clock.clone());

        for _ in 0..3 {
            timeline.on_pointer(PointerEvent::Down(pos2(215.0, 10.0)), content());
        }
        assert_eq!(clock.seeks(), vec![1500.0, 1500.0, 1500.0]);
    }

    #[test]
    fn test_out_of_range_pointer_is_clamped() {
        let clock = RecordingClock::new(4000.0);
        let mut timeline = timeline_with(Beatmap::default(), clock.clone());

        timeline.on_pointer(PointerEvent::Down(pos2(-100.0, 25.0)), content());
        timeline.on_pointer(PointerEvent::Down(pos2(900.0, 25.0)), content());
        assert_eq!(clock.seeks(), vec![0.0, 4000.0]);
    }

    #[test]
    fn test_drag_gesture_seeks_only_on_move() {
        let clock = RecordingClock::new(4000.0);
        let mut timeline = timeline_with(Beatmap::default(), clock.clone());

        // a drag without a recognised gesture does nothing
        assert_eq!(timeline.on_pointer(PointerEvent::Drag(pos2(115.0, 0.0)), content()), None);

        assert_eq!(timeline.on_pointer(PointerEvent::DragStart(pos2(115.0, 0.0)), content()), None);
        assert!(timeline.is_dragging());
        assert_eq!(timeline.on_pointer(PointerEvent::Drag(pos2(215.0, 0.0)), content()), Some(2000.0));
        assert_eq!(timeline.on_pointer(PointerEvent::DragEnd(pos2(215.0, 0.0)), content()), None);
        assert!(!timeline.is_dragging());
        assert_eq!(timeline.on_pointer(PointerEvent::Drag(pos2(315.0, 0.0)), content()), None);

        assert_eq!(clock.seeks(), vec![2000.0]);
    }

    #[test]
    fn test_zero_width_content_does_not_seek() {
        let clock = RecordingClock::new(4000.0);
        let mut timeline = timeline_with(Beatmap::default(), clock.clone());
        let empty = Rect::from_min_max(pos2(10.0, 0.0), pos2(10.0, 50.0));

        assert_eq!(timeline.on_pointer(PointerEvent::Down(pos2(10.0, 0.0)), empty), None);
        assert!(clock.seeks().is_empty());
    }

    #[test]
    fn test_zero_length_asset_is_floored() {
        let clock = RecordingClock::new(0.0);
        let mut timeline = timeline_with(Beatmap::default(), clock.clone());

        assert_eq!(timeline.scale().duration(), 1.0);
        for track in timeline.tracks() {
            assert_eq!(track.track().scale().duration(), 1.0);
        }
        assert_eq!(timeline.on_pointer(PointerEvent::Down(pos2(215.0, 0.0)), content()), Some(0.0));
    }

    #[test]
    fn test_playback_marker_is_unclamped() {
        let clock = RecordingClock::new(1000.0);
        let mut timeline = timeline_with(Beatmap::default(), clock.clone());

        clock.set_current(250.0);
        timeline.update();
        assert_eq!(timeline.playback_marker().time(), 250.0);

        clock.set_current(1500.0);
        timeline.update();
        assert_eq!(timeline.playback_marker().time(), 1500.0);
        assert_eq!(timeline.playback_marker().relative_position(timeline.scale()), 1.5);

        clock.set_current(-100.0);
        timeline.update();
        assert_eq!(timeline.playback_marker().time(), -100.0);
    }

    #[test]
    fn test_beatmap_change_reloads_before_marker_update() {
        let mut first = Beatmap::default();
        first.bookmarks = vec![100, 200];
        first.control_points.add(ControlPoint::timing(0.0, 500.0, 4));
        first.breaks.push(BreakPeriod::new(300.0, 400.0));

        let binding = BeatmapBinding::new(WorkingBeatmap::new(first, Arc::new(TrackClock::new(1000.0))));
        let mut timeline = Timeline::new(binding.clone(), TimelineStyle::default());
        assert_eq!(timeline.bookmark_track().track().marker_count(), 2);

        let mut second = Beatmap::default();
        second.bookmarks = vec![5000];
        let clock = Arc::new(TrackClock::new(8000.0));
        clock.seek(6000.0);
        binding.set(WorkingBeatmap::new(second, clock));

        // nothing changes until the next frame
        assert_eq!(timeline.scale().duration(), 1000.0);

        timeline.update();
        assert_eq!(timeline.scale().duration(), 8000.0);
        for track in timeline.tracks() {
            assert_eq!(track.track().scale(), timeline.scale());
        }
        assert_eq!(timeline.control_point_track().track().marker_count(), 0);
        assert_eq!(timeline.break_track().track().marker_count(), 0);

        let bookmarks = timeline.bookmark_track().track();
        assert_eq!(bookmarks.marker_count(), 1);
        assert_eq!(bookmarks.markers_of(MarkerKind::Bookmark).count(), 1);
        assert_eq!(timeline.playback_marker().relative_position(timeline.scale()), 0.75);
    }

    #[test]
    fn test_seek_targets_current_beatmap() {
        let binding = BeatmapBinding::new(WorkingBeatmap::new(Beatmap::default(), RecordingClock::new(1000.0)));
        let mut timeline = Timeline::new(binding.clone(), TimelineStyle::default());

        let next = RecordingClock::new(2000.0);
        binding.set(WorkingBeatmap::new(Beatmap::default(), next.clone()));
        timeline.update();

        timeline.on_pointer(PointerEvent::Down(pos2(215.0, 0.0)), content());
        assert_eq!(next.seeks(), vec![1000.0]);
    }

    #[test]
    fn test_content_rect_excludes_padding() {
        let timeline = timeline_with(Beatmap::default(), RecordingClock::new(10.0));
        let rect = timeline.content_rect(Rect::from_min_max(pos2(0.0, 0.0), pos2(500.0, 50.0)));
        assert_eq!(rect.min.x, 15.0);
        assert_eq!(rect.max.x, 485.0);
        assert_eq!(rect.height(), 50.0);
    }
}

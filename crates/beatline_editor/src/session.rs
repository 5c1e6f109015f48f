// SPDX-License-Identifier: MIT OR Apache-2.0
//! The loaded beatmaps and the clock playing the current one.

use crate::demo;
use crate::key_binding::EditorAction;
use beatline_timeline::{Beatmap, BeatmapBinding, MediaClock, TrackClock, WorkingBeatmap};
use std::sync::Arc;
use std::time::Duration;

/// Beatmaps the user can cycle through, one of them bound at a time
pub struct Session {
    beatmaps: Vec<Beatmap>,
    current: usize,
    binding: BeatmapBinding,
    clock: Arc<TrackClock>,
}

impl Session {
    /// Bind the first beatmap, or an empty one if none are given
    pub fn new(mut beatmaps: Vec<Beatmap>) -> Self {
        if beatmaps.is_empty() {
            beatmaps.push(Beatmap::default());
        }

        let (working, clock) = Self::working(&beatmaps[0]);
        Self {
            beatmaps,
            current: 0,
            binding: BeatmapBinding::new(working),
            clock,
        }
    }

    fn working(beatmap: &Beatmap) -> (WorkingBeatmap, Arc<TrackClock>) {
        let clock = Arc::new(TrackClock::new(demo::track_length(beatmap)));
        let working = WorkingBeatmap::new(beatmap.clone(), clock.clone());
        (working, clock)
    }

    /// Binding handed to the timeline
    pub fn binding(&self) -> &BeatmapBinding {
        &self.binding
    }

    /// Clock of the current beatmap
    pub fn clock(&self) -> &TrackClock {
        &self.clock
    }

    /// The current beatmap
    pub fn current(&self) -> &Beatmap {
        &self.beatmaps[self.current]
    }

    /// Position of the current beatmap, and how many there are
    pub fn position(&self) -> (usize, usize) {
        (self.current, self.beatmaps.len())
    }

    /// Advance playback by a frame's wall-clock time
    pub fn advance(&self, elapsed: Duration) {
        self.clock.update(elapsed.as_secs_f64() * 1000.0);
    }

    /// Bind the next beatmap, wrapping around
    pub fn next_beatmap(&mut self) {
        self.current = (self.current + 1) % self.beatmaps.len();
        let (working, clock) = Self::working(&self.beatmaps[self.current]);
        self.clock = clock;
        self.binding.set(working);
        tracing::info!("Switched to {}", self.current().display_name());
    }

    /// Run a bound action
    pub fn apply(&mut self, action: EditorAction) {
        tracing::debug!("Action {:?}", action);
        match action {
            EditorAction::TogglePlayback => {
                // replay from the start once the end was reached
                if !self.clock.is_playing() && self.clock.current_time() >= self.clock.length() {
                    self.clock.seek(0.0);
                }
                self.clock.toggle_playback();
            }
            EditorAction::Stop => self.clock.stop(),
            EditorAction::SeekToStart => self.clock.seek(0.0),
            EditorAction::SeekToEnd => self.clock.seek(self.clock.length()),
            EditorAction::NextBeatmap => self.next_beatmap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_binds_placeholder() {
        let session = Session::new(Vec::new());
        assert_eq!(session.position(), (0, 1));
        assert_eq!(session.binding().value().clock.length(), demo::track_length(&Beatmap::default()));
    }

    #[test]
    fn test_next_beatmap_rebinds() {
        let mut session = Session::new(demo::beatmaps());
        let generation = session.binding().generation();

        session.apply(EditorAction::NextBeatmap);
        assert_eq!(session.position().0, 1);
        assert_eq!(session.binding().generation(), generation + 1);
        assert_eq!(
            session.binding().value().clock.length(),
            demo::track_length(session.current())
        );

        session.apply(EditorAction::NextBeatmap);
        assert_eq!(session.position().0, 0);
    }

    #[test]
    fn test_seek_actions() {
        let mut session = Session::new(demo::beatmaps());
        session.apply(EditorAction::SeekToEnd);
        assert_eq!(session.clock().current_time(), session.clock().length());

        session.apply(EditorAction::SeekToStart);
        assert_eq!(session.clock().current_time(), 0.0);
    }

    #[test]
    fn test_playback_advances_clock() {
        let mut session = Session::new(demo::beatmaps());
        session.advance(Duration::from_millis(100));
        assert_eq!(session.clock().current_time(), 0.0);

        session.apply(EditorAction::TogglePlayback);
        session.advance(Duration::from_millis(250));
        assert!((session.clock().current_time() - 250.0).abs() < 1e-6);

        session.apply(EditorAction::Stop);
        assert_eq!(session.clock().current_time(), 0.0);
        assert!(!session.clock().is_playing());
    }
}

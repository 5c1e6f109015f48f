// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback clock of the media asset.
//!
//! The timeline never owns the clock. It reads the length and current time,
//! and issues seeks. [`TrackClock`] is a self-driven implementation for hosts
//! without a real audio backend.

use parking_lot::Mutex;

/// Playback clock consumed by the timeline
pub trait MediaClock: Send + Sync {
    /// Length of the asset in milliseconds (0 when unknown)
    fn length(&self) -> f64;

    /// Current playback position in milliseconds
    fn current_time(&self) -> f64;

    /// Seek to a time. Fire-and-forget; the clock clamps as it sees fit.
    fn seek(&self, time: f64);
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Stopped
    #[default]
    Stopped,
    /// Playing forward
    Playing,
    /// Paused
    Paused,
}

#[derive(Debug)]
struct ClockState {
    time: f64,
    state: PlaybackState,
}

/// A clock advanced by frame deltas
#[derive(Debug)]
pub struct TrackClock {
    length: f64,
    inner: Mutex<ClockState>,
}

impl TrackClock {
    /// Create a stopped clock for an asset of the given length (ms)
    pub fn new(length: f64) -> Self {
        Self {
            length: length.max(0.0),
            inner: Mutex::new(ClockState {
                time: 0.0,
                state: PlaybackState::Stopped,
            }),
        }
    }

    /// Advance playback by a frame delta (ms)
    pub fn update(&self, delta_ms: f64) {
        let mut inner = self.inner.lock();
        if inner.state != PlaybackState::Playing {
            return;
        }

        inner.time += delta_ms;

        if inner.time >= self.length {
            inner.time = self.length;
            inner.state = PlaybackState::Stopped;
            tracing::debug!("Playback reached end at {:.0}ms", self.length);
        }
    }

    /// Start or resume playback
    pub fn play(&self) {
        self.inner.lock().state = PlaybackState::Playing;
    }

    /// Pause playback
    pub fn pause(&self) {
        let mut inner = self.inner.lock();
        if inner.state == PlaybackState::Playing {
            inner.state = PlaybackState::Paused;
        }
    }

    /// Stop and rewind
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        inner.state = PlaybackState::Stopped;
        inner.time = 0.0;
    }

    /// Toggle play/pause
    pub fn toggle_playback(&self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Is currently playing
    pub fn is_playing(&self) -> bool {
        self.inner.lock().state == PlaybackState::Playing
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.inner.lock().state
    }
}

impl MediaClock for TrackClock {
    fn length(&self) -> f64 {
        self.length
    }

    fn current_time(&self) -> f64 {
        self.inner.lock().time
    }

    fn seek(&self, time: f64) {
        self.inner.lock().time = time.clamp(0.0, self.length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_only_while_playing() {
        let clock = TrackClock::new(1000.0);
        clock.update(100.0);
        assert_eq!(clock.current_time(), 0.0);

        clock.play();
        clock.update(100.0);
        assert_eq!(clock.current_time(), 100.0);

        clock.pause();
        clock.update(100.0);
        assert_eq!(clock.current_time(), 100.0);
        assert_eq!(clock.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_stops_at_end() {
        let clock = TrackClock::new(1000.0);
        clock.play();
        clock.update(1500.0);
        assert_eq!(clock.current_time(), 1000.0);
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_seek_clamps() {
        let clock = TrackClock::new(1000.0);
        clock.seek(-50.0);
        assert_eq!(clock.current_time(), 0.0);
        clock.seek(5000.0);
        assert_eq!(clock.current_time(), 1000.0);
        clock.seek(400.0);
        clock.seek(400.0);
        assert_eq!(clock.current_time(), 400.0);
    }

    #[test]
    fn test_toggle_and_stop() {
        let clock = TrackClock::new(10_000.0);
        clock.toggle_playback();
        clock.update(100.0);
        assert_eq!(clock.current_time(), 100.0);
        clock.toggle_playback();
        assert_eq!(clock.state(), PlaybackState::Paused);
        clock.stop();
        assert_eq!(clock.current_time(), 0.0);
    }
}

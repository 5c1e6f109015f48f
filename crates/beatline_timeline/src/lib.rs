// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timing timeline widget for Beatline.
//!
//! This crate draws a beatmap's timing structure along the length of its
//! audio track:
//! - Timing and non-timing control points
//! - Bookmarks
//! - Break periods
//! - The current playback position
//!
//! Clicking or dragging on the widget seeks the audio.
//!
//! ## Architecture
//!
//! The timeline is built on:
//! - A shared [`BeatmapBinding`] the host swaps beatmaps through
//! - One [`TimeScale`] per track, rebuilt with the track's markers
//! - A [`MediaClock`] the timeline reads and seeks but never owns

pub mod beatmap;
pub mod binding;
pub mod clock;
pub mod control_point;
pub mod error;
pub mod marker;
pub mod scale;
pub mod style;
pub mod timeline;
pub mod track;
pub mod ui;

pub use beatmap::{Beatmap, BeatmapMetadata, BreakPeriod, WorkingBeatmap};
pub use binding::{BeatmapBinding, BeatmapObserver};
pub use clock::{MediaClock, PlaybackState, TrackClock};
pub use control_point::{ControlPoint, ControlPointInfo, ControlPointKind, ControlPointValue};
pub use error::{Result, TimelineError};
pub use marker::{IntervalMarker, Marker, MarkerKind, PointMarker};
pub use scale::TimeScale;
pub use style::{Lane, TimelineColours, TimelineStyle};
pub use timeline::{DragOperation, PlaybackMarker, PointerEvent, Timeline};
pub use track::{BookmarkTrack, BreakTrack, ControlPointTrack, TimelineTrack, Track, TrackKind};
pub use ui::format_time;

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Point and interval markers drawn by the tracks.

use crate::scale::TimeScale;
use egui::{Color32, Pos2, Rect};

/// What a marker represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Timing control point
    Timing,
    /// Sound, effect or difficulty control point
    NonTiming,
    /// Bookmark
    Bookmark,
    /// Break period
    Break,
}

/// A marker anchored at a single time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMarker {
    /// Time in milliseconds
    pub start_time: f64,
    /// What the marker represents
    pub kind: MarkerKind,
    /// Fill colour
    pub colour: Color32,
}

impl PointMarker {
    /// Create a point marker
    pub fn new(start_time: f64, kind: MarkerKind, colour: Color32) -> Self {
        Self { start_time, kind, colour }
    }

    /// Horizontal position as a fraction of the lane width
    pub fn relative_position(&self, scale: &TimeScale) -> f32 {
        scale.to_relative(self.start_time)
    }

    /// Full-height strip of `width` centred on the mapped X
    pub fn rect(&self, scale: &TimeScale, lane: Rect, width: f32) -> Rect {
        let x = scale.time_to_x(self.start_time, lane);
        Rect::from_min_max(
            Pos2::new(x - width / 2.0, lane.min.y),
            Pos2::new(x + width / 2.0, lane.max.y),
        )
    }
}

/// A marker spanning two times
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalMarker {
    /// Start time in milliseconds
    pub start_time: f64,
    /// End time in milliseconds
    pub end_time: f64,
    /// What the marker represents
    pub kind: MarkerKind,
    /// Fill colour
    pub colour: Color32,
}

impl IntervalMarker {
    /// Create an interval marker
    pub fn new(start_time: f64, end_time: f64, kind: MarkerKind, colour: Color32) -> Self {
        Self { start_time, end_time, kind, colour }
    }

    /// Start as a fraction of the lane width
    pub fn relative_start(&self, scale: &TimeScale) -> f32 {
        scale.to_relative(self.start_time)
    }

    /// Width as a fraction of the lane width (negative for inverted intervals)
    pub fn relative_width(&self, scale: &TimeScale) -> f32 {
        scale.span_to_relative(self.end_time - self.start_time)
    }

    /// Full-height rect from the mapped start to the mapped end
    pub fn rect(&self, scale: &TimeScale, lane: Rect) -> Rect {
        let start = scale.time_to_x(self.start_time, lane);
        let width = self.relative_width(scale) * lane.width();
        // Not `from_two_pos`: an inverted interval stays inverted and paints nothing
        Rect::from_min_max(
            Pos2::new(start, lane.min.y),
            Pos2::new(start + width, lane.max.y),
        )
    }
}

/// A rendered marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    /// Single time
    Point(PointMarker),
    /// Time span
    Interval(IntervalMarker),
}

impl Marker {
    /// Start time of the marker
    pub fn start_time(&self) -> f64 {
        match self {
            Self::Point(p) => p.start_time,
            Self::Interval(i) => i.start_time,
        }
    }

    /// What the marker represents
    pub fn kind(&self) -> MarkerKind {
        match self {
            Self::Point(p) => p.kind,
            Self::Interval(i) => i.kind,
        }
    }

    /// Fill colour
    pub fn colour(&self) -> Color32 {
        match self {
            Self::Point(p) => p.colour,
            Self::Interval(i) => i.colour,
        }
    }

    /// Paint into a lane
    pub fn paint(&self, painter: &egui::Painter, scale: &TimeScale, lane: Rect, style: &crate::style::TimelineStyle) {
        let colour = self.colour();
        match self {
            Self::Point(p) => {
                painter.rect_filled(p.rect(scale, lane, style.point_width), 0.0, colour);
            }
            Self::Interval(i) => {
                let rect = i.rect(scale, lane);
                if rect.is_positive() {
                    let rounding = style.corner_radius.min(rect.width() / 2.0);
                    painter.rect_filled(rect, rounding, colour);
                }
            }
        }
    }
}

impl From<PointMarker> for Marker {
    fn from(marker: PointMarker) -> Self {
        Self::Point(marker)
    }
}

impl From<IntervalMarker> for Marker {
    fn from(marker: IntervalMarker) -> Self {
        Self::Interval(marker)
    }
}

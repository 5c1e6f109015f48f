// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visual style of the timeline, passed in by the host.

use crate::error::Result;
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Colours of every timeline element, as RGB triples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineColours {
    /// Widget background
    pub background: [u8; 3],
    /// Time-axis bar
    pub timeline_bar: [u8; 3],
    /// Playback marker
    pub playback_marker: [u8; 3],
    /// Timing control points
    pub timing_point: [u8; 3],
    /// Sound, effect and difficulty control points
    pub non_timing_point: [u8; 3],
    /// Bookmarks
    pub bookmark: [u8; 3],
    /// Break periods
    pub break_period: [u8; 3],
}

impl Default for TimelineColours {
    fn default() -> Self {
        Self {
            background: [0x11, 0x11, 0x11],
            timeline_bar: [0x55, 0x55, 0x55],
            playback_marker: [0xed, 0x11, 0x21],
            timing_point: [0xee, 0xaa, 0x00],
            non_timing_point: [0x88, 0xb3, 0x00],
            bookmark: [0x66, 0xcc, 0xff],
            break_period: [0xff, 0xcc, 0x22],
        }
    }
}

/// Convert an RGB triple
pub fn colour(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Vertical band a track occupies, as fractions of the widget height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Top edge
    pub top: f32,
    /// Height
    pub height: f32,
}

impl Lane {
    /// Lane spanning `[top, top + height]`
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Screen rect of this lane inside `area`
    pub fn rect(&self, area: egui::Rect) -> egui::Rect {
        let top = area.min.y + self.top * area.height();
        egui::Rect::from_min_max(
            egui::pos2(area.min.x, top),
            egui::pos2(area.max.x, top + self.height * area.height()),
        )
    }
}

/// Layout and colours of the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineStyle {
    /// Colours
    pub colours: TimelineColours,
    /// Horizontal padding excluded from the time-mapped region
    pub contents_padding: f32,
    /// Corner radius of the background and break intervals
    pub corner_radius: f32,
    /// Width of the playback marker bar
    pub marker_bar_width: f32,
    /// Width of point markers
    pub point_width: f32,
    /// Size of the playback marker triangles
    pub marker_head_size: [f32; 2],
    /// Diameter of the time-axis end caps
    pub bar_cap_size: f32,
    /// Control point lane (ends at the centre line)
    pub control_point_lane: Lane,
    /// Bookmark lane (starts at the centre line)
    pub bookmark_lane: Lane,
    /// Break lane (centred)
    pub break_lane: Lane,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            colours: TimelineColours::default(),
            contents_padding: 15.0,
            corner_radius: 5.0,
            marker_bar_width: 2.0,
            point_width: 1.0,
            marker_head_size: [10.0, 5.0],
            bar_cap_size: 5.0,
            control_point_lane: Lane::new(0.15, 0.35),
            bookmark_lane: Lane::new(0.5, 0.35),
            break_lane: Lane::new(0.375, 0.25),
        }
    }
}

impl TimelineStyle {
    /// Load a style from a RON file
    pub fn load(path: &Path) -> Result<Self> {
        crate::error::read_ron(path)
    }

    /// Save this style as RON
    pub fn save(&self, path: &Path) -> Result<()> {
        crate::error::write_ron(path, self)
    }

    /// Parse a style from RON text; missing fields take defaults
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }
}

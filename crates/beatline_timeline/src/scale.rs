// SPDX-License-Identifier: MIT OR Apache-2.0
//! Time to space mapping shared by the timeline and its tracks.

use egui::Rect;

/// Smallest duration used as a mapping denominator
pub const MIN_DURATION: f64 = 1.0;

/// Maps `[0, duration]` onto a horizontal span
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    duration: f64,
}

impl TimeScale {
    /// Scale for an asset length, floored to [`MIN_DURATION`]
    pub fn from_length(length: f64) -> Self {
        // NaN also lands on the floor
        let duration = if length > MIN_DURATION { length } else { MIN_DURATION };
        Self { duration }
    }

    /// Duration covered by the full width
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Fraction of the width at which `time` lies, unclamped
    pub fn to_relative(&self, time: f64) -> f32 {
        (time / self.duration) as f32
    }

    /// Width fraction covered by a span of time
    pub fn span_to_relative(&self, span: f64) -> f32 {
        (span / self.duration) as f32
    }

    /// Screen X of `time` inside `area`, unclamped
    pub fn time_to_x(&self, time: f64, area: Rect) -> f32 {
        area.min.x + self.to_relative(time) * area.width()
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::from_length(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    #[test]
    fn test_zero_length_is_floored() {
        let scale = TimeScale::from_length(0.0);
        assert_eq!(scale.duration(), 1.0);
        assert_eq!(scale.to_relative(0.5), 0.5);
        assert!(scale.to_relative(10.0).is_finite());
        assert_eq!(TimeScale::from_length(f64::NAN).duration(), 1.0);
        assert_eq!(TimeScale::from_length(-20.0).duration(), 1.0);
    }

    #[test]
    fn test_relative_mapping() {
        let scale = TimeScale::from_length(4000.0);
        assert_eq!(scale.to_relative(1000.0), 0.25);
        assert_eq!(scale.span_to_relative(500.0), 0.125);
        assert_eq!(scale.to_relative(6000.0), 1.5);
    }

    #[test]
    fn test_time_to_x() {
        let scale = TimeScale::from_length(2000.0);
        let area = Rect::from_min_max(Pos2::new(15.0, 0.0), Pos2::new(215.0, 50.0));
        assert_eq!(scale.time_to_x(0.0, area), 15.0);
        assert_eq!(scale.time_to_x(1000.0, area), 115.0);
        assert_eq!(scale.time_to_x(2000.0, area), 215.0);
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Control point definitions.
//!
//! A control point is a timed parameter change. Timing points define tempo
//! and meter; sound, effect and difficulty points change everything else.

use serde::{Deserialize, Serialize};

/// Kind of a control point, ordered timing, sound, effect, difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ControlPointKind {
    /// Tempo and meter change
    Timing,
    /// Hitsound sample change
    Sound,
    /// Kiai / bar line effects
    Effect,
    /// Scroll speed change
    Difficulty,
}

impl ControlPointKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Timing => "Timing",
            Self::Sound => "Sound",
            Self::Effect => "Effect",
            Self::Difficulty => "Difficulty",
        }
    }
}

/// Parameters carried by a control point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlPointValue {
    /// Timing change
    Timing {
        /// Milliseconds per beat
        beat_length: f64,
        /// Beats per bar
        meter: u32,
    },
    /// Sample change
    Sound {
        /// Sample bank name
        sample_bank: String,
        /// Volume percentage
        volume: u8,
    },
    /// Effect change
    Effect {
        /// Kiai time enabled
        kiai: bool,
        /// Omit the first bar line of the section
        omit_first_bar_line: bool,
    },
    /// Difficulty change
    Difficulty {
        /// Scroll speed multiplier
        speed_multiplier: f64,
    },
}

/// A timed parameter change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Time in milliseconds
    pub time: f64,
    /// Effective parameters
    pub value: ControlPointValue,
}

impl ControlPoint {
    /// Create a control point
    pub fn new(time: f64, value: ControlPointValue) -> Self {
        Self { time, value }
    }

    /// Timing point with a beat length and meter
    pub fn timing(time: f64, beat_length: f64, meter: u32) -> Self {
        Self::new(time, ControlPointValue::Timing { beat_length, meter })
    }

    /// Sound point
    pub fn sound(time: f64, sample_bank: impl Into<String>, volume: u8) -> Self {
        Self::new(
            time,
            ControlPointValue::Sound {
                sample_bank: sample_bank.into(),
                volume,
            },
        )
    }

    /// Effect point
    pub fn effect(time: f64, kiai: bool, omit_first_bar_line: bool) -> Self {
        Self::new(time, ControlPointValue::Effect { kiai, omit_first_bar_line })
    }

    /// Difficulty point
    pub fn difficulty(time: f64, speed_multiplier: f64) -> Self {
        Self::new(time, ControlPointValue::Difficulty { speed_multiplier })
    }

    /// Kind derived from the value
    pub fn kind(&self) -> ControlPointKind {
        match self.value {
            ControlPointValue::Timing { .. } => ControlPointKind::Timing,
            ControlPointValue::Sound { .. } => ControlPointKind::Sound,
            ControlPointValue::Effect { .. } => ControlPointKind::Effect,
            ControlPointValue::Difficulty { .. } => ControlPointKind::Difficulty,
        }
    }

    /// Whether this is a timing point
    pub fn is_timing(&self) -> bool {
        self.kind() == ControlPointKind::Timing
    }

    /// Hashable key describing the effective value of this point
    pub fn effective_key(&self) -> EffectiveKey {
        let payload = match &self.value {
            ControlPointValue::Timing { beat_length, meter } => {
                EffectivePayload::Timing(float_bits(*beat_length), *meter)
            }
            ControlPointValue::Sound { sample_bank, volume } => {
                EffectivePayload::Sound(sample_bank.clone(), *volume)
            }
            ControlPointValue::Effect { kiai, omit_first_bar_line } => {
                EffectivePayload::Effect(*kiai, *omit_first_bar_line)
            }
            ControlPointValue::Difficulty { speed_multiplier } => {
                EffectivePayload::Difficulty(float_bits(*speed_multiplier))
            }
        };

        EffectiveKey {
            time: float_bits(self.time),
            payload,
        }
    }
}

impl PartialEq for ControlPoint {
    fn eq(&self, other: &Self) -> bool {
        self.effective_key() == other.effective_key()
    }
}

impl Eq for ControlPoint {}

impl std::hash::Hash for ControlPoint {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.effective_key().hash(state);
    }
}

/// Effective-value identity of a control point
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectiveKey {
    time: u64,
    payload: EffectivePayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum EffectivePayload {
    Timing(u64, u32),
    Sound(String, u8),
    Effect(bool, bool),
    Difficulty(u64),
}

// -0.0 and 0.0 must compare equal
fn float_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Ordered control points of a beatmap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlPointInfo {
    points: Vec<ControlPoint>,
}

impl ControlPointInfo {
    /// Create from an ordered list
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self { points }
    }

    /// Append a control point
    pub fn add(&mut self, point: ControlPoint) {
        self.points.push(point);
    }

    /// All points in declared order
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Timing points in declared order
    pub fn timing_points(&self) -> impl Iterator<Item = &ControlPoint> {
        self.points.iter().filter(|p| p.is_timing())
    }

    /// Sound, effect and difficulty points in declared order
    pub fn non_timing_points(&self) -> impl Iterator<Item = &ControlPoint> {
        self.points.iter().filter(|p| !p.is_timing())
    }

    /// The nearest timing point at or before `time`
    pub fn timing_point_at(&self, time: f64) -> Option<&ControlPoint> {
        self.timing_points()
            .filter(|p| p.time <= time)
            .fold(None, |best: Option<&ControlPoint>, p| match best {
                // later declaration wins a tie
                Some(b) if b.time > p.time => Some(b),
                _ => Some(p),
            })
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

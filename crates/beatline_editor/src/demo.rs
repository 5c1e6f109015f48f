// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in beatmaps shown when nothing else is loaded.

use beatline_timeline::{Beatmap, BeatmapMetadata, BreakPeriod, ControlPoint, ControlPointInfo};

fn metadata(title: &str, version: &str) -> BeatmapMetadata {
    BeatmapMetadata {
        title: title.to_string(),
        artist: "Beatline".to_string(),
        version: version.to_string(),
    }
}

/// A short map with a tempo change, a kiai section and one break
fn steady() -> Beatmap {
    Beatmap {
        metadata: metadata("Steady", "Normal"),
        control_points: ControlPointInfo::new(vec![
            ControlPoint::timing(0.0, 500.0, 4),
            ControlPoint::sound(0.0, "normal", 70),
            ControlPoint::effect(8_000.0, true, false),
            ControlPoint::effect(16_000.0, false, false),
            ControlPoint::timing(24_000.0, 400.0, 4),
            ControlPoint::difficulty(24_000.0, 1.2),
            ControlPoint::sound(32_000.0, "soft", 50),
        ]),
        breaks: vec![BreakPeriod::new(40_000.0, 48_000.0)],
        bookmarks: vec![4_000, 20_000, 36_000, 52_000],
    }
}

/// Dense control points with repeated values and two breaks
fn busy() -> Beatmap {
    let mut control_points = ControlPointInfo::default();
    control_points.add(ControlPoint::timing(1_000.0, 333.3, 4));
    for i in 0..24 {
        let time = 2_000.0 + f64::from(i) * 2_500.0;
        control_points.add(ControlPoint::sound(time, "drum", 40 + (i % 3) as u8 * 20));
        // repeats the previous value, collapses into one marker
        control_points.add(ControlPoint::sound(time, "drum", 40 + (i % 3) as u8 * 20));
        if i % 6 == 0 {
            control_points.add(ControlPoint::timing(time, 333.3 - f64::from(i), 3));
        }
    }

    Beatmap {
        metadata: metadata("Busy", "Hard"),
        control_points,
        breaks: vec![BreakPeriod::new(15_000.0, 19_000.0), BreakPeriod::new(45_000.0, 52_000.0)],
        bookmarks: (1..=6).map(|i| i * 10_000).collect(),
    }
}

/// All demo beatmaps
pub fn beatmaps() -> Vec<Beatmap> {
    vec![steady(), busy()]
}

/// Audio length to give a beatmap with no audio of its own
///
/// Covers the last object with a short tail.
pub fn track_length(beatmap: &Beatmap) -> f64 {
    const TAIL: f64 = 4_000.0;

    let last_point = beatmap.control_points.points().iter().map(|p| p.time);
    let last_break = beatmap.breaks.iter().map(|b| b.end_time.max(b.start_time));
    let last_bookmark = beatmap.bookmarks.iter().map(|&b| f64::from(b));

    let last = last_point
        .chain(last_break)
        .chain(last_bookmark)
        .fold(0.0_f64, f64::max);

    last + TAIL
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline rendering and input.
//!
//! Layout, back to front:
//! - Rounded background
//! - Control point lane above the centre line
//! - Bookmark lane below the centre line
//! - Time-axis bar with end caps
//! - Break lane across the centre
//! - Playback marker

use crate::style::colour;
use crate::timeline::{PointerEvent, Timeline};
use crate::track::TimelineTrack;
use egui::{PointerButton, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2};

impl Timeline {
    /// Collect this frame's pointer events from an interaction response
    fn pointer_events(ui: &Ui, response: &Response) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let latest = ui.input(|i| i.pointer.interact_pos());
        let pos = response.interact_pointer_pos().or(latest);

        if response.hovered() && ui.input(|i| i.pointer.primary_pressed()) {
            if let Some(pos) = latest {
                events.push(PointerEvent::Down(pos));
            }
        }

        let Some(pos) = pos else {
            return events;
        };

        if response.drag_started_by(PointerButton::Primary) {
            events.push(PointerEvent::DragStart(pos));
        } else if response.dragged_by(PointerButton::Primary) && response.drag_delta() != Vec2::ZERO {
            events.push(PointerEvent::Drag(pos));
        }

        if response.drag_stopped_by(PointerButton::Primary) {
            events.push(PointerEvent::DragEnd(pos));
        }

        events
    }

    /// Paint the whole widget into `rect`
    fn paint(&self, painter: &egui::Painter, rect: Rect) {
        let style = self.style();
        let content = self.content_rect(rect);

        painter.rect_filled(rect, style.corner_radius, colour(style.colours.background));

        self.control_point_track()
            .track()
            .paint(painter, style.control_point_lane.rect(content), style);
        self.bookmark_track()
            .track()
            .paint(painter, style.bookmark_lane.rect(content), style);

        self.paint_timeline_bar(painter, content);

        self.break_track()
            .track()
            .paint(painter, style.break_lane.rect(content), style);

        self.paint_playback_marker(painter, content);
    }

    /// Centre line with a round cap just outside each end
    fn paint_timeline_bar(&self, painter: &egui::Painter, content: Rect) {
        let style = self.style();
        let bar_colour = colour(style.colours.timeline_bar);
        let y = content.center().y;
        let cap_radius = style.bar_cap_size / 2.0;

        painter.line_segment(
            [Pos2::new(content.min.x, y), Pos2::new(content.max.x, y)],
            Stroke::new(1.0, bar_colour),
        );
        painter.circle_filled(Pos2::new(content.min.x - cap_radius, y), cap_radius, bar_colour);
        painter.circle_filled(Pos2::new(content.max.x + cap_radius, y), cap_radius, bar_colour);
    }

    /// Full-height bar with a triangle at each end, at the raw playback time
    fn paint_playback_marker(&self, painter: &egui::Painter, content: Rect) {
        let style = self.style();
        let marker_colour = colour(style.colours.playback_marker);
        let x = content.min.x + self.playback_marker().relative_position(self.scale()) * content.width();

        let half_bar = style.marker_bar_width / 2.0;
        painter.rect_filled(
            Rect::from_min_max(
                Pos2::new(x - half_bar, content.min.y),
                Pos2::new(x + half_bar, content.max.y),
            ),
            0.0,
            marker_colour,
        );

        let [head_width, head_height] = style.marker_head_size;
        let half_head = head_width / 2.0;
        let top = content.min.y;
        let bottom = content.max.y;

        painter.add(Shape::convex_polygon(
            vec![
                Pos2::new(x - half_head, top),
                Pos2::new(x + half_head, top),
                Pos2::new(x, top + head_height),
            ],
            marker_colour,
            Stroke::NONE,
        ));
        painter.add(Shape::convex_polygon(
            vec![
                Pos2::new(x, bottom - head_height),
                Pos2::new(x + half_head, bottom),
                Pos2::new(x - half_head, bottom),
            ],
            marker_colour,
            Stroke::NONE,
        ));
    }
}

impl egui::Widget for &mut Timeline {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        // beatmap changes land before anything reads the scale this frame
        self.update();

        let content = self.content_rect(rect);
        for event in Timeline::pointer_events(ui, &response) {
            self.on_pointer(event, content);
        }
        // seeks are visible immediately rather than a frame late
        self.update();

        if ui.is_rect_visible(rect) {
            self.paint(&ui.painter_at(rect), rect);
        }

        if self.beatmap().clock.length() > 0.0 {
            ui.ctx().request_repaint();
        }

        let hover_time = response
            .hover_pos()
            .and_then(|pos| self.time_at(pos, content));
        let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);
        match hover_time {
            Some(time) => response.on_hover_text_at_pointer(format_time(time)),
            None => response,
        }
    }
}

/// Format a millisecond time as `mm:ss.mmm`
pub fn format_time(time: f64) -> String {
    let sign = if time < 0.0 { "-" } else { "" };
    let total_ms = time.abs().round() as u64;
    let minutes = total_ms / 60_000;
    let seconds = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{sign}{minutes:02}:{seconds:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::{Beatmap, WorkingBeatmap};
    use crate::binding::BeatmapBinding;
    use crate::clock::{MediaClock, TrackClock};
    use crate::style::TimelineStyle;
    use egui::{Event, Modifiers, RawInput};
    use std::sync::Arc;

    /// Run one frame with the timeline at the top-left in a 500x50 area
    fn run_frame(ctx: &egui::Context, timeline: &mut Timeline, events: Vec<Event>) {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 200.0))),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    ui.add_sized([500.0, 50.0], &mut *timeline);
                });
        });
    }

    fn moved(x: f32) -> Vec<Event> {
        vec![Event::PointerMoved(Pos2::new(x, 25.0))]
    }

    fn button(x: f32, pressed: bool) -> Vec<Event> {
        vec![Event::PointerButton {
            pos: Pos2::new(x, 25.0),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }]
    }

    #[test]
    fn test_pointer_input_seeks() {
        // content spans x = 15..485 after the default padding
        let clock = Arc::new(TrackClock::new(4700.0));
        let binding = BeatmapBinding::new(WorkingBeatmap::new(Beatmap::default(), clock.clone()));
        let mut timeline = Timeline::new(binding, TimelineStyle::default());
        let ctx = egui::Context::default();

        run_frame(&ctx, &mut timeline, Vec::new());
        run_frame(&ctx, &mut timeline, moved(250.0));
        assert_eq!(clock.current_time(), 0.0);

        // press seeks
        run_frame(&ctx, &mut timeline, button(250.0, true));
        assert_eq!(clock.current_time(), 2350.0);
        assert_eq!(timeline.playback_marker().time(), 2350.0);

        // crossing the drag threshold starts the drag without seeking
        run_frame(&ctx, &mut timeline, moved(300.0));
        assert!(timeline.is_dragging());
        assert_eq!(clock.current_time(), 2350.0);

        // drag moves seek
        run_frame(&ctx, &mut timeline, moved(350.0));
        assert!((clock.current_time() - 3350.0).abs() < 1e-6);

        // past the end clamps to the length
        run_frame(&ctx, &mut timeline, moved(600.0));
        assert_eq!(clock.current_time(), 4700.0);

        // release ends the drag, later moves do nothing
        run_frame(&ctx, &mut timeline, button(600.0, false));
        assert!(!timeline.is_dragging());
        run_frame(&ctx, &mut timeline, moved(100.0));
        run_frame(&ctx, &mut timeline, moved(120.0));
        assert_eq!(clock.current_time(), 4700.0);
    }

    #[test]
    fn test_hover_without_press_does_not_seek() {
        let clock = Arc::new(TrackClock::new(4700.0));
        let binding = BeatmapBinding::new(WorkingBeatmap::new(Beatmap::default(), clock.clone()));
        let mut timeline = Timeline::new(binding, TimelineStyle::default());
        let ctx = egui::Context::default();

        run_frame(&ctx, &mut timeline, Vec::new());
        for x in [100.0, 200.0, 300.0] {
            run_frame(&ctx, &mut timeline, moved(x));
        }
        assert_eq!(clock.current_time(), 0.0);
        assert!(!timeline.is_dragging());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00.000");
        assert_eq!(format_time(61_234.4), "01:01.234");
        assert_eq!(format_time(-1500.0), "-00:01.500");
    }
}

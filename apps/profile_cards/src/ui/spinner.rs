//! Three bouncing dots shown while profiles load.

use eframe::egui;

const DOT_RADIUS: f32 = 9.0;
const DOT_GAP: f32 = 10.0;
const CYCLE_SECS: f64 = 1.4;

/// Scale of dot `index` at time `t`, in `0.0..=1.0`. Dots are staggered by
/// 0.16 s and grow then shrink once per cycle.
pub fn bounce_scale(t: f64, index: usize) -> f32 {
    let phase = ((t - 0.16 * (2 - index.min(2)) as f64).rem_euclid(CYCLE_SECS)) / CYCLE_SECS;
    let scale = if phase < 0.4 {
        phase / 0.4
    } else if phase < 0.8 {
        1.0 - (phase - 0.4) / 0.4
    } else {
        0.0
    };
    scale.clamp(0.0, 1.0) as f32
}

pub fn loading_dots(ui: &mut egui::Ui, color: egui::Color32) -> egui::Response {
    let size = egui::vec2(DOT_RADIUS * 6.0 + DOT_GAP * 2.0, DOT_RADIUS * 2.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
    let t = ui.input(|i| i.time);
    let painter = ui.painter();
    for index in 0..3 {
        let center = egui::pos2(
            rect.left() + DOT_RADIUS + index as f32 * (DOT_RADIUS * 2.0 + DOT_GAP),
            rect.center().y,
        );
        painter.circle_filled(center, DOT_RADIUS * bounce_scale(t, index), color);
    }
    response
}

//! Colors and visuals for the card grid.

use eframe::egui;

#[derive(Debug, Clone, Copy)]
pub struct CardPalette {
    pub app_background: egui::Color32,
    pub card_background: egui::Color32,
    pub card_stroke: egui::Color32,
    pub title_text: egui::Color32,
    pub detail_text: egui::Color32,
    pub hint_text: egui::Color32,
    pub icon_text: egui::Color32,
    pub like_active: egui::Color32,
    pub delete_hover: egui::Color32,
    pub accent: egui::Color32,
}

impl Default for CardPalette {
    fn default() -> Self {
        Self {
            app_background: egui::Color32::from_rgb(26, 26, 30),
            card_background: egui::Color32::from_rgb(36, 36, 40),
            card_stroke: egui::Color32::from_rgb(48, 48, 56),
            title_text: egui::Color32::from_rgb(251, 251, 251),
            detail_text: egui::Color32::from_rgb(239, 239, 241),
            hint_text: egui::Color32::from_rgb(108, 109, 118),
            icon_text: egui::Color32::from_rgb(129, 130, 138),
            like_active: egui::Color32::from_rgb(237, 66, 69),
            delete_hover: egui::Color32::from_rgb(175, 96, 96),
            accent: egui::Color32::from_rgb(88, 101, 242),
        }
    }
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn visuals_for_palette(palette: &CardPalette) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = None;
    visuals.window_fill = palette.card_background;
    visuals.panel_fill = palette.app_background;
    visuals.extreme_bg_color = palette.app_background;
    visuals.faint_bg_color = egui::Color32::from_rgb(29, 29, 30);
    visuals.hyperlink_color = palette.accent;
    visuals.selection.bg_fill = palette.accent;
    visuals.window_stroke = egui::Stroke::new(1.0, palette.card_stroke);
    visuals.window_corner_radius = egui::CornerRadius::same(12);
    visuals.widgets.active.bg_fill = palette.accent;
    visuals.widgets.hovered.bg_fill = palette.accent.gamma_multiply(0.85);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, palette.card_stroke);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, palette.card_stroke);
    visuals
}

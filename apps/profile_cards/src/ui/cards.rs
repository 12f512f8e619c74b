//! One profile card: avatar, contact details, and like/edit/delete actions.

use eframe::egui;
use shared::domain::UserProfile;

use crate::controller::reducer::ProfileAction;
use crate::media::{placeholder_initial, placeholder_rgb};
use crate::ui::theme::{lighten_color, CardPalette};

pub const CARD_WIDTH: f32 = 280.0;
pub const AVATAR_EDGE: f32 = 120.0;

fn icon_btn(
    icon: &str,
    color: egui::Color32,
    active_bg: Option<egui::Color32>,
) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(icon).size(16.0).color(color))
        .min_size(egui::vec2(32.0, 28.0))
        .stroke(egui::Stroke::NONE)
        .fill(active_bg.unwrap_or(egui::Color32::TRANSPARENT))
}

fn avatar_section(ui: &mut egui::Ui, profile: &UserProfile, avatar: Option<&egui::TextureHandle>) {
    let size = egui::vec2(AVATAR_EDGE, AVATAR_EDGE);
    let response = match avatar {
        Some(texture) => ui.add(egui::Image::new(texture).fit_to_exact_size(size)),
        None => {
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
            let [r, g, b] = placeholder_rgb(&profile.username);
            let painter = ui.painter();
            painter.circle_filled(rect.center(), AVATAR_EDGE / 2.0, egui::Color32::from_rgb(r, g, b));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                placeholder_initial(&profile.username),
                egui::FontId::proportional(AVATAR_EDGE * 0.42),
                egui::Color32::WHITE,
            );
            response
        }
    };
    response.on_hover_text(format!("Avatar for {}", profile.username));
}

fn detail_row(ui: &mut egui::Ui, icon: &str, text: &str, palette: &CardPalette) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [18.0, 18.0],
            egui::Label::new(egui::RichText::new(icon).color(palette.icon_text)),
        );
        ui.add(egui::Label::new(egui::RichText::new(text).color(palette.detail_text)).truncate())
            .on_hover_text(text);
    });
}

/// Draws the card and returns the action the user clicked, if any.
pub fn profile_card(
    ui: &mut egui::Ui,
    profile: &UserProfile,
    avatar: Option<&egui::TextureHandle>,
    palette: &CardPalette,
) -> Option<ProfileAction> {
    let mut action = None;

    egui::Frame::NONE
        .fill(palette.card_background)
        .stroke(egui::Stroke::new(1.0, palette.card_stroke))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(16, 14))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

            ui.vertical_centered(|ui| {
                avatar_section(ui, profile, avatar);
            });
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(&profile.username)
                    .strong()
                    .size(18.0)
                    .color(palette.title_text),
            );
            detail_row(ui, "✉", &profile.email, palette);
            detail_row(ui, "📞", &profile.phone, palette);
            detail_row(ui, "🌐", &profile.website, palette);

            ui.add_space(4.0);
            ui.separator();

            ui.horizontal(|ui| {
                let (heart_color, heart_bg, heart_hint) = if profile.liked {
                    (
                        palette.like_active,
                        Some(palette.like_active.gamma_multiply(0.18)),
                        "Unlike",
                    )
                } else {
                    (palette.icon_text, None, "Like")
                };
                if ui
                    .add(icon_btn("♥", heart_color, heart_bg))
                    .on_hover_text(heart_hint)
                    .clicked()
                {
                    action = Some(ProfileAction::ToggleLike(profile.id));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let delete = ui
                        .add(icon_btn("🗑", palette.icon_text, None))
                        .on_hover_text("Delete");
                    if delete.hovered() {
                        ui.painter().rect_stroke(
                            delete.rect,
                            egui::CornerRadius::same(4),
                            egui::Stroke::new(1.0, palette.delete_hover),
                            egui::StrokeKind::Inside,
                        );
                    }
                    if delete.clicked() {
                        action = Some(ProfileAction::Delete(profile.id));
                    }

                    if ui
                        .add(icon_btn("✏", lighten_color(palette.icon_text, 0.2), None))
                        .on_hover_text("Edit")
                        .clicked()
                    {
                        action = Some(ProfileAction::BeginEdit(profile.id));
                    }
                });
            });
        });

    action
}

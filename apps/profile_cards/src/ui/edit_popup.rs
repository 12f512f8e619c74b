//! Modal form for editing one profile's contact fields.

use eframe::egui;
use shared::domain::ProfileField;

use crate::controller::reducer::EditSession;
use crate::ui::theme::CardPalette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Pending,
    Save,
    Cancel,
}

fn field_input(
    ui: &mut egui::Ui,
    session: &mut EditSession,
    field: ProfileField,
    palette: &CardPalette,
) -> egui::Response {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("*").color(palette.like_active));
        ui.label(egui::RichText::new(format!("{} :", field.label())).strong());
    });

    let edit = egui::TextEdit::singleline(session.draft.field_mut(field))
        .id_salt(("edit_profile_field", field))
        .desired_width(f32::INFINITY);
    let response = ui.add_sized([ui.available_width(), 30.0], edit);

    if response.changed() && !session.draft.field(field).trim().is_empty() {
        session.missing.retain(|missing| *missing != field);
    }
    if session.missing.contains(&field) {
        ui.small(
            egui::RichText::new(format!("{} is required", field.label()))
                .color(palette.like_active),
        );
    }
    response
}

/// Draws the modal for `session`. Escape or a click on the backdrop cancels.
pub fn show_edit_popup(
    ctx: &egui::Context,
    session: &mut EditSession,
    palette: &CardPalette,
) -> EditOutcome {
    let mut outcome = EditOutcome::Pending;

    let modal = egui::Modal::new(egui::Id::new("edit_profile_modal")).show(ctx, |ui| {
        ui.set_width(360.0);
        ui.heading("Edit User");
        ui.add_space(8.0);

        let mut submit = false;
        for field in ProfileField::ALL {
            let response = field_input(ui, session, field, palette);
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            ui.add_space(4.0);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let ok = egui::Button::new(egui::RichText::new("Ok").strong())
                    .fill(palette.accent)
                    .min_size(egui::vec2(72.0, 30.0));
                if ui.add(ok).clicked() {
                    submit = true;
                }
                if ui
                    .add(egui::Button::new("Cancel").min_size(egui::vec2(72.0, 30.0)))
                    .clicked()
                {
                    outcome = EditOutcome::Cancel;
                }
            });
        });

        if submit && outcome == EditOutcome::Pending {
            outcome = EditOutcome::Save;
        }
    });

    if outcome == EditOutcome::Pending && modal.should_close() {
        outcome = EditOutcome::Cancel;
    }
    outcome
}

use std::{collections::HashMap, time::Duration};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use shared::domain::UserId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{LoadPhase, ProfileAction, ProfileBoard, ReduceOutcome},
};
use crate::media::AvatarImage;
use crate::ui::{
    cards::{profile_card, CARD_WIDTH},
    edit_popup::{show_edit_popup, EditOutcome},
    spinner::loading_dots,
    theme::{visuals_for_palette, CardPalette},
};

pub struct ProfileCardsApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    board: ProfileBoard,
    avatars: HashMap<UserId, AvatarImage>,
    avatar_textures: HashMap<UserId, TextureHandle>,

    status: String,
    palette: CardPalette,
    theme_applied: bool,
}

impl ProfileCardsApp {
    /// Builds the app and schedules the one profile load of this run.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        load_delay: Duration,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            board: ProfileBoard::new(),
            avatars: HashMap::new(),
            avatar_textures: HashMap::new(),
            status: format!("Loading profiles in {:.1}s", load_delay.as_secs_f32()),
            palette: CardPalette::default(),
            theme_applied: false,
        };
        dispatch_backend_command(
            &app.cmd_tx,
            BackendCommand::LoadProfiles { delay: load_delay },
            &mut app.status,
        );
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::BackendFailed(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
                UiEvent::ProfilesLoaded { profiles, avatars } => {
                    let count = profiles.len();
                    if self.apply(ProfileAction::Loaded(profiles)) == ReduceOutcome::Applied {
                        self.avatars = avatars;
                        self.avatar_textures.clear();
                        self.status = format!("{count} profiles");
                    }
                }
            }
        }
    }

    fn apply(&mut self, action: ProfileAction) -> ReduceOutcome {
        let name = action.name();
        let user_id = action.target().map(|id| id.0);
        let deleted = match &action {
            ProfileAction::Delete(id) => Some(*id),
            _ => None,
        };

        let outcome = self.board.reduce(action);
        match &outcome {
            ReduceOutcome::Applied => {
                tracing::debug!(action = name, user_id, "profile action applied");
                if let Some(id) = deleted {
                    self.avatars.remove(&id);
                    self.avatar_textures.remove(&id);
                    self.status = format!("{} profiles", self.board.profiles().len());
                }
            }
            ReduceOutcome::Ignored => {
                tracing::debug!(action = name, user_id, "profile action ignored");
            }
            ReduceOutcome::Invalid(err) => {
                tracing::debug!(action = name, "edit rejected: {err}");
            }
        }
        outcome
    }

    fn avatar_texture(&mut self, ctx: &egui::Context, user_id: UserId) -> Option<TextureHandle> {
        if let Some(texture) = self.avatar_textures.get(&user_id) {
            return Some(texture.clone());
        }
        let avatar = self.avatars.get(&user_id)?;
        let color_image =
            egui::ColorImage::from_rgba_unmultiplied([avatar.width, avatar.height], &avatar.rgba);
        let texture = ctx.load_texture(
            format!("avatar:{}", user_id.0),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        self.avatar_textures.insert(user_id, texture.clone());
        Some(texture)
    }

    fn show_loading(&self, ui: &mut egui::Ui) {
        let avail = ui.available_size();
        ui.add_space((avail.y * 0.4).max(24.0));
        ui.vertical_centered(|ui| {
            loading_dots(ui, self.palette.accent);
        });
    }

    fn show_profile_list(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let ids: Vec<UserId> = self.board.profiles().iter().map(|p| p.id).collect();
        let textures: HashMap<UserId, TextureHandle> = ids
            .iter()
            .filter_map(|id| self.avatar_texture(&ctx, *id).map(|texture| (*id, texture)))
            .collect();

        let mut clicked = Vec::new();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.board.profiles().is_empty() {
                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("No profiles left.").color(self.palette.hint_text),
                        );
                    });
                    return;
                }

                let columns = ((ui.available_width() + 12.0) / (CARD_WIDTH + 32.0 + 12.0))
                    .floor()
                    .max(1.0) as usize;
                ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                for row in self.board.profiles().chunks(columns) {
                    ui.horizontal(|ui| {
                        for profile in row {
                            if let Some(action) = profile_card(
                                ui,
                                profile,
                                textures.get(&profile.id),
                                &self.palette,
                            ) {
                                clicked.push(action);
                            }
                        }
                    });
                }
            });

        for action in clicked {
            self.apply(action);
        }
    }

    fn show_edit_modal(&mut self, ctx: &egui::Context) {
        let Some(session) = self.board.edit_session_mut() else {
            return;
        };
        match show_edit_popup(ctx, session, &self.palette) {
            EditOutcome::Pending => {}
            EditOutcome::Save => {
                self.apply(ProfileAction::SaveEdit);
            }
            EditOutcome::Cancel => {
                self.apply(ProfileAction::CancelEdit);
            }
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.small(egui::RichText::new(&self.status).color(self.palette.hint_text));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let liked = self.board.profiles().iter().filter(|p| p.liked).count();
                        if liked > 0 {
                            ui.small(
                                egui::RichText::new(format!("♥ {liked}"))
                                    .color(self.palette.like_active),
                            );
                        }
                    });
                });
            });
    }
}

impl eframe::App for ProfileCardsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        if !self.theme_applied {
            ctx.set_visuals(visuals_for_palette(&self.palette));
            self.theme_applied = true;
        }

        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| match self.board.phase() {
            LoadPhase::Loading => self.show_loading(ui),
            LoadPhase::Ready => self.show_profile_list(ui),
        });
        self.show_edit_modal(ctx);

        match self.board.phase() {
            LoadPhase::Loading => ctx.request_repaint_after(Duration::from_millis(16)),
            LoadPhase::Ready => ctx.request_repaint_after(Duration::from_millis(100)),
        }
    }
}

impl Drop for ProfileCardsApp {
    fn drop(&mut self) {
        // Leaving the window drops any load still waiting out its delay.
        let _ = self.cmd_tx.try_send(BackendCommand::CancelPendingLoad);
    }
}

//! Main GUI application
//!
//! egui application state and rendering. All mutation goes through the
//! launcher store; the GUI drives each async action to completion on its
//! own runtime, so the store's loading flag only covers the simulated
//! backend round-trips.

use eframe::egui;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::core::api::FakeApi;
use crate::core::schema::{GameDraft, InstanceDraft, LoaderDraft};
use crate::core::store::LauncherStore;
use crate::core::version::{self, VersionInfo};
use crate::util::format_last_played;

const LOADERS: [&str; 4] = ["Vanilla", "Fabric", "Forge", "Quilt"];

/// Main launcher application state
pub struct LauncherApp {
    /// Instance store (simulated backend)
    store: LauncherStore<FakeApi>,
    /// Runtime driving the store's async actions
    runtime: Runtime,
    /// Launcher configuration
    config: Config,
    /// Version catalog for the add-instance form
    versions: Vec<VersionInfo>,
    /// New instance form
    new_instance: NewInstanceForm,
    /// Instance currently being duplicated, with the pending copy name
    duplicate_form: Option<DuplicateForm>,
    /// Success message to display
    success_message: Option<String>,
    /// Status message
    status_message: String,
}

#[derive(Default)]
struct NewInstanceForm {
    name: String,
    loader: String,
    loader_version: String,
    game_version: String,
}

struct DuplicateForm {
    original_name: String,
    new_name: String,
}

/// Row action, collected during rendering and applied afterwards.
enum RowAction {
    Play(String),
    Duplicate(String),
    Delete(String),
    Select(String),
}

impl LauncherApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, runtime: Runtime) -> Self {
        let mut store = LauncherStore::with_fake_backend();
        // Failures land in the store's error field and show in the status bar.
        let _ = runtime.block_on(store.initialize());

        Self {
            store,
            runtime,
            config,
            versions: version::catalog(),
            new_instance: NewInstanceForm::default(),
            duplicate_form: None,
            success_message: None,
            status_message: "Ready".to_string(),
        }
    }

    fn open_add_instance_modal(&mut self) {
        self.new_instance = NewInstanceForm {
            loader: "Vanilla".to_string(),
            ..NewInstanceForm::default()
        };
        self.store.add_instance_modal_open = true;
    }

    fn submit_new_instance(&mut self) {
        let loader_version = if self.new_instance.loader_version.is_empty() {
            // Vanilla convention: loader version matches the game version.
            self.new_instance.game_version.clone()
        } else {
            self.new_instance.loader_version.clone()
        };

        let draft = InstanceDraft {
            name: self.new_instance.name.clone(),
            loader: LoaderDraft {
                loader: self.new_instance.loader.clone(),
                version: loader_version,
            },
            game: GameDraft {
                version: self.new_instance.game_version.clone(),
            },
            last_played: None,
        };

        if self.runtime.block_on(self.store.add_instance(draft)).is_ok() {
            self.success_message = Some(format!("Instance '{}' created", self.new_instance.name));
            self.store.add_instance_modal_open = false;
            self.new_instance = NewInstanceForm::default();
        }
    }

    fn apply_row_action(&mut self, action: RowAction, ctx: &egui::Context) {
        match action {
            RowAction::Play(name) => {
                self.store.update_instance_last_played(&name);
                let instance = self.store.get_instance_by_name(&name).cloned();
                self.store.set_current_instance(instance);
                self.status_message = format!("Playing {name}");
                if self.config.general.close_on_launch {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
            RowAction::Duplicate(name) => {
                self.duplicate_form = Some(DuplicateForm {
                    new_name: format!("{name} Copy"),
                    original_name: name,
                });
            }
            RowAction::Delete(name) => {
                if self.runtime.block_on(self.store.delete_instance(&name)).is_ok() {
                    self.success_message = Some(format!("Deleted '{name}'"));
                }
            }
            RowAction::Select(name) => {
                let instance = self.store.get_instance_by_name(&name).cloned();
                self.store.set_current_instance(instance);
            }
        }
    }

    fn show_instances(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.heading("Instances");
            ui.label(format!("({})", self.store.instance_count()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("➕ New").clicked() {
                    self.open_add_instance_modal();
                }
                if ui.button("🔄 Reset").clicked() {
                    self.store.reset_to_fake_data();
                    self.success_message = Some("Restored default instances".to_string());
                }
            });
        });
        ui.separator();

        if !self.store.has_instances() {
            ui.vertical_centered(|ui| {
                ui.add_space(50.0);
                ui.label("No instances yet.");
                ui.label("Click '➕ New' to create one.");
            });
            return;
        }

        let current_name = self.store.current_instance().map(|i| i.name.clone());
        let mut action = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            for instance in self.store.sorted_instances() {
                let is_current = current_name.as_deref() == Some(instance.name.as_str());

                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        let response = ui.selectable_label(
                            is_current,
                            format!(
                                "📦 {} - {} {} (game {})",
                                instance.name,
                                instance.loader.loader,
                                instance.loader.version,
                                instance.game.version
                            ),
                        );
                        if response.clicked() {
                            action = Some(RowAction::Select(instance.name.clone()));
                        }

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let idle = !self.store.is_loading();
                            if ui.add_enabled(idle, egui::Button::new("🗑")).clicked() {
                                action = Some(RowAction::Delete(instance.name.clone()));
                            }
                            if ui.add_enabled(idle, egui::Button::new("📋")).clicked() {
                                action = Some(RowAction::Duplicate(instance.name.clone()));
                            }
                            if ui.add_enabled(idle, egui::Button::new("▶ Play")).clicked() {
                                action = Some(RowAction::Play(instance.name.clone()));
                            }
                            ui.label(format_last_played(instance.last_played));
                        });
                    });
                });
            }
        });

        if let Some(action) = action {
            self.apply_row_action(action, ctx);
        }
    }

    fn show_add_instance_modal(&mut self, ctx: &egui::Context) {
        let mut open = self.store.add_instance_modal_open;
        let mut submitted = false;

        egui::Window::new("New Instance")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("new_instance_form")
                    .num_columns(2)
                    .spacing([10.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Name:");
                        ui.text_edit_singleline(&mut self.new_instance.name);
                        ui.end_row();

                        ui.label("Loader:");
                        egui::ComboBox::from_id_salt("loader_combo")
                            .selected_text(&self.new_instance.loader)
                            .show_ui(ui, |ui| {
                                for loader in LOADERS {
                                    ui.selectable_value(
                                        &mut self.new_instance.loader,
                                        loader.to_string(),
                                        loader,
                                    );
                                }
                            });
                        ui.end_row();

                        ui.label("Loader version:");
                        ui.text_edit_singleline(&mut self.new_instance.loader_version);
                        ui.end_row();

                        ui.label("Game version:");
                        egui::ComboBox::from_id_salt("version_combo")
                            .selected_text(&self.new_instance.game_version)
                            .show_ui(ui, |ui| {
                                let shown = version::filter_versions(
                                    &self.versions,
                                    self.config.general.show_snapshots,
                                );
                                for info in shown {
                                    ui.selectable_value(
                                        &mut self.new_instance.game_version,
                                        info.id.clone(),
                                        &info.id,
                                    );
                                }
                            });
                        ui.end_row();
                    });

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!self.store.is_loading(), egui::Button::new("Create"))
                        .clicked()
                    {
                        submitted = true;
                    }
                    if self.store.is_loading() {
                        ui.spinner();
                    }
                });
            });

        self.store.add_instance_modal_open = open;
        if submitted {
            self.submit_new_instance();
        }
    }

    fn show_settings_modal(&mut self, ctx: &egui::Context) {
        let mut open = self.store.settings_modal_open;

        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("General");
                ui.horizontal(|ui| {
                    ui.label("Language:");
                    ui.text_edit_singleline(&mut self.config.general.language);
                });
                ui.checkbox(
                    &mut self.config.general.check_updates,
                    "Check for updates on startup",
                );
                ui.checkbox(
                    &mut self.config.general.close_on_launch,
                    "Close launcher after game starts",
                );
                ui.checkbox(
                    &mut self.config.general.show_snapshots,
                    "Show snapshot versions",
                );

                ui.add_space(10.0);
                if ui.button("💾 Save").clicked() {
                    match config::save(&self.config) {
                        Ok(()) => self.success_message = Some("Settings saved".to_string()),
                        Err(e) => self.status_message = format!("Could not save settings: {e}"),
                    }
                }
            });

        self.store.settings_modal_open = open;
    }

    fn show_duplicate_modal(&mut self, ctx: &egui::Context) {
        let Some(form) = &mut self.duplicate_form else {
            return;
        };

        let mut open = true;
        let mut confirmed = false;

        egui::Window::new(format!("Duplicate '{}'", form.original_name))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("New name:");
                    ui.text_edit_singleline(&mut form.new_name);
                });
                ui.add_space(10.0);
                if ui.button("Duplicate").clicked() {
                    confirmed = true;
                }
            });

        if confirmed {
            let original = form.original_name.clone();
            let new_name = form.new_name.clone();
            if self
                .runtime
                .block_on(self.store.duplicate_instance(&original, &new_name))
                .is_ok()
            {
                self.success_message = Some(format!("Duplicated '{original}' as '{new_name}'"));
                self.duplicate_form = None;
            }
        } else if !open {
            self.duplicate_form = None;
        }
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel - Header
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🧊 CubicLauncher");
                ui.separator();
                if ui.button("⚙ Settings").clicked() {
                    self.store.toggle_settings_modal();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(current) = self.store.current_instance() {
                        ui.label(format!("▶ {}", current.name));
                    }
                });
            });
        });

        // Bottom panel - Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.store.error().is_some() {
                    let message = self.store.error().unwrap_or_default().to_string();
                    ui.colored_label(egui::Color32::RED, format!("❌ {message}"));
                    if ui.small_button("✕").clicked() {
                        self.store.clear_error();
                    }
                } else if let Some(msg) = &self.success_message {
                    ui.colored_label(egui::Color32::GREEN, format!("✅ {msg}"));
                    if ui.small_button("✕").clicked() {
                        self.success_message = None;
                    }
                } else if self.store.is_loading() {
                    ui.spinner();
                    ui.label(&self.status_message);
                } else {
                    ui.label(&self.status_message);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("v0.1.0");
                });
            });
        });

        // Central panel - Instance list
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_instances(ui, ctx);
        });

        // Modals
        if self.store.add_instance_modal_open {
            self.show_add_instance_modal(ctx);
        }
        if self.store.settings_modal_open {
            self.show_settings_modal(ctx);
        }
        self.show_duplicate_modal(ctx);
    }
}

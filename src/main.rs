//! PathWarp-Editor.
//!
//! Biegt ein flaches Bild entlang eines editierbaren Catmull-Rom-Pfads
//! und exportiert das Ergebnis als hochaufgelöstes PNG.

use eframe::egui;
use path_warp_editor::{ui, AppController, AppIntent, AppState, TickReport, WarpOptions};

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("PathWarp-Editor v{} startet...", env!("CARGO_PKG_VERSION"));

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 720.0])
                .with_title("PathWarp-Editor"),
            renderer: eframe::Renderer::Wgpu,
            multisampling: 4,
            ..Default::default()
        };

        eframe::run_native(
            "PathWarp-Editor",
            options,
            Box::new(|_cc| Ok(Box::new(WarpApp::new()))),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct WarpApp {
    state: AppState,
    controller: AppController,
    input: ui::InputState,
    texture: ui::PreviewTexture,
}

impl WarpApp {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = WarpOptions::config_path();
        let warp_options = WarpOptions::load_from_file(&config_path);

        Self {
            state: AppState::with_options(warp_options),
            controller: AppController::new(),
            input: ui::InputState::new(),
            texture: ui::PreviewTexture::new(),
        }
    }
}

impl eframe::App for WarpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // Neuberechnung vor dem Zeichnen, damit die Vorschau den aktuellen Stand zeigt
        let report = self.controller.tick(&mut self.state);
        self.sync_texture(ctx);

        let events = self.collect_ui_events(ctx);

        let has_meaningful_events = events
            .iter()
            .any(|e| !matches!(e, AppIntent::ViewportResized { .. }));

        self.process_events(events);

        self.maybe_request_repaint(ctx, has_meaningful_events, &report);
    }
}

impl WarpApp {
    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let mut events = Vec::new();

        events.extend(ui::render_status_bar(ctx, &self.state));
        events.extend(ui::render_menu(ctx, &self.state));
        events.extend(ui::render_properties_panel(ctx, &mut self.state));
        events.extend(ui::handle_file_dialogs(&mut self.state.ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                let viewport_size = [rect.width(), rect.height()];

                events.extend(self.input.collect_viewport_events(
                    ui,
                    &response,
                    viewport_size,
                    &self.state,
                ));

                let scene = self
                    .controller
                    .build_render_scene(&self.state, viewport_size);
                ui::paint_preview(ui.painter(), rect, &scene, self.texture.handle());

                if !scene.has_path() {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Mindestens 2 Kontrollpunkte anlegen",
                        egui::FontId::proportional(20.0),
                        egui::Color32::WHITE,
                    );
                }
            });

        events
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Event handling failed: {:#}", e);
            }
        }
    }

    fn sync_texture(&mut self, ctx: &egui::Context) {
        let revision = self.state.image.revision();
        let image = self.state.image.current().clone();
        if self.texture.sync(ctx, &image, revision) {
            log::info!("Vorschau-Textur hochgeladen (Revision {})", revision);
        }
    }

    fn maybe_request_repaint(
        &self,
        ctx: &egui::Context,
        has_meaningful_events: bool,
        report: &TickReport,
    ) {
        let dragging = self.state.interaction.surface.is_active()
            || self.state.interaction.active_handles().next().is_some();

        if has_meaningful_events
            || ctx.input(|i| i.pointer.is_moving())
            || dragging
            || self.state.image.is_loading()
            || self.state.export.has_pending_request(&self.state.params)
            || self.state.export.is_awaiting_texture()
            || report.image.is_some()
            || report.export.is_some()
        {
            ctx.request_repaint();
        }
    }
}
